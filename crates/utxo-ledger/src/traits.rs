use utxo_types::{Address, Datum, DatumHash, RewardAccount, Transaction, TxOutRef, TxOutput, Utxo};

use crate::error::LedgerError;
use crate::stake::StakeAccount;
use crate::state::AppliedTx;

/// Read boundary over a ledger snapshot.
///
/// The validator only ever sees a ledger through this trait, so it cannot
/// mutate what it checks.
pub trait LedgerReader {
    /// The live output at `out_ref`, if any.
    fn utxo(&self, out_ref: &TxOutRef) -> Option<&TxOutput>;

    fn contains(&self, out_ref: &TxOutRef) -> bool {
        self.utxo(out_ref).is_some()
    }

    /// Resolve references to live UTxOs.
    ///
    /// Duplicates are collapsed (first occurrence wins) and unknown or spent
    /// references are silently dropped.
    fn resolve(&self, refs: &[TxOutRef]) -> Vec<Utxo>;

    /// All live UTxOs owned by `address`, ordered by reference.
    fn resolve_by_address(&self, address: &Address) -> Vec<Utxo>;

    fn datum(&self, hash: &DatumHash) -> Option<&Datum>;

    fn stake_account(&self, account: &RewardAccount) -> Option<&StakeAccount>;
}

/// Write boundary for ledger mutation.
pub trait LedgerWriter {
    /// Insert an output. Returns `false` (and changes nothing) if the
    /// reference is already live.
    fn insert(&mut self, out_ref: TxOutRef, output: TxOutput) -> bool;

    /// Remove a live output, returning it. No-op for unknown references.
    fn remove(&mut self, out_ref: &TxOutRef) -> Option<TxOutput>;

    /// Apply an already-validated transaction.
    ///
    /// Performs no validation. Everything that can fail is computed before
    /// the first mutation, so an error leaves the ledger untouched.
    fn apply_transaction(&mut self, tx: &Transaction) -> Result<AppliedTx, LedgerError>;
}
