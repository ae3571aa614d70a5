use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};
use utxo_types::{
    Address, Datum, DatumHash, RewardAccount, Transaction, TxId, TxOutRef, TxOutput, Utxo,
};

use crate::audit::IndexAuditor;
use crate::error::LedgerError;
use crate::stake::StakeAccount;
use crate::traits::{LedgerReader, LedgerWriter};

/// Effects of applying one transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedTx {
    pub tx_id: TxId,
    /// Inputs that were live and have been removed.
    pub consumed: Vec<TxOutRef>,
    /// References created for the transaction's outputs, in output order.
    pub produced: Vec<TxOutRef>,
    /// Datum witnesses not previously in the datum table.
    pub new_datums: usize,
}

/// In-memory ledger owned by a single emulator.
///
/// The address index is kept in step with the UTxO set by [`LedgerWriter::insert`]
/// and [`LedgerWriter::remove`]: a reference is in the set for address `A`
/// exactly when it is live and owned by `A`, and empty sets are dropped.
#[derive(Debug, Default)]
pub struct LedgerState {
    pub(crate) utxos: HashMap<TxOutRef, TxOutput>,
    pub(crate) addresses: HashMap<Address, HashSet<TxOutRef>>,
    pub(crate) stake: HashMap<RewardAccount, StakeAccount>,
    pub(crate) datums: HashMap<DatumHash, Datum>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed (or replace) a stake account.
    pub fn register_stake_account(&mut self, account: RewardAccount, state: StakeAccount) {
        self.stake.insert(account, state);
    }

    /// Record a datum under its hash. Existing entries are never replaced.
    /// Returns `true` if the datum was new.
    pub fn insert_datum(&mut self, datum: Datum) -> bool {
        match self.datums.entry(datum.hash()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(datum);
                true
            }
        }
    }

    pub fn utxo_count(&self) -> usize {
        self.utxos.len()
    }

    pub fn address_count(&self) -> usize {
        self.addresses.len()
    }

    pub fn datum_count(&self) -> usize {
        self.datums.len()
    }

    /// Snapshot of every live UTxO, ordered by reference.
    pub fn utxos(&self) -> Vec<Utxo> {
        let mut all: Vec<Utxo> = self
            .utxos
            .iter()
            .map(|(out_ref, output)| Utxo::new(*out_ref, output.clone()))
            .collect();
        all.sort_by_key(|u| u.out_ref);
        all
    }

    /// Sum of base currency across all live outputs.
    pub fn total_coin(&self) -> u128 {
        self.utxos.values().map(|o| u128::from(o.value.coin)).sum()
    }

    /// Check the address-index invariant, failing on the first violation.
    pub fn verify_index(&self) -> Result<(), LedgerError> {
        let report = IndexAuditor::audit(self);
        match report.violations.into_iter().next() {
            None => Ok(()),
            Some(violation) => Err(LedgerError::IndexViolation(violation.to_string())),
        }
    }

    fn withdraw(&mut self, account: &RewardAccount, amount: u64) {
        let Some(entry) = self.stake.get_mut(account) else {
            debug!(%account, amount, "withdrawal from unknown reward account ignored");
            return;
        };
        entry.withdraw(amount);
        if entry.is_overdrawn() {
            warn!(%account, amount, rewards = %entry.rewards, "reward balance driven negative by withdrawal");
        }
    }
}

impl LedgerReader for LedgerState {
    fn utxo(&self, out_ref: &TxOutRef) -> Option<&TxOutput> {
        self.utxos.get(out_ref)
    }

    fn resolve(&self, refs: &[TxOutRef]) -> Vec<Utxo> {
        let mut seen = HashSet::with_capacity(refs.len());
        refs.iter()
            .filter(|r| seen.insert(**r))
            .filter_map(|r| self.utxos.get(r).map(|o| Utxo::new(*r, o.clone())))
            .collect()
    }

    fn resolve_by_address(&self, address: &Address) -> Vec<Utxo> {
        let Some(refs) = self.addresses.get(address) else {
            return Vec::new();
        };
        let mut found: Vec<Utxo> = refs
            .iter()
            .filter_map(|r| self.utxos.get(r).map(|o| Utxo::new(*r, o.clone())))
            .collect();
        found.sort_by_key(|u| u.out_ref);
        found
    }

    fn datum(&self, hash: &DatumHash) -> Option<&Datum> {
        self.datums.get(hash)
    }

    fn stake_account(&self, account: &RewardAccount) -> Option<&StakeAccount> {
        self.stake.get(account)
    }
}

impl LedgerWriter for LedgerState {
    fn insert(&mut self, out_ref: TxOutRef, output: TxOutput) -> bool {
        match self.utxos.entry(out_ref) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                self.addresses
                    .entry(output.address.clone())
                    .or_default()
                    .insert(out_ref);
                slot.insert(output);
                true
            }
        }
    }

    fn remove(&mut self, out_ref: &TxOutRef) -> Option<TxOutput> {
        let output = self.utxos.remove(out_ref)?;
        if let Some(refs) = self.addresses.get_mut(&output.address) {
            refs.remove(out_ref);
            if refs.is_empty() {
                self.addresses.remove(&output.address);
            }
        }
        Some(output)
    }

    fn apply_transaction(&mut self, tx: &Transaction) -> Result<AppliedTx, LedgerError> {
        let tx_id = tx.id()?;
        let count = tx.body.outputs.len();
        if u32::try_from(count).is_err() {
            return Err(LedgerError::TooManyOutputs { count });
        }

        let consumed: Vec<TxOutRef> = tx
            .body
            .inputs
            .iter()
            .filter(|input| self.remove(input).is_some())
            .copied()
            .collect();

        let mut produced = Vec::with_capacity(count);
        for (index, output) in (0u32..).zip(tx.body.outputs.iter()) {
            let out_ref = TxOutRef::new(tx_id, index);
            self.insert(out_ref, output.clone());
            produced.push(out_ref);
        }

        for (account, amount) in &tx.body.withdrawals {
            self.withdraw(account, *amount);
        }

        let new_datums = tx
            .witnesses
            .datums
            .iter()
            .filter(|datum| self.insert_datum((*datum).clone()))
            .count();

        debug!(
            tx = %tx_id.short_hex(),
            consumed = consumed.len(),
            produced = produced.len(),
            new_datums,
            "transaction applied"
        );

        Ok(AppliedTx {
            tx_id,
            consumed,
            produced,
            new_datums,
        })
    }
}
