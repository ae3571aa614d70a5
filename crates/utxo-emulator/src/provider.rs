use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utxo_types::{
    Address, ChainTip, Datum, DatumHash, GenesisInfo, ProtocolParameters, Transaction, TxId,
    TxOutRef, Utxo,
};

use crate::error::{ProviderError, ProviderResult};

/// A transaction handed to [`LedgerProvider::submit_tx`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxSubmission {
    Transaction(Transaction),
    /// Encoded bytes, as produced by [`Transaction::to_bytes`].
    Encoded(Vec<u8>),
}

impl TxSubmission {
    /// Decode if necessary. Malformed bytes are a [`ProviderError::Decode`].
    pub fn into_transaction(self) -> ProviderResult<Transaction> {
        match self {
            Self::Transaction(tx) => Ok(tx),
            Self::Encoded(bytes) => Transaction::from_bytes(&bytes).map_err(ProviderError::Decode),
        }
    }
}

impl From<Transaction> for TxSubmission {
    fn from(tx: Transaction) -> Self {
        Self::Transaction(tx)
    }
}

impl From<Vec<u8>> for TxSubmission {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Encoded(bytes)
    }
}

/// A datum found by hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDatum {
    pub hash: DatumHash,
    pub datum: Datum,
}

/// Chain-query and submission interface used by transaction builders.
///
/// Network-backed providers implement the same trait; the in-process
/// emulator resolves every call immediately.
#[async_trait]
pub trait LedgerProvider: Send + Sync {
    async fn protocol_parameters(&self) -> ProviderResult<ProtocolParameters>;

    async fn genesis_info(&self) -> ProviderResult<GenesisInfo>;

    async fn chain_tip(&self) -> ProviderResult<ChainTip>;

    /// Live UTxOs among `refs`; unknown or spent references are omitted.
    async fn resolve_utxos(&self, refs: &[TxOutRef]) -> ProviderResult<Vec<Utxo>>;

    async fn resolve_utxos_by_address(&self, address: &Address) -> ProviderResult<Vec<Utxo>>;

    /// Recorded datums among `hashes`; missing hashes are omitted.
    async fn resolve_datum_hashes(&self, hashes: &[DatumHash]) -> ProviderResult<Vec<ResolvedDatum>>;

    /// Submit a transaction, returning its id.
    ///
    /// The id is returned whether or not the transaction was admitted.
    async fn submit_tx(&mut self, submission: TxSubmission) -> ProviderResult<TxId>;
}
