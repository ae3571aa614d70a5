use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::address::RewardAccount;
use crate::error::TypeError;
use crate::hash::ContentHasher;
use crate::ids::{TxId, TxOutRef};
use crate::output::{Datum, TxOutput};

/// Body of a transaction: everything covered by the transaction id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxBody {
    /// Outputs consumed by this transaction, in declaration order.
    pub inputs: Vec<TxOutRef>,
    /// Outputs created; output `i` becomes `(tx id, i)`.
    pub outputs: Vec<TxOutput>,
    pub fee: u64,
    /// First slot at which the transaction is valid.
    #[serde(default)]
    pub validity_start: Option<u64>,
    /// Last slot at which the transaction is valid.
    #[serde(default)]
    pub ttl: Option<u64>,
    #[serde(default)]
    pub withdrawals: BTreeMap<RewardAccount, u64>,
}

/// Witnesses carried alongside the body.
///
/// Key witnesses and redeemers are checked by external collaborators; the
/// emulator only records datums.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessSet {
    #[serde(default)]
    pub datums: Vec<Datum>,
}

/// A complete transaction as submitted to the emulator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub body: TxBody,
    #[serde(default)]
    pub witnesses: WitnessSet,
    /// Opaque auxiliary data (metadata). Counts toward the serialized size
    /// but not toward the transaction id.
    #[serde(default)]
    pub auxiliary_data: Option<Vec<u8>>,
}

impl Transaction {
    pub fn new(body: TxBody) -> Self {
        Self {
            body,
            witnesses: WitnessSet::default(),
            auxiliary_data: None,
        }
    }

    /// Identifier of this transaction: the hash of its encoded body.
    pub fn id(&self) -> Result<TxId, TypeError> {
        let encoded =
            bincode::serialize(&self.body).map_err(|e| TypeError::Encoding(e.to_string()))?;
        Ok(TxId::from_hash(ContentHasher::TX_BODY.hash(&encoded)))
    }

    /// Length in bytes of the encoded transaction.
    pub fn serialized_size(&self) -> Result<u64, TypeError> {
        bincode::serialized_size(self).map_err(|e| TypeError::Encoding(e.to_string()))
    }

    /// Encode the whole transaction.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TypeError> {
        bincode::serialize(self).map_err(|e| TypeError::Encoding(e.to_string()))
    }

    /// Decode a transaction previously produced by [`Self::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
        bincode::deserialize(bytes).map_err(|e| TypeError::Encoding(e.to_string()))
    }

    /// Sum of base currency over all outputs.
    pub fn output_coin(&self) -> u128 {
        self.body.outputs.iter().map(|o| u128::from(o.value.coin)).sum()
    }

    pub fn with_datum_witness(mut self, datum: Datum) -> Self {
        self.witnesses.datums.push(datum);
        self
    }

    pub fn with_auxiliary_data(mut self, data: Vec<u8>) -> Self {
        self.auxiliary_data = Some(data);
        self
    }
}
