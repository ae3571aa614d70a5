use serde::Serialize;
use utxo_ledger::LedgerReader;
use utxo_types::{ProtocolParameters, Transaction, TxId, TxOutRef};

use crate::error::ValidatorError;

// ---------------------------------------------------------------------------
// Rejection
// ---------------------------------------------------------------------------

/// Why a transaction was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    #[error("transaction has {count} outputs; output indices are limited to u32")]
    TooManyOutputs { count: usize },

    #[error("output {index} has an empty address")]
    EmptyAddress { index: usize },

    #[error("withdrawal names an empty reward account")]
    EmptyRewardAccount,

    #[error("input {out_ref} does not reference a live output")]
    MissingInput { out_ref: TxOutRef },

    #[error("unbalanced: inputs {inputs} != outputs {outputs} + fee {fee}")]
    Unbalanced { inputs: u128, outputs: u128, fee: u64 },

    #[error("transaction consumes no inputs")]
    NoInputs,

    #[error("input {out_ref} is spent more than once")]
    DuplicateInput { out_ref: TxOutRef },

    #[error("serialized size {size} exceeds the maximum of {max} bytes")]
    TooLarge { size: u64, max: u64 },

    #[error("fee {provided} is below the minimum of {required}")]
    FeeTooLow { provided: u64, required: u64 },

    #[error("not valid before slot {start} (current slot {slot})")]
    NotYetValid { slot: u64, start: u64 },

    #[error("expired at slot {ttl} (current slot {slot})")]
    Expired { slot: u64, ttl: u64 },
}

// ---------------------------------------------------------------------------
// Advisory
// ---------------------------------------------------------------------------

/// A finding that is reported but does not change the verdict.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    #[error("transaction consumes no inputs")]
    EmptyInputs,

    #[error("fee {provided} is below the minimum of {required}")]
    FeeBelowMinimum { provided: u64, required: u64 },
}

// ---------------------------------------------------------------------------
// StageDecision
// ---------------------------------------------------------------------------

/// The outcome of a single stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageDecision {
    /// Proceed to the next stage.
    Pass,
    /// Proceed, recording the advisory.
    Advisory(Advisory),
    /// Stop; the transaction is rejected.
    Fail(Rejection),
}

impl StageDecision {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }
}

// ---------------------------------------------------------------------------
// StageResult
// ---------------------------------------------------------------------------

/// Recorded result of one stage in a validation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StageResult {
    pub stage_name: String,
    pub passed: bool,
    /// Rejection or advisory text, if any.
    pub note: Option<String>,
}

// ---------------------------------------------------------------------------
// ValidationContext
// ---------------------------------------------------------------------------

/// Everything a stage may consult besides the transaction itself.
pub struct ValidationContext<'a> {
    /// Read-only view of the ledger the transaction is checked against.
    pub ledger: &'a dyn LedgerReader,
    pub params: &'a ProtocolParameters,
    /// Slot at which validity is judged.
    pub slot: u64,
    pub tx_id: TxId,
    /// Serialized size of the whole transaction, in bytes.
    pub tx_size: u64,
}

// ---------------------------------------------------------------------------
// ValidationStage trait
// ---------------------------------------------------------------------------

/// A single check in the validation pipeline.
///
/// Stages are pure: the same transaction and context always produce the same
/// decision. The trait is object-safe so stages can live in a
/// `Vec<Box<dyn ValidationStage>>`.
pub trait ValidationStage: Send + Sync {
    fn name(&self) -> &str;

    fn evaluate(
        &self,
        tx: &Transaction,
        context: &ValidationContext<'_>,
    ) -> Result<StageDecision, ValidatorError>;
}
