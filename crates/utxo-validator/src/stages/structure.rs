use utxo_types::Transaction;

use crate::error::ValidatorError;
use crate::stage::{Rejection, StageDecision, ValidationContext, ValidationStage};

/// Structural well-formedness.
///
/// Output indices must fit in `u32`, and every output address and withdrawal
/// account must be non-empty.
pub struct StructureStage;

impl ValidationStage for StructureStage {
    fn name(&self) -> &str {
        "structure"
    }

    fn evaluate(
        &self,
        tx: &Transaction,
        _context: &ValidationContext<'_>,
    ) -> Result<StageDecision, ValidatorError> {
        let count = tx.body.outputs.len();
        if u32::try_from(count).is_err() {
            return Ok(StageDecision::Fail(Rejection::TooManyOutputs { count }));
        }

        if let Some(index) = tx.body.outputs.iter().position(|o| o.address.is_empty()) {
            return Ok(StageDecision::Fail(Rejection::EmptyAddress { index }));
        }

        if tx.body.withdrawals.keys().any(|account| account.is_empty()) {
            return Ok(StageDecision::Fail(Rejection::EmptyRewardAccount));
        }

        Ok(StageDecision::Pass)
    }
}
