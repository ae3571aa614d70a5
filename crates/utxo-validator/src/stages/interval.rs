use utxo_types::Transaction;

use crate::error::ValidatorError;
use crate::stage::{Rejection, StageDecision, ValidationContext, ValidationStage};

/// The current slot must fall within `[validity_start, ttl]`, both bounds
/// inclusive and optional.
pub struct ValidityIntervalStage;

impl ValidationStage for ValidityIntervalStage {
    fn name(&self) -> &str {
        "validity-interval"
    }

    fn evaluate(
        &self,
        tx: &Transaction,
        context: &ValidationContext<'_>,
    ) -> Result<StageDecision, ValidatorError> {
        let slot = context.slot;
        if let Some(start) = tx.body.validity_start {
            if slot < start {
                return Ok(StageDecision::Fail(Rejection::NotYetValid { slot, start }));
            }
        }
        if let Some(ttl) = tx.body.ttl {
            if slot > ttl {
                return Ok(StageDecision::Fail(Rejection::Expired { slot, ttl }));
            }
        }
        Ok(StageDecision::Pass)
    }
}
