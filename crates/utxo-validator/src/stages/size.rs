use utxo_types::Transaction;

use crate::error::ValidatorError;
use crate::stage::{Advisory, Rejection, StageDecision, ValidationContext, ValidationStage};

/// Serialized size must not exceed `max_tx_size`.
pub struct TxSizeStage;

impl ValidationStage for TxSizeStage {
    fn name(&self) -> &str {
        "size"
    }

    fn evaluate(
        &self,
        _tx: &Transaction,
        context: &ValidationContext<'_>,
    ) -> Result<StageDecision, ValidatorError> {
        let max = context.params.max_tx_size;
        if context.tx_size > max {
            Ok(StageDecision::Fail(Rejection::TooLarge {
                size: context.tx_size,
                max,
            }))
        } else {
            Ok(StageDecision::Pass)
        }
    }
}

/// Fee against `tx_fee_per_byte * size + tx_fee_fixed`. Advisory unless
/// `strict`.
pub struct MinFeeStage {
    pub strict: bool,
}

impl ValidationStage for MinFeeStage {
    fn name(&self) -> &str {
        "min-fee"
    }

    fn evaluate(
        &self,
        tx: &Transaction,
        context: &ValidationContext<'_>,
    ) -> Result<StageDecision, ValidatorError> {
        let required = context.params.min_fee(context.tx_size);
        let provided = tx.body.fee;
        if provided >= required {
            return Ok(StageDecision::Pass);
        }
        if self.strict {
            Ok(StageDecision::Fail(Rejection::FeeTooLow { provided, required }))
        } else {
            Ok(StageDecision::Advisory(Advisory::FeeBelowMinimum {
                provided,
                required,
            }))
        }
    }
}
