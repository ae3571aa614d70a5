use utxo_types::Transaction;

use crate::error::ValidatorError;
use crate::stage::{Rejection, StageDecision, ValidationContext, ValidationStage};

/// Base-currency conservation: inputs == outputs + fee, exactly.
///
/// Inputs are summed per occurrence, so a duplicated reference counts twice
/// here and is rejected by the later duplicate check. Native assets are not
/// balanced.
pub struct BalanceStage;

impl ValidationStage for BalanceStage {
    fn name(&self) -> &str {
        "balance"
    }

    fn evaluate(
        &self,
        tx: &Transaction,
        context: &ValidationContext<'_>,
    ) -> Result<StageDecision, ValidatorError> {
        let mut inputs: u128 = 0;
        for out_ref in &tx.body.inputs {
            let Some(output) = context.ledger.utxo(out_ref) else {
                return Ok(StageDecision::Fail(Rejection::MissingInput {
                    out_ref: *out_ref,
                }));
            };
            inputs += u128::from(output.coin());
        }

        let outputs = tx.output_coin();
        let fee = tx.body.fee;
        if inputs == outputs + u128::from(fee) {
            Ok(StageDecision::Pass)
        } else {
            Ok(StageDecision::Fail(Rejection::Unbalanced {
                inputs,
                outputs,
                fee,
            }))
        }
    }
}
