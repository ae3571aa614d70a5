use std::collections::HashSet;

use utxo_types::Transaction;

use crate::error::ValidatorError;
use crate::stage::{Advisory, Rejection, StageDecision, ValidationContext, ValidationStage};

/// Every input must reference a live output.
pub struct InputsExistStage;

impl ValidationStage for InputsExistStage {
    fn name(&self) -> &str {
        "inputs-exist"
    }

    fn evaluate(
        &self,
        tx: &Transaction,
        context: &ValidationContext<'_>,
    ) -> Result<StageDecision, ValidatorError> {
        match tx.body.inputs.iter().find(|r| !context.ledger.contains(r)) {
            Some(out_ref) => Ok(StageDecision::Fail(Rejection::MissingInput {
                out_ref: *out_ref,
            })),
            None => Ok(StageDecision::Pass),
        }
    }
}

/// A transaction that consumes nothing. Advisory unless `strict`.
pub struct EmptyInputsStage {
    pub strict: bool,
}

impl ValidationStage for EmptyInputsStage {
    fn name(&self) -> &str {
        "empty-inputs"
    }

    fn evaluate(
        &self,
        tx: &Transaction,
        _context: &ValidationContext<'_>,
    ) -> Result<StageDecision, ValidatorError> {
        if !tx.body.inputs.is_empty() {
            return Ok(StageDecision::Pass);
        }
        if self.strict {
            Ok(StageDecision::Fail(Rejection::NoInputs))
        } else {
            Ok(StageDecision::Advisory(Advisory::EmptyInputs))
        }
    }
}

/// No reference may be spent twice within one transaction.
pub struct DuplicateInputsStage;

impl ValidationStage for DuplicateInputsStage {
    fn name(&self) -> &str {
        "duplicate-inputs"
    }

    fn evaluate(
        &self,
        tx: &Transaction,
        _context: &ValidationContext<'_>,
    ) -> Result<StageDecision, ValidatorError> {
        let mut seen = HashSet::with_capacity(tx.body.inputs.len());
        match tx.body.inputs.iter().find(|r| !seen.insert(**r)) {
            Some(out_ref) => Ok(StageDecision::Fail(Rejection::DuplicateInput {
                out_ref: *out_ref,
            })),
            None => Ok(StageDecision::Pass),
        }
    }
}
