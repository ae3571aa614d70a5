use tracing::{debug, warn};
use utxo_ledger::LedgerReader;
use utxo_types::{ProtocolParameters, Transaction, TxId};

use crate::config::ValidatorConfig;
use crate::error::ValidatorError;
use crate::stage::{Advisory, Rejection, StageDecision, StageResult, ValidationContext, ValidationStage};
use crate::stages::{
    BalanceStage, DuplicateInputsStage, EmptyInputsStage, InputsExistStage, MinFeeStage,
    StructureStage, TxSizeStage, ValidityIntervalStage,
};

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

// ---------------------------------------------------------------------------
// ValidationReport
// ---------------------------------------------------------------------------

/// The outcome of running a transaction through the full pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub tx_id: TxId,
    /// Serialized size of the transaction, in bytes.
    pub tx_size: u64,
    pub verdict: Verdict,
    /// Per-stage results in evaluation order, up to and including the first
    /// failing stage.
    pub stage_results: Vec<StageResult>,
    pub advisories: Vec<Advisory>,
}

impl ValidationReport {
    pub fn is_accepted(&self) -> bool {
        matches!(self.verdict, Verdict::Accepted)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match &self.verdict {
            Verdict::Accepted => None,
            Verdict::Rejected(rejection) => Some(rejection),
        }
    }
}

// ---------------------------------------------------------------------------
// TxValidator
// ---------------------------------------------------------------------------

/// An ordered, fail-fast pipeline of validation stages.
///
/// The validator holds no ledger state; every call is a pure function of the
/// transaction, the ledger view, the protocol parameters and the slot.
pub struct TxValidator {
    stages: Vec<Box<dyn ValidationStage>>,
    config: ValidatorConfig,
}

impl TxValidator {
    /// An empty pipeline. Use [`Self::add_stage`] or
    /// [`Self::with_default_stages`].
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
    }

    /// The standard pipeline:
    /// structure -> inputs-exist -> balance -> empty-inputs ->
    /// duplicate-inputs -> size -> min-fee -> validity-interval
    pub fn with_default_stages(config: ValidatorConfig) -> Self {
        let mut validator = Self::new(config);
        let require_inputs = validator.config.require_inputs;
        let enforce_min_fee = validator.config.enforce_min_fee;
        validator.add_stage(Box::new(StructureStage));
        validator.add_stage(Box::new(InputsExistStage));
        validator.add_stage(Box::new(BalanceStage));
        validator.add_stage(Box::new(EmptyInputsStage {
            strict: require_inputs,
        }));
        validator.add_stage(Box::new(DuplicateInputsStage));
        validator.add_stage(Box::new(TxSizeStage));
        validator.add_stage(Box::new(MinFeeStage {
            strict: enforce_min_fee,
        }));
        validator.add_stage(Box::new(ValidityIntervalStage));
        validator
    }

    pub fn add_stage(&mut self, stage: Box<dyn ValidationStage>) {
        self.stages.push(stage);
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Run `tx` through the pipeline against `ledger` at `slot`.
    ///
    /// A rejection is reported in the returned [`ValidationReport`]; `Err` is
    /// reserved for failures that prevent reaching a verdict.
    pub fn validate(
        &self,
        tx: &Transaction,
        ledger: &dyn LedgerReader,
        params: &ProtocolParameters,
        slot: u64,
    ) -> Result<ValidationReport, ValidatorError> {
        let context = ValidationContext {
            ledger,
            params,
            slot,
            tx_id: tx.id()?,
            tx_size: tx.serialized_size()?,
        };

        let mut stage_results = Vec::with_capacity(self.stages.len());
        let mut advisories = Vec::new();

        for stage in &self.stages {
            let decision = stage.evaluate(tx, &context)?;
            let (passed, note) = match &decision {
                StageDecision::Pass => (true, None),
                StageDecision::Advisory(advisory) => (true, Some(advisory.to_string())),
                StageDecision::Fail(rejection) => (false, Some(rejection.to_string())),
            };
            stage_results.push(StageResult {
                stage_name: stage.name().to_string(),
                passed,
                note,
            });

            match decision {
                StageDecision::Pass => {}
                StageDecision::Advisory(advisory) => {
                    warn!(tx = %context.tx_id.short_hex(), stage = stage.name(), %advisory, "validation advisory");
                    advisories.push(advisory);
                }
                StageDecision::Fail(rejection) => {
                    debug!(tx = %context.tx_id.short_hex(), stage = stage.name(), %rejection, "transaction rejected");
                    return Ok(ValidationReport {
                        tx_id: context.tx_id,
                        tx_size: context.tx_size,
                        verdict: Verdict::Rejected(rejection),
                        stage_results,
                        advisories,
                    });
                }
            }
        }

        Ok(ValidationReport {
            tx_id: context.tx_id,
            tx_size: context.tx_size,
            verdict: Verdict::Accepted,
            stage_results,
            advisories,
        })
    }
}
