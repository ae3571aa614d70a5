//! Transaction validation for the UTxO ledger emulator.
//!
//! Every transaction is checked by an ordered, fail-fast pipeline of stages
//! before it may enter the mempool, and again when a block applies it. The
//! validator never mutates the ledger; it sees it only through
//! [`utxo_ledger::LedgerReader`].
//!
//! # Quick Start
//!
//! ```rust
//! use utxo_ledger::{LedgerState, LedgerWriter};
//! use utxo_types::{ProtocolParameters, Transaction, TxBody, TxId, TxOutRef, TxOutput, Value};
//! use utxo_validator::{TxValidator, ValidatorConfig};
//!
//! let mut ledger = LedgerState::new();
//! let funding = TxOutRef::new(TxId::from_hash([1; 32]), 0);
//! ledger.insert(funding, TxOutput::new("addr_a", Value::coin(100)));
//!
//! let tx = Transaction::new(TxBody {
//!     inputs: vec![funding],
//!     outputs: vec![TxOutput::new("addr_b", Value::coin(99))],
//!     fee: 1,
//!     ..Default::default()
//! });
//!
//! let validator = TxValidator::with_default_stages(ValidatorConfig::default());
//! let report = validator
//!     .validate(&tx, &ledger, &ProtocolParameters::default(), 0)
//!     .unwrap();
//! assert!(report.is_accepted());
//! ```

pub mod config;
pub mod error;
pub mod stage;
pub mod stages;
pub mod validator;

pub use config::ValidatorConfig;
pub use error::ValidatorError;
pub use stage::{
    Advisory, Rejection, StageDecision, StageResult, ValidationContext, ValidationStage,
};
pub use validator::{TxValidator, ValidationReport, Verdict};

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use utxo_ledger::{LedgerState, LedgerWriter};
    use utxo_types::{
        Address, ProtocolParameters, Transaction, TxBody, TxId, TxOutRef, TxOutput, Value,
    };

    use super::*;

    /// Zero fees so balanced transactions are easy to build.
    fn free_params() -> ProtocolParameters {
        ProtocolParameters {
            max_tx_size: 800,
            max_block_body_size: 1_000,
            tx_fee_per_byte: 0,
            tx_fee_fixed: 0,
        }
    }

    fn funding(seed: u8) -> TxOutRef {
        TxOutRef::new(TxId::from_hash([seed; 32]), 0)
    }

    fn ledger_with(coins: &[(u8, u64)]) -> LedgerState {
        let mut ledger = LedgerState::new();
        for (seed, coin) in coins {
            ledger.insert(funding(*seed), TxOutput::new("addr_a", Value::coin(*coin)));
        }
        ledger
    }

    fn spend(inputs: Vec<TxOutRef>, outputs: Vec<(&str, u64)>, fee: u64) -> Transaction {
        Transaction::new(TxBody {
            inputs,
            outputs: outputs
                .into_iter()
                .map(|(address, coin)| TxOutput::new(address, Value::coin(coin)))
                .collect(),
            fee,
            ..Default::default()
        })
    }

    fn validate(tx: &Transaction, ledger: &LedgerState, slot: u64) -> ValidationReport {
        TxValidator::with_default_stages(ValidatorConfig::default())
            .validate(tx, ledger, &free_params(), slot)
            .unwrap()
    }

    // -----------------------------------------------------------------------
    // 1. Balanced spend of a live output is accepted by every stage
    // -----------------------------------------------------------------------
    #[test]
    fn balanced_spend_is_accepted() {
        let ledger = ledger_with(&[(1, 100)]);
        let tx = spend(vec![funding(1)], vec![("addr_b", 40), ("addr_a", 59)], 1);
        let report = validate(&tx, &ledger, 0);

        assert!(report.is_accepted());
        assert_eq!(report.tx_id, tx.id().unwrap());
        assert_eq!(report.tx_size, tx.serialized_size().unwrap());
        assert_eq!(report.stage_results.len(), 8);
        assert!(report.stage_results.iter().all(|r| r.passed));
        assert!(report.advisories.is_empty());
    }

    // -----------------------------------------------------------------------
    // 2. Structure
    // -----------------------------------------------------------------------
    #[test]
    fn empty_output_address_is_malformed() {
        let ledger = ledger_with(&[(1, 10)]);
        let tx = spend(vec![funding(1)], vec![("addr_b", 5), ("  ", 5)], 0);
        let report = validate(&tx, &ledger, 0);

        assert_eq!(report.rejection(), Some(&Rejection::EmptyAddress { index: 1 }));
        assert_eq!(report.stage_results.len(), 1);
    }

    #[test]
    fn empty_withdrawal_account_is_malformed() {
        let ledger = ledger_with(&[(1, 10)]);
        let mut tx = spend(vec![funding(1)], vec![("addr_b", 10)], 0);
        tx.body.withdrawals = BTreeMap::from([("".into(), 0)]);
        let report = validate(&tx, &ledger, 0);
        assert_eq!(report.rejection(), Some(&Rejection::EmptyRewardAccount));
    }

    // -----------------------------------------------------------------------
    // 3. Inputs and balance
    // -----------------------------------------------------------------------
    #[test]
    fn unknown_input_is_rejected_before_balance() {
        let ledger = ledger_with(&[(1, 10)]);
        let tx = spend(vec![funding(1), funding(9)], vec![("addr_b", 10)], 0);
        let report = validate(&tx, &ledger, 0);

        assert_eq!(
            report.rejection(),
            Some(&Rejection::MissingInput { out_ref: funding(9) })
        );
        assert_eq!(report.stage_results.last().unwrap().stage_name, "inputs-exist");
    }

    #[test]
    fn unbalanced_is_rejected() {
        let ledger = ledger_with(&[(1, 100)]);
        let tx = spend(vec![funding(1)], vec![("addr_b", 100)], 1);
        let report = validate(&tx, &ledger, 0);
        assert!(matches!(
            report.rejection(),
            Some(Rejection::Unbalanced { inputs: 100, outputs: 100, fee: 1 })
        ));
    }

    #[test]
    fn duplicate_input_rejected_after_balance() {
        let ledger = ledger_with(&[(1, 50)]);
        let tx = spend(vec![funding(1), funding(1)], vec![("addr_b", 100)], 0);
        let report = validate(&tx, &ledger, 0);

        assert_eq!(
            report.rejection(),
            Some(&Rejection::DuplicateInput { out_ref: funding(1) })
        );
        assert_eq!(
            report.stage_results.last().unwrap().stage_name,
            "duplicate-inputs"
        );
    }

    // -----------------------------------------------------------------------
    // 4. Advisories
    // -----------------------------------------------------------------------
    #[test]
    fn empty_inputs_is_advisory_by_default() {
        let ledger = LedgerState::new();
        let tx = spend(vec![], vec![], 0);
        let report = validate(&tx, &ledger, 0);

        assert!(report.is_accepted());
        assert_eq!(report.advisories, vec![Advisory::EmptyInputs]);
    }

    #[test]
    fn require_inputs_promotes_advisory() {
        let ledger = LedgerState::new();
        let tx = spend(vec![], vec![], 0);
        let validator = TxValidator::with_default_stages(ValidatorConfig {
            require_inputs: true,
            ..Default::default()
        });
        let report = validator.validate(&tx, &ledger, &free_params(), 0).unwrap();
        assert_eq!(report.rejection(), Some(&Rejection::NoInputs));
    }

    #[test]
    fn low_fee_is_advisory_by_default() {
        let ledger = ledger_with(&[(1, 100)]);
        let tx = spend(vec![funding(1)], vec![("addr_b", 99)], 1);
        let params = ProtocolParameters::default();
        let size = tx.serialized_size().unwrap();

        let report = TxValidator::with_default_stages(ValidatorConfig::default())
            .validate(&tx, &ledger, &params, 0)
            .unwrap();
        assert!(report.is_accepted());
        assert_eq!(
            report.advisories,
            vec![Advisory::FeeBelowMinimum {
                provided: 1,
                required: params.min_fee(size),
            }]
        );

        let strict = TxValidator::with_default_stages(ValidatorConfig::strict())
            .validate(&tx, &ledger, &params, 0)
            .unwrap();
        assert!(matches!(strict.rejection(), Some(Rejection::FeeTooLow { provided: 1, .. })));
    }

    // -----------------------------------------------------------------------
    // 5. Size
    // -----------------------------------------------------------------------
    #[test]
    fn oversized_transaction_is_rejected() {
        let ledger = ledger_with(&[(1, 10)]);
        let base = spend(vec![funding(1)], vec![("addr_b", 10)], 0).with_auxiliary_data(Vec::new());
        let base_size = base.serialized_size().unwrap();

        let at_limit = base
            .clone()
            .with_auxiliary_data(vec![0; (800 - base_size) as usize]);
        assert_eq!(at_limit.serialized_size().unwrap(), 800);
        assert!(validate(&at_limit, &ledger, 0).is_accepted());

        let over = base.with_auxiliary_data(vec![0; (801 - base_size) as usize]);
        assert_eq!(
            validate(&over, &ledger, 0).rejection(),
            Some(&Rejection::TooLarge { size: 801, max: 800 })
        );
    }

    // -----------------------------------------------------------------------
    // 6. Validity interval
    // -----------------------------------------------------------------------
    #[test]
    fn validity_interval_bounds_are_inclusive() {
        let ledger = ledger_with(&[(1, 10)]);
        let mut tx = spend(vec![funding(1)], vec![("addr_b", 10)], 0);
        tx.body.validity_start = Some(10);
        tx.body.ttl = Some(20);

        assert_eq!(
            validate(&tx, &ledger, 9).rejection(),
            Some(&Rejection::NotYetValid { slot: 9, start: 10 })
        );
        assert!(validate(&tx, &ledger, 10).is_accepted());
        assert!(validate(&tx, &ledger, 20).is_accepted());
        assert_eq!(
            validate(&tx, &ledger, 21).rejection(),
            Some(&Rejection::Expired { slot: 21, ttl: 20 })
        );
    }

    // -----------------------------------------------------------------------
    // 7. Determinism and custom stages
    // -----------------------------------------------------------------------
    #[test]
    fn validation_is_deterministic() {
        let ledger = ledger_with(&[(1, 100)]);
        let tx = spend(vec![funding(1)], vec![("addr_b", 100)], 0);
        assert_eq!(validate(&tx, &ledger, 5), validate(&tx, &ledger, 5));
    }

    struct DenyAddress(Address);

    impl ValidationStage for DenyAddress {
        fn name(&self) -> &str {
            "deny-address"
        }

        fn evaluate(
            &self,
            tx: &Transaction,
            _context: &ValidationContext<'_>,
        ) -> Result<StageDecision, ValidatorError> {
            if tx.body.outputs.iter().any(|o| o.address == self.0) {
                return Err(ValidatorError::stage(self.name(), format!("{} is denied", self.0)));
            }
            Ok(StageDecision::Pass)
        }
    }

    #[test]
    fn stage_errors_propagate() {
        let ledger = ledger_with(&[(1, 10)]);
        let mut validator = TxValidator::with_default_stages(ValidatorConfig::default());
        validator.add_stage(Box::new(DenyAddress("addr_x".into())));
        assert_eq!(validator.stage_count(), 9);

        let tx = spend(vec![funding(1)], vec![("addr_x", 10)], 0);
        let err = validator.validate(&tx, &ledger, &free_params(), 0).unwrap_err();
        assert!(matches!(err, ValidatorError::Stage { ref stage, .. } if stage == "deny-address"));
    }
}
