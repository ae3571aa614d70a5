use utxo_types::TypeError;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("address index violation: {0}")]
    IndexViolation(String),

    #[error("transaction has {count} outputs; output indices are limited to u32")]
    TooManyOutputs { count: usize },

    #[error("encoding error: {0}")]
    Encoding(#[from] TypeError),
}
