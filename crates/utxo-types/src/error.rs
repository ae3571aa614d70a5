use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid output reference `{0}`: expected `<txid>#<index>`")]
    InvalidOutRef(String),

    #[error("encoding error: {0}")]
    Encoding(String),
}
