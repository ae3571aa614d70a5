use std::path::PathBuf;

use thiserror::Error;
use utxo_types::TypeError;
use utxo_validator::ValidatorError;

/// Errors from emulator operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmulatorError {
    #[error("block count must be at least 1")]
    InvalidBlockCount,

    #[error("validator error: {0}")]
    Validator(#[from] ValidatorError),

    #[error("encoding error: {0}")]
    Encoding(#[from] TypeError),
}

pub type EmulatorResult<T> = Result<T, EmulatorError>;

/// Errors surfaced through [`crate::LedgerProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Submitted bytes do not decode to a transaction.
    #[error("transaction does not decode: {0}")]
    Decode(TypeError),

    #[error(transparent)]
    Emulator(#[from] EmulatorError),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors loading or writing an [`crate::EmulatorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
