use utxo_types::TypeError;

/// Errors that prevent the validator from reaching a verdict.
///
/// A rejected transaction is not an error; see [`crate::Rejection`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidatorError {
    /// The transaction could not be encoded to compute its id or size.
    #[error("encoding error: {0}")]
    Encoding(#[from] TypeError),

    /// A stage returned an unexpected error.
    #[error("stage error in '{stage}': {message}")]
    Stage { stage: String, message: String },
}

impl ValidatorError {
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }
}
