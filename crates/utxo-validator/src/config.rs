use serde::{Deserialize, Serialize};

/// Configuration for the transaction validator.
///
/// Both checks default to advisory: a transaction with no inputs or a fee
/// below the protocol minimum is reported but still accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Reject transactions whose fee is below the protocol minimum.
    pub enforce_min_fee: bool,
    /// Reject transactions that consume no inputs.
    pub require_inputs: bool,
}

impl ValidatorConfig {
    /// Both advisories promoted to rejections.
    pub fn strict() -> Self {
        Self {
            enforce_min_fee: true,
            require_inputs: true,
        }
    }
}
