use std::path::Path;

use serde::{Deserialize, Serialize};
use utxo_types::{
    Address, ContentHasher, DatumOption, GenesisInfo, PoolId, ProtocolParameters, RewardAccount,
    ScriptRef, TxId, TxOutRef, TxOutput, Value,
};
use utxo_validator::ValidatorConfig;

use crate::error::ConfigError;

/// Pseudo transaction id under which configured initial UTxOs are created.
pub fn genesis_tx_id() -> TxId {
    TxId::from_hash(ContentHasher::GENESIS.hash(b"initial-utxos"))
}

/// An output present before the first block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialUtxo {
    /// Explicit reference. When absent the output is placed at
    /// `(genesis_tx_id(), position)`.
    #[serde(default)]
    pub out_ref: Option<TxOutRef>,
    pub address: Address,
    pub value: Value,
    #[serde(default)]
    pub datum: Option<DatumOption>,
    #[serde(default)]
    pub script_ref: Option<ScriptRef>,
}

impl InitialUtxo {
    pub fn new(address: impl Into<Address>, value: Value) -> Self {
        Self {
            out_ref: None,
            address: address.into(),
            value,
            datum: None,
            script_ref: None,
        }
    }

    pub fn at(mut self, out_ref: TxOutRef) -> Self {
        self.out_ref = Some(out_ref);
        self
    }

    /// Reference this output is created under, given its list position.
    pub fn resolve_out_ref(&self, position: u32) -> TxOutRef {
        self.out_ref
            .unwrap_or_else(|| TxOutRef::new(genesis_tx_id(), position))
    }

    pub fn to_output(&self) -> TxOutput {
        TxOutput {
            address: self.address.clone(),
            value: self.value.clone(),
            datum: self.datum.clone(),
            script_ref: self.script_ref.clone(),
        }
    }
}

fn registered_default() -> bool {
    true
}

/// A stake account present before the first block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialStakeAccount {
    pub account: RewardAccount,
    #[serde(default = "registered_default")]
    pub registered: bool,
    #[serde(default)]
    pub delegated_pool: Option<PoolId>,
    #[serde(default)]
    pub rewards: u64,
}

impl InitialStakeAccount {
    pub fn new(account: impl Into<RewardAccount>, rewards: u64) -> Self {
        Self {
            account: account.into(),
            registered: true,
            delegated_pool: None,
            rewards,
        }
    }
}

/// Construction-time configuration for an [`crate::Emulator`].
///
/// Every section is optional in TOML and falls back to mainnet-like
/// defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorConfig {
    /// Diagnostic verbosity: 0 warn, 1 info, 2 and above debug. Never
    /// changes behaviour.
    pub verbosity: u8,
    pub genesis: GenesisInfo,
    pub protocol_parameters: ProtocolParameters,
    pub validator: ValidatorConfig,
    pub initial_utxos: Vec<InitialUtxo>,
    pub stake_accounts: Vec<InitialStakeAccount>,
}

impl EmulatorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn with_initial_utxo(mut self, address: impl Into<Address>, value: Value) -> Self {
        self.initial_utxos.push(InitialUtxo::new(address, value));
        self
    }

    pub fn with_stake_account(mut self, account: InitialStakeAccount) -> Self {
        self.stake_accounts.push(account);
        self
    }

    pub fn with_protocol_parameters(mut self, params: ProtocolParameters) -> Self {
        self.protocol_parameters = params;
        self
    }

    pub fn with_genesis(mut self, genesis: GenesisInfo) -> Self {
        self.genesis = genesis;
        self
    }

    pub fn with_validator(mut self, validator: ValidatorConfig) -> Self {
        self.validator = validator;
        self
    }
}
