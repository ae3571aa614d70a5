//! Foundation types for the UTxO ledger emulator.
//!
//! This crate provides the identity, value, and structural types used
//! throughout the emulator. Every other crate in the workspace depends on
//! `utxo-types`.
//!
//! # Key Types
//!
//! - [`TxId`]: BLAKE3 hash of an encoded transaction body
//! - [`TxOutRef`]: `(tx id, output index)` key of an unspent output
//! - [`Address`] / [`RewardAccount`]: canonical string forms of payment and stake credentials
//! - [`Value`]: base-currency coin plus an optional multi-asset bundle
//! - [`TxOutput`] / [`Utxo`]: resolved output payloads
//! - [`Transaction`]: body, witness set, and auxiliary data
//! - [`ProtocolParameters`] / [`GenesisInfo`]: chain configuration
//! - [`ChainTip`]: summary of the most recently produced block

pub mod address;
pub mod error;
pub mod hash;
pub mod ids;
pub mod output;
pub mod params;
pub mod tip;
pub mod tx;
pub mod value;

pub use address::{Address, PoolId, RewardAccount};
pub use error::TypeError;
pub use hash::ContentHasher;
pub use ids::{DatumHash, TxId, TxOutRef};
pub use output::{Datum, DatumOption, ScriptRef, TxOutput, Utxo};
pub use params::{GenesisInfo, ProtocolParameters};
pub use tip::ChainTip;
pub use tx::{Transaction, TxBody, WitnessSet};
pub use value::{MultiAsset, Value};
