//! In-process UTxO ledger emulator.
//!
//! An [`Emulator`] owns a ledger, a FIFO mempool, a transaction validator and
//! a block producer. Clients submit transactions, which are validated against
//! the current ledger and queued; [`Emulator::advance_blocks`] moves the
//! simulated clock forward and applies queued transactions in size-bounded
//! blocks. The same operations are available through the async
//! [`LedgerProvider`] trait so that client code written against a real chain
//! provider runs unchanged.
//!
//! # Quick Start
//!
//! ```rust
//! use utxo_emulator::{Emulator, EmulatorConfig, InitialUtxo};
//! use utxo_types::{Transaction, TxBody, TxOutput, Value};
//!
//! let config = EmulatorConfig::default().with_initial_utxo("addr_a", Value::coin(100));
//! let funding = InitialUtxo::new("addr_a", Value::coin(100)).resolve_out_ref(0);
//! let mut emulator = Emulator::new(config);
//!
//! let tx = Transaction::new(TxBody {
//!     inputs: vec![funding],
//!     outputs: vec![TxOutput::new("addr_b", Value::coin(99))],
//!     fee: 1,
//!     ..Default::default()
//! });
//! assert!(emulator.submit(tx).unwrap().accepted);
//!
//! emulator.advance_blocks(1).unwrap();
//! assert_eq!(emulator.chain_tip().tx_count, 1);
//! ```

pub mod config;
pub mod emulator;
pub mod error;
pub mod mempool;
pub mod producer;
pub mod provider;

pub use config::{genesis_tx_id, EmulatorConfig, InitialStakeAccount, InitialUtxo};
pub use emulator::{Emulator, SubmitReceipt};
pub use error::{ConfigError, EmulatorError, EmulatorResult, ProviderError, ProviderResult};
pub use mempool::{Mempool, MempoolEntry};
pub use producer::{AdvanceReport, BlockInputs, BlockProducer, ChainClock, DropReason, DroppedTx};
pub use provider::{LedgerProvider, ResolvedDatum, TxSubmission};
