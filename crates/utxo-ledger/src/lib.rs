//! Ledger state for the UTxO ledger emulator.
//!
//! This crate owns everything a block mutates. It provides:
//! - `LedgerState`: the unspent-output set with its address index, the stake
//!   account table, and the append-only datum table
//! - `LedgerReader` / `LedgerWriter` trait boundaries
//! - Transaction application (consume inputs, create outputs, withdrawals,
//!   datum witnesses)
//! - Address-index auditing (`IndexAuditor`)

pub mod audit;
pub mod error;
pub mod stake;
pub mod state;
pub mod traits;

pub use audit::{AuditReport, IndexAuditor, IndexViolation, ViolationKind};
pub use error::LedgerError;
pub use stake::StakeAccount;
pub use state::{AppliedTx, LedgerState};
pub use traits::{LedgerReader, LedgerWriter};
