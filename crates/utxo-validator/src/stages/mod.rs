//! Built-in validation stages, in pipeline order.

pub mod balance;
pub mod inputs;
pub mod interval;
pub mod size;
pub mod structure;

pub use balance::BalanceStage;
pub use inputs::{DuplicateInputsStage, EmptyInputsStage, InputsExistStage};
pub use interval::ValidityIntervalStage;
pub use size::{MinFeeStage, TxSizeStage};
pub use structure::StructureStage;
