use serde::{Deserialize, Serialize};

/// Summary of the most recently produced block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainTip {
    /// POSIX time of the block, in milliseconds.
    pub time_ms: u64,
    pub slot: u64,
    pub height: u64,
    /// Number of transactions applied in the block.
    pub tx_count: u64,
    /// Combined serialized size of the applied transactions.
    pub size: u64,
    /// Total fees of the applied transactions.
    pub fees: u64,
}

impl ChainTip {
    /// A tip describing an empty block at the given position.
    pub fn empty(time_ms: u64, slot: u64, height: u64) -> Self {
        Self {
            time_ms,
            slot,
            height,
            ..Default::default()
        }
    }
}
