use serde::{Deserialize, Serialize};

/// Protocol limits and fee coefficients governing validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolParameters {
    /// Maximum serialized size of a single transaction, in bytes.
    pub max_tx_size: u64,
    /// Maximum combined serialized size of the transactions in one block.
    pub max_block_body_size: u64,
    /// Linear fee coefficient, per serialized byte.
    pub tx_fee_per_byte: u64,
    /// Constant fee component.
    pub tx_fee_fixed: u64,
}

impl Default for ProtocolParameters {
    fn default() -> Self {
        Self {
            max_tx_size: 16_384,
            max_block_body_size: 90_112,
            tx_fee_per_byte: 44,
            tx_fee_fixed: 155_381,
        }
    }
}

impl ProtocolParameters {
    /// Both size limits must be positive, and a transaction of the maximum
    /// size must fit in an empty block.
    pub fn is_valid(&self) -> bool {
        self.max_tx_size > 0
            && self.max_block_body_size > 0
            && self.max_tx_size <= self.max_block_body_size
    }

    /// Minimum fee for a transaction of `size` bytes:
    /// `tx_fee_per_byte * size + tx_fee_fixed`.
    pub fn min_fee(&self, size: u64) -> u64 {
        self.tx_fee_per_byte
            .saturating_mul(size)
            .saturating_add(self.tx_fee_fixed)
    }
}

/// Chain genesis information: where the simulated clock starts and how fast
/// it ticks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisInfo {
    /// POSIX time of the start slot, in milliseconds.
    pub system_start_ms: u64,
    /// Duration of one slot, in milliseconds.
    pub slot_length_ms: u64,
    /// Slot number at genesis.
    pub start_slot: u64,
}

impl Default for GenesisInfo {
    fn default() -> Self {
        Self {
            system_start_ms: 1_506_203_091_000,
            slot_length_ms: 1_000,
            start_slot: 4_492_800,
        }
    }
}

impl GenesisInfo {
    /// Slots per block is `slot_length_ms / 1000`, so the slot length must
    /// be a positive whole number of seconds.
    pub fn is_valid(&self) -> bool {
        self.slot_length_ms > 0 && self.slot_length_ms % 1_000 == 0
    }

    /// Number of slots one block advances the clock by.
    pub fn slots_per_block(&self) -> u64 {
        self.slot_length_ms / 1_000
    }

    /// POSIX time (ms) at which `slot` begins.
    pub fn slot_to_posix_ms(&self, slot: u64) -> u64 {
        slot.saturating_sub(self.start_slot)
            .saturating_mul(self.slot_length_ms)
            .saturating_add(self.system_start_ms)
    }
}
