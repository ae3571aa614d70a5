use std::fmt;

use serde::Serialize;
use tracing::{debug, info};
use utxo_ledger::{LedgerState, LedgerWriter};
use utxo_types::{ChainTip, GenesisInfo, ProtocolParameters, TxId};
use utxo_validator::{Rejection, TxValidator, Verdict};

use crate::error::{EmulatorError, EmulatorResult};
use crate::mempool::{Mempool, MempoolEntry};

/// Simulated chain position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChainClock {
    /// POSIX time, in milliseconds.
    pub time_ms: u64,
    pub slot: u64,
    pub height: u64,
}

impl ChainClock {
    /// Clock at the genesis block.
    pub fn genesis(genesis: &GenesisInfo) -> Self {
        Self {
            time_ms: genesis.system_start_ms,
            slot: genesis.start_slot,
            height: 0,
        }
    }

    fn advance(&mut self, blocks: u64, genesis: &GenesisInfo) {
        self.height = self.height.saturating_add(blocks);
        self.slot = self
            .slot
            .saturating_add(blocks.saturating_mul(genesis.slots_per_block()));
        self.time_ms = self
            .time_ms
            .saturating_add(blocks.saturating_mul(genesis.slot_length_ms));
    }
}

/// Why a queued transaction was discarded during block production.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropReason {
    /// Re-validation against the ledger at the new slot failed.
    Rejected(Rejection),
    /// The validator could not reach a verdict.
    Validator(String),
    /// The ledger refused to apply the transaction.
    Apply(String),
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(rejection) => write!(f, "rejected: {rejection}"),
            Self::Validator(message) => write!(f, "validator error: {message}"),
            Self::Apply(message) => write!(f, "apply failed: {message}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DroppedTx {
    pub tx_id: TxId,
    pub reason: DropReason,
}

/// What one call to [`BlockProducer::advance`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    pub blocks_requested: u64,
    /// Block passes that packed transactions.
    pub passes: u64,
    /// Blocks skipped because the mempool was empty.
    pub fast_forwarded: u64,
    /// Applied transactions, in application order.
    pub applied: Vec<TxId>,
    pub dropped: Vec<DroppedTx>,
}

/// Advances the simulated chain and packs mempool transactions into blocks.
#[derive(Debug)]
pub struct BlockProducer {
    genesis: GenesisInfo,
    clock: ChainClock,
    tip: ChainTip,
}

/// Borrowed state a block pass operates on.
pub struct BlockInputs<'a> {
    pub ledger: &'a mut LedgerState,
    pub mempool: &'a mut Mempool,
    pub validator: &'a TxValidator,
    pub params: &'a ProtocolParameters,
}

impl BlockProducer {
    pub fn new(genesis: GenesisInfo) -> Self {
        let clock = ChainClock::genesis(&genesis);
        Self {
            genesis,
            tip: ChainTip::empty(clock.time_ms, clock.slot, clock.height),
            clock,
        }
    }

    pub fn clock(&self) -> ChainClock {
        self.clock
    }

    pub fn tip(&self) -> &ChainTip {
        &self.tip
    }

    /// Advance the chain by `blocks` blocks.
    ///
    /// The clock moves by the full amount first. Then up to `blocks` passes
    /// drain the mempool head-first, each pass filling one block until the
    /// next transaction would overflow `max_block_body_size`. Remaining
    /// blocks are fast-forwarded empty.
    pub fn advance(&mut self, blocks: u64, inputs: BlockInputs<'_>) -> EmulatorResult<AdvanceReport> {
        if blocks == 0 {
            return Err(EmulatorError::InvalidBlockCount);
        }

        self.clock.advance(blocks, &self.genesis);

        let BlockInputs {
            ledger,
            mempool,
            validator,
            params,
        } = inputs;

        let mut report = AdvanceReport {
            blocks_requested: blocks,
            ..Default::default()
        };

        while report.passes < blocks && !mempool.is_empty() {
            self.tip = self.pack_block(ledger, mempool, validator, params, &mut report);
            report.passes += 1;
        }

        if report.passes == 0 {
            self.tip = ChainTip::empty(self.clock.time_ms, self.clock.slot, self.clock.height);
        }
        report.fast_forwarded = blocks - report.passes;

        info!(
            blocks,
            passes = report.passes,
            fast_forwarded = report.fast_forwarded,
            applied = report.applied.len(),
            dropped = report.dropped.len(),
            slot = self.clock.slot,
            height = self.clock.height,
            "chain advanced"
        );
        Ok(report)
    }

    fn pack_block(
        &self,
        ledger: &mut LedgerState,
        mempool: &mut Mempool,
        validator: &TxValidator,
        params: &ProtocolParameters,
        report: &mut AdvanceReport,
    ) -> ChainTip {
        let mut tip = ChainTip::empty(self.clock.time_ms, self.clock.slot, self.clock.height);

        while let Some(head) = mempool.peek() {
            if tip.size.saturating_add(head.size) > params.max_block_body_size {
                break;
            }
            let Some(entry) = mempool.dequeue() else {
                break;
            };

            match self.process(&entry, ledger, validator, params) {
                Ok(()) => {
                    tip.tx_count += 1;
                    tip.size += entry.size;
                    tip.fees = tip.fees.saturating_add(entry.tx.body.fee);
                    report.applied.push(entry.tx_id);
                }
                Err(reason) => {
                    info!(tx = %entry.tx_id.short_hex(), %reason, "dropped queued transaction");
                    report.dropped.push(DroppedTx {
                        tx_id: entry.tx_id,
                        reason,
                    });
                }
            }
        }

        debug!(
            tx_count = tip.tx_count,
            size = tip.size,
            fees = tip.fees,
            remaining = mempool.len(),
            "block packed"
        );
        tip
    }

    fn process(
        &self,
        entry: &MempoolEntry,
        ledger: &mut LedgerState,
        validator: &TxValidator,
        params: &ProtocolParameters,
    ) -> Result<(), DropReason> {
        let report = validator
            .validate(&entry.tx, &*ledger, params, self.clock.slot)
            .map_err(|e| DropReason::Validator(e.to_string()))?;
        if let Verdict::Rejected(rejection) = report.verdict {
            return Err(DropReason::Rejected(rejection));
        }
        ledger
            .apply_transaction(&entry.tx)
            .map_err(|e| DropReason::Apply(e.to_string()))?;
        Ok(())
    }
}
