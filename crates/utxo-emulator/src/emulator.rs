use async_trait::async_trait;
use tracing::{debug, info, warn};
use utxo_ledger::{LedgerReader, LedgerState, LedgerWriter, StakeAccount};
use utxo_types::{
    Address, ChainTip, Datum, DatumHash, GenesisInfo, ProtocolParameters, RewardAccount,
    Transaction, TxId, TxOutRef, Utxo,
};
use utxo_validator::{Advisory, Rejection, TxValidator, ValidationReport, Verdict};

use crate::config::EmulatorConfig;
use crate::error::{EmulatorResult, ProviderResult};
use crate::mempool::{Mempool, MempoolEntry};
use crate::producer::{AdvanceReport, BlockInputs, BlockProducer, ChainClock};
use crate::provider::{LedgerProvider, ResolvedDatum, TxSubmission};

/// Outcome of [`Emulator::submit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub tx_id: TxId,
    /// Serialized size, in bytes.
    pub size: u64,
    /// Whether the transaction entered the mempool.
    pub accepted: bool,
    pub rejection: Option<Rejection>,
    pub advisories: Vec<Advisory>,
}

/// A self-contained emulated chain.
///
/// Owns its ledger, mempool, block producer and validator. Instances never
/// share state.
pub struct Emulator {
    ledger: LedgerState,
    mempool: Mempool,
    producer: BlockProducer,
    validator: TxValidator,
    params: ProtocolParameters,
    genesis: GenesisInfo,
    verbosity: u8,
}

impl Emulator {
    /// Build an emulator from `config`.
    ///
    /// Invalid genesis information or protocol parameters are replaced by
    /// their defaults.
    pub fn new(config: EmulatorConfig) -> Self {
        let genesis = if config.genesis.is_valid() {
            config.genesis
        } else {
            warn!(slot_length_ms = config.genesis.slot_length_ms, "invalid genesis info, using defaults");
            GenesisInfo::default()
        };
        let params = if config.protocol_parameters.is_valid() {
            config.protocol_parameters
        } else {
            warn!(
                max_tx_size = config.protocol_parameters.max_tx_size,
                max_block_body_size = config.protocol_parameters.max_block_body_size,
                "invalid protocol parameters, using defaults"
            );
            ProtocolParameters::default()
        };

        let mut ledger = LedgerState::new();
        for (position, initial) in (0u32..).zip(config.initial_utxos.iter()) {
            let out_ref = initial.resolve_out_ref(position);
            if !ledger.insert(out_ref, initial.to_output()) {
                warn!(%out_ref, "duplicate initial utxo reference ignored");
            }
        }
        for initial in config.stake_accounts {
            let mut account = StakeAccount::registered(initial.rewards);
            account.registered = initial.registered;
            account.delegated_pool = initial.delegated_pool;
            ledger.register_stake_account(initial.account, account);
        }

        info!(
            utxos = ledger.utxo_count(),
            start_slot = genesis.start_slot,
            slot_length_ms = genesis.slot_length_ms,
            "emulator initialized"
        );

        Self {
            ledger,
            mempool: Mempool::new(),
            producer: BlockProducer::new(genesis.clone()),
            validator: TxValidator::with_default_stages(config.validator),
            params,
            genesis,
            verbosity: config.verbosity,
        }
    }

    /// Validate `tx` against the current ledger and slot without admitting it.
    pub fn validate(&self, tx: &Transaction) -> EmulatorResult<ValidationReport> {
        Ok(self
            .validator
            .validate(tx, &self.ledger, &self.params, self.slot())?)
    }

    /// Validate and, if accepted, enqueue `tx`.
    pub fn submit(&mut self, tx: Transaction) -> EmulatorResult<SubmitReceipt> {
        let report = self.validate(&tx)?;
        let ValidationReport {
            tx_id,
            tx_size,
            verdict,
            advisories,
            ..
        } = report;

        let rejection = match verdict {
            Verdict::Accepted => {
                self.mempool.enqueue(MempoolEntry {
                    tx_id,
                    tx,
                    size: tx_size,
                    admitted_slot: self.slot(),
                });
                info!(tx = %tx_id.short_hex(), size = tx_size, queued = self.mempool.len(), "transaction admitted");
                None
            }
            Verdict::Rejected(rejection) => {
                info!(tx = %tx_id.short_hex(), %rejection, "transaction not admitted");
                Some(rejection)
            }
        };

        Ok(SubmitReceipt {
            tx_id,
            size: tx_size,
            accepted: rejection.is_none(),
            rejection,
            advisories,
        })
    }

    /// Advance the chain by `blocks` blocks, packing queued transactions.
    pub fn advance_blocks(&mut self, blocks: u64) -> EmulatorResult<AdvanceReport> {
        self.producer.advance(
            blocks,
            BlockInputs {
                ledger: &mut self.ledger,
                mempool: &mut self.mempool,
                validator: &self.validator,
                params: &self.params,
            },
        )
    }

    pub fn chain_tip(&self) -> &ChainTip {
        self.producer.tip()
    }

    pub fn clock(&self) -> ChainClock {
        self.producer.clock()
    }

    pub fn time_ms(&self) -> u64 {
        self.clock().time_ms
    }

    pub fn slot(&self) -> u64 {
        self.clock().slot
    }

    pub fn height(&self) -> u64 {
        self.clock().height
    }

    pub fn protocol_parameters(&self) -> &ProtocolParameters {
        &self.params
    }

    pub fn genesis_info(&self) -> &GenesisInfo {
        &self.genesis
    }

    pub fn max_tx_size(&self) -> u64 {
        self.params.max_tx_size
    }

    /// POSIX time (ms) at which `slot` begins.
    pub fn slot_to_posix_ms(&self, slot: u64) -> u64 {
        self.genesis.slot_to_posix_ms(slot)
    }

    /// Serialized size of `tx`, in bytes.
    pub fn tx_size(&self, tx: &Transaction) -> EmulatorResult<u64> {
        Ok(tx.serialized_size()?)
    }

    /// Minimum fee for `tx` under the current protocol parameters.
    pub fn min_fee(&self, tx: &Transaction) -> EmulatorResult<u64> {
        Ok(self.params.min_fee(self.tx_size(tx)?))
    }

    pub fn ledger(&self) -> &LedgerState {
        &self.ledger
    }

    /// Every live UTxO, ordered by reference.
    pub fn utxos(&self) -> Vec<Utxo> {
        self.ledger.utxos()
    }

    pub fn utxos_at(&self, address: &Address) -> Vec<Utxo> {
        self.ledger.resolve_by_address(address)
    }

    pub fn resolve(&self, refs: &[TxOutRef]) -> Vec<Utxo> {
        self.ledger.resolve(refs)
    }

    pub fn datum(&self, hash: &DatumHash) -> Option<&Datum> {
        self.ledger.datum(hash)
    }

    pub fn stake_account(&self, account: &RewardAccount) -> Option<&StakeAccount> {
        self.ledger.stake_account(account)
    }

    pub fn mempool(&self) -> &Mempool {
        &self.mempool
    }

    /// Transactions waiting for a block, head first.
    pub fn pending_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.mempool.iter().map(|entry| &entry.tx)
    }

    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: u8) {
        debug!(verbosity, "verbosity changed");
        self.verbosity = verbosity;
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new(EmulatorConfig::default())
    }
}

#[async_trait]
impl LedgerProvider for Emulator {
    async fn protocol_parameters(&self) -> ProviderResult<ProtocolParameters> {
        Ok(self.params.clone())
    }

    async fn genesis_info(&self) -> ProviderResult<GenesisInfo> {
        Ok(self.genesis.clone())
    }

    async fn chain_tip(&self) -> ProviderResult<ChainTip> {
        Ok(self.producer.tip().clone())
    }

    async fn resolve_utxos(&self, refs: &[TxOutRef]) -> ProviderResult<Vec<Utxo>> {
        Ok(self.ledger.resolve(refs))
    }

    async fn resolve_utxos_by_address(&self, address: &Address) -> ProviderResult<Vec<Utxo>> {
        Ok(self.ledger.resolve_by_address(address))
    }

    async fn resolve_datum_hashes(&self, hashes: &[DatumHash]) -> ProviderResult<Vec<ResolvedDatum>> {
        Ok(hashes
            .iter()
            .filter_map(|hash| {
                self.ledger.datum(hash).map(|datum| ResolvedDatum {
                    hash: *hash,
                    datum: datum.clone(),
                })
            })
            .collect())
    }

    async fn submit_tx(&mut self, submission: TxSubmission) -> ProviderResult<TxId> {
        let tx = submission.into_transaction()?;
        Ok(self.submit(tx)?.tx_id)
    }
}
