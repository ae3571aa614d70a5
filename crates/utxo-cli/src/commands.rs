use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use tracing::Level;
use utxo_emulator::{Emulator, EmulatorConfig};
use utxo_types::{ChainTip, Transaction, TxId};
use utxo_validator::{Advisory, Rejection, ValidationReport};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Defaults => cmd_defaults(cli.verbose),
        Command::Run(args) => cmd_run(args, cli.verbose, cli.format),
        Command::Check(args) => cmd_check(args, cli.verbose, cli.format),
    }
}

/// Install the fmt subscriber on stderr: 0 warn, 1 info, 2+ debug.
fn install_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    // Already installed (tests) is fine.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EmulatorConfig> {
    match path {
        Some(path) => EmulatorConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(EmulatorConfig::default()),
    }
}

fn load_transactions(path: &Path) -> anyhow::Result<Vec<Transaction>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading transactions from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("parsing transactions in {}", path.display()))
}

fn cmd_defaults(verbosity: u8) -> anyhow::Result<()> {
    install_tracing(verbosity);
    let text = EmulatorConfig::default()
        .to_toml_string()
        .context("rendering default config")?;
    print!("{text}");
    Ok(())
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct SubmissionLine {
    tx_id: TxId,
    size: u64,
    accepted: bool,
    rejection: Option<Rejection>,
    advisories: Vec<Advisory>,
}

#[derive(Debug, Serialize)]
struct DroppedLine {
    tx_id: TxId,
    reason: String,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    submissions: Vec<SubmissionLine>,
    blocks: u64,
    passes: u64,
    fast_forwarded: u64,
    applied: Vec<TxId>,
    dropped: Vec<DroppedLine>,
    tip: ChainTip,
    balances: BTreeMap<String, u128>,
}

fn execute_run(
    config: EmulatorConfig,
    txs: Vec<Transaction>,
    blocks: u64,
    addresses: &[String],
) -> anyhow::Result<RunSummary> {
    let mut emulator = Emulator::new(config);

    let mut submissions = Vec::with_capacity(txs.len());
    for tx in txs {
        let receipt = emulator.submit(tx).context("submitting transaction")?;
        submissions.push(SubmissionLine {
            tx_id: receipt.tx_id,
            size: receipt.size,
            accepted: receipt.accepted,
            rejection: receipt.rejection,
            advisories: receipt.advisories,
        });
    }

    let report = emulator
        .advance_blocks(blocks)
        .context("advancing the chain")?;

    let balances: BTreeMap<String, u128> = addresses
        .iter()
        .map(|address| {
            let total = emulator
                .utxos_at(&address.as_str().into())
                .iter()
                .map(|u| u128::from(u.output.coin()))
                .sum::<u128>();
            (address.clone(), total)
        })
        .collect();

    Ok(RunSummary {
        submissions,
        blocks,
        passes: report.passes,
        fast_forwarded: report.fast_forwarded,
        applied: report.applied,
        dropped: report
            .dropped
            .into_iter()
            .map(|d| DroppedLine {
                tx_id: d.tx_id,
                reason: d.reason.to_string(),
            })
            .collect(),
        tip: emulator.chain_tip().clone(),
        balances,
    })
}

fn cmd_run(args: RunArgs, verbose: u8, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    install_tracing(verbose.max(config.verbosity));

    let txs = match &args.txs {
        Some(path) => load_transactions(path)?,
        None => Vec::new(),
    };
    let summary = execute_run(config, txs, args.blocks, &args.address)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => print_run(&summary),
    }
    Ok(())
}

fn print_run(summary: &RunSummary) {
    for line in &summary.submissions {
        match &line.rejection {
            None => println!(
                "{} {} admitted ({} bytes)",
                "✓".green().bold(),
                line.tx_id.short_hex().yellow(),
                line.size
            ),
            Some(rejection) => println!(
                "{} {} rejected: {}",
                "✗".red().bold(),
                line.tx_id.short_hex().yellow(),
                rejection
            ),
        }
        for advisory in &line.advisories {
            println!("  {} {}", "warning:".yellow(), advisory);
        }
    }

    println!(
        "Advanced {} blocks ({} packed, {} fast-forwarded)",
        summary.blocks.to_string().bold(),
        summary.passes,
        summary.fast_forwarded
    );
    for tx_id in &summary.applied {
        println!("  {} {}", "applied".green(), tx_id.short_hex());
    }
    for dropped in &summary.dropped {
        println!("  {} {}: {}", "dropped".red(), dropped.tx_id.short_hex(), dropped.reason);
    }

    let tip = &summary.tip;
    println!(
        "Tip: height {}, slot {}, time {} ms",
        tip.height.to_string().bold(),
        tip.slot,
        tip.time_ms
    );
    println!("  {} txs, {} bytes, {} fees", tip.tx_count, tip.size, tip.fees);

    if !summary.balances.is_empty() {
        println!("Balances:");
        for (address, coin) in &summary.balances {
            println!("  {}  {}", address.cyan(), coin);
        }
    }
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

fn cmd_check(args: CheckArgs, verbose: u8, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    install_tracing(verbose.max(config.verbosity));

    let text = std::fs::read_to_string(&args.tx)
        .with_context(|| format!("reading transaction from {}", args.tx.display()))?;
    let tx: Transaction = serde_json::from_str(&text)
        .with_context(|| format!("parsing transaction in {}", args.tx.display()))?;

    let emulator = Emulator::new(config);
    let report = emulator.validate(&tx).context("validating transaction")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&CheckSummary::from(&report))?),
        OutputFormat::Text => print_check(&report),
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct CheckSummary<'a> {
    tx_id: TxId,
    size: u64,
    accepted: bool,
    rejection: Option<&'a Rejection>,
    stages: &'a [utxo_validator::StageResult],
    advisories: &'a [Advisory],
}

impl<'a> From<&'a ValidationReport> for CheckSummary<'a> {
    fn from(report: &'a ValidationReport) -> Self {
        Self {
            tx_id: report.tx_id,
            size: report.tx_size,
            accepted: report.is_accepted(),
            rejection: report.rejection(),
            stages: &report.stage_results,
            advisories: &report.advisories,
        }
    }
}

fn print_check(report: &ValidationReport) {
    println!("Transaction {} ({} bytes)", report.tx_id.to_hex().yellow(), report.tx_size);
    for stage in &report.stage_results {
        let mark = if stage.passed { "✓".green() } else { "✗".red() };
        match &stage.note {
            Some(note) => println!("  {mark} {:<18} {note}", stage.stage_name),
            None => println!("  {mark} {}", stage.stage_name),
        }
    }
    match report.rejection() {
        None => println!("{}", "valid".green().bold()),
        Some(rejection) => println!("{} {}", "invalid:".red().bold(), rejection),
    }
}
