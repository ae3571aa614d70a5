use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "utxo-emu",
    about = "Local UTxO ledger emulator: submit transactions and mine blocks in-process",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the default emulator configuration as TOML
    Defaults,
    /// Submit transactions, advance the chain, and report the result
    Run(RunArgs),
    /// Validate a single transaction without submitting it
    Check(CheckArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Emulator configuration (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// JSON array of transactions to submit, in order
    #[arg(short, long)]
    pub txs: Option<PathBuf>,
    /// Number of blocks to advance after submission
    #[arg(short, long, default_value = "1")]
    pub blocks: u64,
    /// Addresses whose balances are reported
    #[arg(short, long)]
    pub address: Vec<String>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Emulator configuration (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// JSON file holding one transaction
    pub tx: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults() {
        let cli = Cli::try_parse_from(["utxo-emu", "defaults"]).unwrap();
        assert!(matches!(cli.command, Command::Defaults));
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn parse_run() {
        let cli = Cli::try_parse_from([
            "utxo-emu", "run", "--config", "emu.toml", "--txs", "txs.json", "--blocks", "3",
            "-a", "addr_a", "-a", "addr_b", "-vv", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, OutputFormat::Json);
        if let Command::Run(args) = cli.command {
            assert_eq!(args.config, Some(PathBuf::from("emu.toml")));
            assert_eq!(args.txs, Some(PathBuf::from("txs.json")));
            assert_eq!(args.blocks, 3);
            assert_eq!(args.address, vec!["addr_a", "addr_b"]);
        } else {
            panic!("expected Run command");
        }
    }

    #[test]
    fn run_defaults_to_one_block() {
        let cli = Cli::try_parse_from(["utxo-emu", "run"]).unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.blocks, 1);
            assert!(args.config.is_none());
            assert!(args.address.is_empty());
        } else {
            panic!("expected Run command");
        }
    }

    #[test]
    fn check_requires_tx() {
        assert!(Cli::try_parse_from(["utxo-emu", "check"]).is_err());
        let cli = Cli::try_parse_from(["utxo-emu", "check", "tx.json"]).unwrap();
        assert!(matches!(cli.command, Command::Check(_)));
    }
}
