use std::fs;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use anchorproof::error::Result;
use anchorproof::flatten;
use anchorproof::proof::normalize::normalize_proofs;
use anchorproof::proof::parse::{parse_proofs, JsonProofParser, ProofParser};
use anchorproof::proof::ProofBranch;

#[derive(Parser)]
#[command(name = "anchorproof")]
#[command(about = "Normalize, parse, and flatten ledger anchor proofs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a JSON array of raw proofs into canonical form
    Parse {
        /// Path to a JSON file holding an array of proofs
        file: String,
    },
    /// Flatten proofs into one record per anchor
    Flatten { file: String },
    /// Extract ledger anchoring data from top-level branch records
    Ledger {
        file: String,
        /// Ledger anchor type to extract (e.g. "btc")
        #[arg(long, default_value = "btc")]
        ledger: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Parse { file } => {
            let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(file)?)?;
            let (normalized, _diagnostics) = normalize_proofs(&raw)?;
            let items =
                serde_json::Value::Array(normalized.into_iter().map(|n| n.into_value()).collect());
            let proofs = parse_proofs(&items, &JsonProofParser)?;
            println!("{}", serde_json::to_string_pretty(&proofs)?);
        }
        Commands::Flatten { file } => {
            let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(file)?)?;
            let (normalized, _diagnostics) = normalize_proofs(&raw)?;
            let parser = JsonProofParser;
            let proofs = normalized
                .into_iter()
                .map(|n| parser.parse(&n.into_value()))
                .collect::<Result<Vec<_>>>()?;
            let records = flatten::flatten_proofs(&proofs);
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Ledger { file, ledger } => {
            let branches: Vec<ProofBranch> = serde_json::from_str(&fs::read_to_string(file)?)?;
            let records = flatten::ledger::flatten_ledger_branches(&branches, &ledger)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }
    Ok(())
}
