//! CLI binary for dividing property from a JSON request.
//!
//! Usage:
//!   divide --input request.json --pretty
//!   cat request.json | divide --trace
//!
//! Input (JSON): a `DivisionRequest`
//!   - personalInfo: Object with jurisdiction, marriageDate, separationDate
//!   - assets, debts, financialAccounts: Array
//!   - equityFactors: Optional<Object>
//!
//! Output (JSON on stdout): the `PropertyDivision`, or `{"error": "..."}`
//! with exit code 1. With `--trace` the explanation tree is written to stderr.

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use propdiv_engine::{DivisionConfig, DivisionRequest, DivisionService, EngineError, Spouse};
use tracing_subscriber::EnvFilter;

/// Divide marital property between two spouses.
#[derive(Parser)]
#[command(name = "divide")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Request file (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Print the explanation tree to stderr
    #[arg(short, long)]
    trace: bool,

    /// Owner of separate items without a usable ownedBy (spouse1 or spouse2)
    #[arg(long)]
    default_owner: Option<Spouse>,
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    error: String,
}

fn read_request(input: Option<&std::path::Path>) -> Result<DivisionRequest, EngineError> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    Ok(serde_json::from_str(&raw)?)
}

fn run(cli: &Cli) -> Result<String, EngineError> {
    let mut config = DivisionConfig::from_env()?;
    if let Some(owner) = cli.default_owner {
        config = config.with_default_separate_owner(owner);
    }

    let request = read_request(cli.input.as_deref())?;
    let outcome = DivisionService::with_config(config)
        .with_trace(cli.trace)
        .divide(&request)?;

    if let Some(trace) = &outcome.trace {
        eprintln!("{}", trace.render());
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(&outcome.division)?
    } else {
        serde_json::to_string(&outcome.division)?
    };
    Ok(json)
}

fn main() {
    // Initialize tracing with WARN level by default, respecting RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            let resp = ErrorResponse {
                error: e.to_string(),
            };
            println!("{}", serde_json::to_string(&resp).unwrap_or_default());
            std::process::exit(1);
        }
    }
}
