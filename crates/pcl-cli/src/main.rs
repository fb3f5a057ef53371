//! # pcl CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pcl_cli::import::{run_import, ImportArgs};
use pcl_cli::lookup::{run_lookup, LookupArgs};
use pcl_cli::regions::run_regions;
use pcl_cli::validate::{run_validate, ValidateArgs};

/// Canadian postal code lookup CLI.
///
/// Validates postal codes, explains what their characters encode, looks up
/// municipalities, and manages the SQLite municipality table.
#[derive(Parser, Debug)]
#[command(name = "pcl", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check postal codes against the Canada Post grammar.
    Validate(ValidateArgs),

    /// Classify a postal code and resolve its municipality.
    Lookup(LookupArgs),

    /// Load per-region JSON files into the SQLite municipality table.
    Import(ImportArgs),

    /// Print the region-code table.
    Regions,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Loaded before parsing so `env = ...` arguments see .env values.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &mut stdout),
        Commands::Lookup(args) => run_lookup(&args, &mut stdout).await,
        Commands::Import(args) => run_import(&args, &mut stdout).await,
        Commands::Regions => run_regions(&mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
