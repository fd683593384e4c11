//! # actp CLI entry point
//!
//! Parses command-line arguments, installs logging and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use actp_cli::canonicalize::{run_canonicalize, CanonicalizeArgs};
use actp_cli::config::{CliConfig, FlagOverrides, LogFormat};
use actp_cli::digest::{run_digest, DigestArgs};
use actp_cli::typehash::{run_type_hash, TypeHashArgs};
use actp_cli::vectors::{run_vectors, VectorsArgs};
use actp_cli::EXIT_ERROR;

/// ACTP canonical digest toolkit.
///
/// Canonicalizes and hashes request metadata, prints message type hashes,
/// and checks the published cross-language test vectors.
#[derive(Parser, Debug)]
#[command(name = "actp", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Extra catalogue file layered over the built-in message types
    /// (default: $ACTP_CATALOGUE).
    #[arg(long, value_name = "FILE", global = true)]
    catalogue: Option<PathBuf>,

    /// Log line format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the canonical form of a JSON document.
    Canonicalize(CanonicalizeArgs),

    /// Print the SHA3-256 digest of a JSON document's canonical form.
    Digest(DigestArgs),

    /// Print message type signatures and type hashes.
    TypeHash(TypeHashArgs),

    /// Recompute the published test vectors and compare digests.
    Vectors(VectorsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = CliConfig::from_env(FlagOverrides {
        verbose: cli.verbose,
        catalogue: cli.catalogue.clone(),
        log_format: cli.log_format,
    });

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }

    tracing::debug!(?config, "actp CLI starting");

    let result = match &cli.command {
        Commands::Canonicalize(args) => run_canonicalize(args),
        Commands::Digest(args) => run_digest(args),
        Commands::TypeHash(args) => run_type_hash(args, &config),
        Commands::Vectors(args) => run_vectors(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
