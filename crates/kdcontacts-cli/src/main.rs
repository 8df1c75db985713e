mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("{}", diagnostic(&e));
        std::process::exit(1);
    }
}

/// Renders a fatal error as the single stderr line the process exits with.
///
/// Some sources (TOML errors in particular) span several lines; they are folded.
fn diagnostic(err: &CliError) -> String {
    let message = err.to_string();
    let folded: Vec<&str> = message
        .lines()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    format!("kdcontacts: {}", folded.join(" "))
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("kdcontacts v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!(
            "Setting Rayon global thread pool to {} threads.",
            num_threads
        );
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e))
            })?;
    }

    match &cli.command {
        Some(Commands::Scan(args)) => {
            info!("Dispatching to 'scan' command.");
            commands::scan::run(args)
        }
        None => {
            info!("Dispatching to contact search.");
            commands::contacts::run(&cli.contacts, cli.quiet)
        }
    }
}
