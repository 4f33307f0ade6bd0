//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ca_census` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Optional deletion of an old database
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::process;
use std::time::Instant;

use ca_census::initialization::{init_crypto_provider, init_logger_with};
use ca_census::{delete_database, run_scan, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    // Initialize logger based on CLI options
    let log_file = init_logger_with(
        opt.log_level.clone().into(),
        opt.log_format.clone(),
        opt.log_dir.as_deref(),
    )
    .context("Failed to initialize logger")?;
    if let Some(path) = log_file {
        info!("Writing log to {}", path.display());
    }

    // Initialize crypto provider for TLS operations
    init_crypto_provider();

    if let Some(old_db) = opt.delete.as_deref() {
        if let Err(e) = delete_database(old_db) {
            error!("Failed to delete database {}: {e}", old_db.display());
            process::exit(1);
        }
    }

    let config = Config::from(opt);
    let start = Instant::now();
    info!("Starting analysis pipeline...");

    match run_scan(config).await {
        Ok(report) => {
            info!("Results successfully saved to db: {}", report.store_name);
            info!("Analysis pipeline done");
            let elapsed = start.elapsed().as_secs_f64();
            info!(
                "Execution time: {:.2} seconds ({:.2} minutes, {:.2} hours)",
                elapsed,
                elapsed / 60.0,
                elapsed / 3600.0
            );
            println!(
                "Probed {} target{} ({} untrusted CA, {} self-signed) - results in {}",
                report.total_targets,
                if report.total_targets == 1 { "" } else { "s" },
                report.summary.untrusted_count,
                report.summary.self_signed_count,
                report.output_dir.display()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("ca_census error: {:#}", e);
            process::exit(1);
        }
    }
}
