//! Run orchestration.
//!
//! Reads the target list, resets the result files, drives the probe pool to
//! completion and hands the run summary to a [`SummaryStore`].

mod input;
mod scheduler;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info, warn};
use strum::IntoEnumIterator;
use tokio_util::sync::CancellationToken;

use crate::app::{log_progress, print_category_statistics, shutdown_gracefully};
use crate::classify::Category;
use crate::config::{Config, LOGGING_INTERVAL};
use crate::initialization::init_client;
use crate::probe::{HttpsProber, Prober};
use crate::sink::ResultSink;
use crate::storage::{SqliteSummaryStore, SummaryStore};
use crate::summary::{summarize, RunSummary};
use crate::tls::CertificateInspector;

pub use input::read_targets;
pub use scheduler::ProbeScheduler;

/// Results of a completed run.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Run identifier (format: `run_<timestamp_millis>`)
    pub run_id: String,
    /// Number of targets dispatched
    pub total_targets: usize,
    /// Lines recorded per category
    pub category_counts: Vec<(Category, usize)>,
    /// Targets that ended with a fatal error
    pub fatal_count: usize,
    /// Targets whose result line could not be written
    pub unrecorded_count: usize,
    /// The summary handed to the store
    pub summary: RunSummary,
    /// Name of the store that received the summary
    pub store_name: String,
    /// Directory holding the result files
    pub output_dir: PathBuf,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

impl ScanReport {
    /// Lines recorded for one category.
    pub fn count(&self, category: Category) -> usize {
        self.category_counts
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// Runs a scan with the network prober and the SQLite summary store.
///
/// # Errors
///
/// Returns an error if the input file cannot be read, the HTTP client or the
/// database cannot be initialized, or the summary cannot be stored.
/// Individual target failures are never errors; they end up in the result files.
///
/// # Example
///
/// ```no_run
/// use ca_census::{run_scan, Config};
/// use std::path::PathBuf;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config {
///     file: PathBuf::from("hosts.txt"),
///     ..Default::default()
/// };
/// let report = run_scan(config).await?;
/// println!("Probed {} targets", report.total_targets);
/// # Ok(())
/// # }
/// ```
pub async fn run_scan(config: Config) -> Result<ScanReport> {
    let timeout = config.timeout();
    let client = init_client(&config.user_agent, timeout)
        .context("Failed to initialize HTTP client")?;
    let inspector =
        CertificateInspector::new(timeout).context("Failed to initialize certificate inspector")?;
    let prober = Arc::new(HttpsProber::new(client, inspector));

    let store = SqliteSummaryStore::open(&config.db_path)
        .await
        .context("Failed to initialize database")?;

    let result = run_with(&config, prober, &store).await;
    store.close().await;
    result
}

/// Runs a scan with the given prober and summary store.
///
/// All targets are recorded before the summary is computed.
///
/// # Errors
///
/// Returns an error if the input file cannot be read, the result files cannot
/// be created or read back, or the store rejects the summary.
pub async fn run_with<P: Prober + 'static>(
    config: &Config,
    prober: Arc<P>,
    store: &dyn SummaryStore,
) -> Result<ScanReport> {
    let timeout = effective_timeout(config);
    let targets = read_targets(&config.file).await?;
    let total_targets = targets.len();

    let sink = Arc::new(
        ResultSink::create(&config.output_dir).context("Failed to create result files")?,
    );

    let run_id = format!("run_{}", Utc::now().timestamp_millis());
    let pool_size = config.pool_size();
    info!(
        "Starting run {run_id}: {total_targets} targets, {pool_size} workers, timeout {}s",
        timeout.as_secs()
    );

    let scheduler = ProbeScheduler::new(prober, Arc::clone(&sink), timeout, pool_size);
    let stats = scheduler.stats();
    let completed = scheduler.completed();

    let start_time = std::time::Instant::now();
    let cancel = CancellationToken::new();
    let cancel_logging = cancel.child_token();
    let completed_for_logging = Arc::clone(&completed);
    let logging_task = tokio::task::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(LOGGING_INTERVAL));
        // The first tick completes immediately
        interval.tick().await;
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    log_progress(start_time, &completed_for_logging, total_targets);
                }
                _ = cancel_logging.cancelled() => {
                    break;
                }
            }
        }
    });

    scheduler.run(targets).await;

    shutdown_gracefully(cancel, Some(logging_task)).await;
    log_progress(start_time, &completed, total_targets);

    let summary = summarize(
        &sink,
        &run_id,
        timeout.as_secs(),
        total_targets,
        config.dataset_updated,
    )
    .await
    .context("Failed to read back result files")?;
    match serde_json::to_string(&summary) {
        Ok(json) => debug!("Run summary: {json}"),
        Err(e) => warn!("Failed to serialize run summary: {e}"),
    }

    store
        .write_summary(&summary)
        .await
        .with_context(|| format!("Failed to store run summary in {}", store.name()))?;

    print_category_statistics(&stats);

    Ok(ScanReport {
        run_id,
        total_targets,
        category_counts: Category::iter()
            .map(|category| (category, stats.get_count(category)))
            .collect(),
        fatal_count: stats.fatal_count(),
        unrecorded_count: stats.unrecorded_count(),
        summary,
        store_name: store.name().to_string(),
        output_dir: config.output_dir.clone(),
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}

fn effective_timeout(config: &Config) -> Duration {
    if config.timeout_seconds <= 0 {
        warn!(
            "Timeout must be a positive number of seconds, got {}; using {}s",
            config.timeout_seconds,
            config.timeout_secs()
        );
    }
    config.timeout()
}
