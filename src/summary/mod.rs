//! Run summary.
//!
//! After the pool drains, the untrusted-CA and self-signed destinations are
//! read back and condensed into one [`RunSummary`], which is then handed to a
//! [`SummaryStore`](crate::storage::SummaryStore).

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classify::Category;
use crate::error_handling::SinkError;
use crate::sink::ResultSink;

/// Immutable record describing one completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Run identifier (format: `run_<timestamp_millis>`)
    pub run_id: String,
    /// Effective per-request timeout in seconds
    pub timeout_secs: u64,
    /// Number of non-blank input lines dispatched
    pub total_targets: usize,
    /// Lines in the untrusted-CA destination
    pub untrusted_count: usize,
    /// Lines in the self-signed destination
    pub self_signed_count: usize,
    /// Whether the input dataset was refreshed since the previous run
    pub dataset_updated: bool,
    /// When the summary was computed
    pub recorded_at: DateTime<Utc>,
    /// Lines of the untrusted-CA destination
    pub untrusted_targets: Vec<String>,
    /// Lines of the self-signed destination
    pub self_signed_targets: Vec<String>,
}

/// Builds the run summary from the sink contents.
///
/// Must only be called once all workers have finished.
///
/// # Errors
///
/// Returns `SinkError::Io` if a destination cannot be read back.
pub async fn summarize(
    sink: &ResultSink,
    run_id: &str,
    timeout_secs: u64,
    total_targets: usize,
    dataset_updated: bool,
) -> Result<RunSummary, SinkError> {
    let untrusted_targets = sink.read_lines(Category::SslUntrustedCa).await?;
    let self_signed_targets = sink.read_lines(Category::SslSelfSigned).await?;

    Ok(RunSummary {
        run_id: run_id.to_string(),
        timeout_secs,
        total_targets,
        untrusted_count: untrusted_targets.len(),
        self_signed_count: self_signed_targets.len(),
        dataset_updated,
        recorded_at: Utc::now(),
        untrusted_targets,
        self_signed_targets,
    })
}
