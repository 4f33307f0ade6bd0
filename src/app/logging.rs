//! Progress logging utilities.

use log::{error, info};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::classify::Classification;
use crate::probe::Target;

/// Formats the per-target progress line.
pub fn progress_line(
    timeout_secs: u64,
    index: usize,
    total: usize,
    target: &Target,
    message: &str,
) -> String {
    format!("timeout: {timeout_secs},\t{index}/{total}: {target}: {message}")
}

/// Logs the outcome of one target.
///
/// Fatal outcomes additionally get an ERROR line so they stand out in the log.
pub fn log_outcome(
    timeout_secs: u64,
    index: usize,
    total: usize,
    target: &Target,
    classification: &Classification,
) {
    if classification.fatal {
        error!("FATAL REQUEST ERROR: {target}");
    }
    info!(
        "{}",
        progress_line(timeout_secs, index, total, target, &classification.message)
    );
}

/// Logs throughput of the run so far.
pub fn log_progress(start_time: std::time::Instant, completed: &AtomicUsize, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let done = completed.load(Ordering::SeqCst);
    let rate = if elapsed_secs > 0.0 {
        done as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {}/{} targets in {:.2} seconds (~{:.2} targets/sec)",
        done, total, elapsed_secs, rate
    );
}
