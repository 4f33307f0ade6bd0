//! Bounded fan-out of probes.
//!
//! Each target is one spawned task holding a semaphore permit, so at most
//! `concurrency` probes are in flight. Every task classifies its own outcome
//! and appends it to the sink. A task that panics is caught at the join and
//! recorded as a fatal outcome, so each target still yields exactly one line.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{error, warn};

use crate::app::log_outcome;
use crate::classify::classify;
use crate::config::PROBE_GUARD_SLACK;
use crate::error_handling::ProcessingStats;
use crate::initialization::init_semaphore;
use crate::probe::{Outcome, Prober, Target};
use crate::sink::ResultSink;

/// State shared by all workers of one run.
struct WorkerContext<P> {
    prober: Arc<P>,
    sink: Arc<ResultSink>,
    stats: Arc<ProcessingStats>,
    completed: Arc<AtomicUsize>,
    timeout_secs: u64,
    guard: Duration,
}

impl<P: Prober> WorkerContext<P> {
    async fn process(&self, target: &Target, index: usize, total: usize) {
        let outcome = match tokio::time::timeout(self.guard, self.prober.probe(target)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(
                    "Probe of {target} exceeded {}s guard, recording as timeout",
                    self.guard.as_secs()
                );
                Outcome::Timeout
            }
        };
        self.record(target, &outcome, index, total).await;
    }

    async fn record(&self, target: &Target, outcome: &Outcome, index: usize, total: usize) {
        let classification = classify(target, outcome);
        match self
            .sink
            .append(classification.category, &classification.detail)
            .await
        {
            Ok(()) => self.stats.increment(classification.category),
            Err(e) => {
                error!("Failed to record {target} as {}: {e}", classification.category);
                self.stats.increment_unrecorded();
            }
        }
        if classification.fatal {
            self.stats.increment_fatal();
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        log_outcome(self.timeout_secs, index, total, target, &classification);
    }
}

/// Runs one probe per target on a bounded pool.
pub struct ProbeScheduler<P> {
    ctx: Arc<WorkerContext<P>>,
    concurrency: usize,
}

impl<P: Prober + 'static> ProbeScheduler<P> {
    /// Creates a scheduler.
    ///
    /// `timeout` is the probe timeout; a probe that is still running after
    /// twice that plus [`PROBE_GUARD_SLACK`] is abandoned and recorded as a timeout.
    pub fn new(
        prober: Arc<P>,
        sink: Arc<ResultSink>,
        timeout: Duration,
        concurrency: usize,
    ) -> Self {
        let ctx = WorkerContext {
            prober,
            sink,
            stats: Arc::new(ProcessingStats::new()),
            completed: Arc::new(AtomicUsize::new(0)),
            timeout_secs: timeout.as_secs(),
            guard: timeout.saturating_mul(2).saturating_add(PROBE_GUARD_SLACK),
        };
        Self {
            ctx: Arc::new(ctx),
            concurrency: concurrency.max(1),
        }
    }

    pub fn stats(&self) -> Arc<ProcessingStats> {
        Arc::clone(&self.ctx.stats)
    }

    /// Counter of recorded targets, for progress reporting.
    pub fn completed(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.ctx.completed)
    }

    /// Probes every target and returns once all of them are recorded.
    pub async fn run(&self, targets: Vec<Target>) {
        let total = targets.len();
        let semaphore = init_semaphore(self.concurrency);
        let mut tasks = FuturesUnordered::new();

        for (i, target) in targets.into_iter().enumerate() {
            let index = i + 1;
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    let outcome = Outcome::FatalError {
                        error: format!("worker pool unavailable: {e}"),
                    };
                    self.ctx.record(&target, &outcome, index, total).await;
                    continue;
                }
            };

            let ctx = Arc::clone(&self.ctx);
            let task_target = target.clone();
            let handle = tokio::spawn(async move {
                let _permit = permit;
                ctx.process(&task_target, index, total).await;
            });
            tasks.push(async move { (index, target, handle.await) });
        }

        while let Some((index, target, result)) = tasks.next().await {
            if let Err(join_error) = result {
                error!("Worker for {target} failed: {join_error}");
                let outcome = Outcome::FatalError {
                    error: format!("worker failed: {join_error}"),
                };
                self.ctx.record(&target, &outcome, index, total).await;
            }
        }
    }
}
