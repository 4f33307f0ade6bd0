// storage/models.rs
// Database models

/// A run summary as stored in the `run_statistics` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRun {
    pub run_id: String,
    pub recorded_at_ms: i64,
    pub timeout_secs: i64,
    pub total_targets: i64,
    pub untrusted_count: i64,
    pub self_signed_count: i64,
    pub dataset_updated: bool,
}
