// Shared test helpers for input files, synthetic probers and summary stores.
//
// Each integration test file pulls this in with `mod helpers;`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ca_census::{
    Category, Config, DatabaseError, Outcome, Prober, RunSummary, SummaryStore, Target,
};
use strum::IntoEnumIterator;
use tempfile::{NamedTempFile, TempDir};

/// Writes raw input lines to a temporary file, one per line.
pub fn write_targets_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for line in lines {
        writeln!(file, "{}", line).expect("Failed to write target");
    }
    file.flush().expect("Failed to flush file");
    file
}

/// Creates a basic Config for testing.
pub fn create_test_config(input_file: &Path, output_dir: &Path, db_path: PathBuf) -> Config {
    Config {
        file: input_file.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        db_path,
        timeout_seconds: 5,
        max_concurrency: Some(4),
        user_agent: "ca_census_test/1.0".to_string(),
        ..Default::default()
    }
}

/// Reads the lines of one result file.
pub fn read_result_file(dir: &Path, category: Category) -> Vec<String> {
    let content = std::fs::read_to_string(dir.join(category.file_name()))
        .expect("Failed to read result file");
    content.lines().map(str::to_string).collect()
}

/// Total number of lines across all result files.
pub fn total_result_lines(dir: &Path) -> usize {
    Category::iter()
        .map(|category| read_result_file(dir, category).len())
        .sum()
}

/// Returns a fresh temp directory for output files.
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Prober answering from a fixed table of URL -> outcome.
///
/// Unknown targets get a network error.
pub struct TableProber {
    outcomes: HashMap<String, Outcome>,
}

impl TableProber {
    pub fn new(entries: &[(&str, Outcome)]) -> Self {
        Self {
            outcomes: entries
                .iter()
                .map(|(url, outcome)| (url.to_string(), outcome.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl Prober for TableProber {
    async fn probe(&self, target: &Target) -> Outcome {
        self.outcomes
            .get(target.url())
            .cloned()
            .unwrap_or_else(|| Outcome::OtherNetworkError {
                error: "no route to host".to_string(),
            })
    }
}

/// Summary store that keeps every summary in memory.
#[derive(Default)]
pub struct RecordingStore {
    pub summaries: Mutex<Vec<RunSummary>>,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn single(&self) -> RunSummary {
        let summaries = self.summaries.lock().expect("lock");
        assert_eq!(summaries.len(), 1, "expected exactly one summary");
        summaries[0].clone()
    }
}

#[async_trait]
impl SummaryStore for RecordingStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn write_summary(&self, summary: &RunSummary) -> Result<(), DatabaseError> {
        self.summaries.lock().expect("lock").push(summary.clone());
        Ok(())
    }
}
