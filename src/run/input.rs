//! Input list loading.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::probe::Target;

/// Reads the newline-delimited target list, skipping blank lines.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not UTF-8.
pub async fn read_targets(path: &Path) -> Result<Vec<Target>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read input file {}", path.display()))?;
    let targets: Vec<Target> = content.lines().filter_map(Target::parse).collect();
    info!("Total targets in {}: {}", path.display(), targets.len());
    Ok(targets)
}
