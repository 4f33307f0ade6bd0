//! Summary persistence.
//!
//! The run orchestration only sees [`SummaryStore`]; the SQLite
//! implementation writes the summary row and the flagged target lines in a
//! single transaction.

use std::path::Path;

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::classify::Category;
use crate::error_handling::DatabaseError;
use crate::summary::RunSummary;

use super::models::StoredRun;
use super::{init_db_pool_with_path, run_migrations};

/// Destination for run summaries.
#[async_trait]
pub trait SummaryStore: Send + Sync {
    /// Name of the store, e.g. the database file.
    fn name(&self) -> &str;

    /// Persists one run summary.
    async fn write_summary(&self, summary: &RunSummary) -> Result<(), DatabaseError>;
}

/// Stores summaries in a SQLite database.
pub struct SqliteSummaryStore {
    name: String,
    pool: SqlitePool,
}

impl SqliteSummaryStore {
    /// Opens (or creates) the database at `db_path` and applies migrations.
    pub async fn open(db_path: &Path) -> Result<Self, DatabaseError> {
        let pool = init_db_pool_with_path(db_path).await?;
        run_migrations(&pool).await?;
        Ok(Self {
            name: db_path.display().to_string(),
            pool,
        })
    }

    /// Wraps an existing pool whose schema is already migrated.
    pub fn from_pool(name: impl Into<String>, pool: SqlitePool) -> Self {
        Self {
            name: name.into(),
            pool,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the underlying pool, checkpointing the WAL file first.
    pub async fn close(self) {
        if let Err(e) = sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
            .execute(&self.pool)
            .await
        {
            log::warn!("Failed to checkpoint WAL file (this is non-critical): {}", e);
        }
        self.pool.close().await;
    }
}

#[async_trait]
impl SummaryStore for SqliteSummaryStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn write_summary(&self, summary: &RunSummary) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO run_statistics (
                run_id, recorded_at_ms, timeout_secs, total_targets,
                untrusted_count, self_signed_count, dataset_updated
             ) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&summary.run_id)
        .bind(summary.recorded_at.timestamp_millis())
        .bind(summary.timeout_secs as i64)
        .bind(summary.total_targets as i64)
        .bind(summary.untrusted_count as i64)
        .bind(summary.self_signed_count as i64)
        .bind(summary.dataset_updated)
        .execute(&mut *tx)
        .await?;

        let flagged = summary
            .untrusted_targets
            .iter()
            .map(|line| (Category::SslUntrustedCa, line))
            .chain(
                summary
                    .self_signed_targets
                    .iter()
                    .map(|line| (Category::SslSelfSigned, line)),
            );
        for (category, line) in flagged {
            sqlx::query("INSERT INTO flagged_targets (run_id, category, detail) VALUES (?, ?, ?)")
                .bind(&summary.run_id)
                .bind(category.as_str())
                .bind(line)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        log::debug!("Stored summary {} in {}", summary.run_id, self.name);
        Ok(())
    }
}

/// Query run history from the database.
///
/// Returns stored runs, most recent first, optionally limited to `limit` rows.
pub async fn query_run_history(
    pool: &SqlitePool,
    limit: Option<usize>,
) -> Result<Vec<StoredRun>, DatabaseError> {
    let limit = limit.map(|l| l as i64).unwrap_or(-1);
    let rows = sqlx::query(
        "SELECT run_id, recorded_at_ms, timeout_secs, total_targets,
                untrusted_count, self_signed_count, dataset_updated
         FROM run_statistics
         ORDER BY recorded_at_ms DESC, run_id DESC
         LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| StoredRun {
            run_id: row.get("run_id"),
            recorded_at_ms: row.get("recorded_at_ms"),
            timeout_secs: row.get("timeout_secs"),
            total_targets: row.get("total_targets"),
            untrusted_count: row.get("untrusted_count"),
            self_signed_count: row.get("self_signed_count"),
            dataset_updated: row.get("dataset_updated"),
        })
        .collect())
}
