//! Run summary persistence.
//!
//! SQLite-backed storage for run summaries:
//! - Connection pool setup (WAL mode, file creation)
//! - Schema migrations from `migrations/`
//! - The [`SummaryStore`] interface and its SQLite implementation
//! - Run history queries

pub mod migrations;
pub mod models;
pub mod pool;
pub mod summary;

// Re-export commonly used items
pub use migrations::run_migrations;
pub use models::StoredRun;
pub use pool::{delete_database, init_db_pool_with_path};
pub use summary::{query_run_history, SqliteSummaryStore, SummaryStore};
