//! Main application modules.
//!
//! This module provides utilities for target normalization, progress logging,
//! shutdown handling, and statistics printing used by the run orchestration.

pub mod logging;
pub mod shutdown;
pub mod statistics;
pub mod url;

// Re-export public API
pub use logging::{log_outcome, log_progress};
pub use shutdown::shutdown_gracefully;
pub use statistics::print_category_statistics;
pub use url::normalize_target;
