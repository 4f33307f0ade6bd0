//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for initialization, storage and output failures
//! - Mapping of `reqwest` failures onto probe failure kinds
//! - Per-category processing statistics
//!
//! Network failures are not errors at the run level: every one of them is
//! mapped to a [`FailureKind`] and recorded as an outcome for its target.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use stats::ProcessingStats;
pub use types::{DatabaseError, FailureKind, InitializationError, SinkError};
