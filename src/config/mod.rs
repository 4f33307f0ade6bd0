//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, file names, intervals)
//! - Certificate issuer watchlists
//! - CLI option types and parsing

mod constants;
mod markers;
mod types;

// Re-export all constants
pub use constants::*;
pub use markers::{SELF_SIGNED_MARKERS, UNTRUSTED_CA_MARKERS};
pub use types::{Config, LogFormat, LogLevel, Opt};
