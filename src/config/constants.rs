//! Configuration constants.
//!
//! This module defines the operational defaults used throughout the application:
//! timeouts, output file names, and pool sizing.

use std::time::Duration;

/// Per-request timeout in seconds used when the configured value is not positive.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Pool size is this many workers per available CPU unless overridden.
pub const DEFAULT_CONCURRENCY_MULTIPLIER: usize = 4;

/// Seconds between throughput log lines while a run is in progress.
pub const LOGGING_INTERVAL: u64 = 5;

/// Extra time granted on top of the probe budget before the per-target guard fires.
///
/// A probe may spend up to one timeout on the HTTPS request and up to one more
/// on the secondary certificate fetch (connect and handshake share that one
/// budget), so the guard is `2 * timeout + slack`.
pub const PROBE_GUARD_SLACK: Duration = Duration::from_secs(5);

/// Default input file with one hostname per line.
pub const DEFAULT_INPUT_FILE: &str = "tls_list_cleaned.txt";

/// Default SQLite database file for run summaries.
pub const DEFAULT_DB_NAME: &str = "statistics.db";

/// Issuer value used in detail lines when the certificate could not be read.
pub const UNKNOWN_ISSUER: &str = "unknown";

/// Default User-Agent string for HTTPS requests.
///
/// A desktop browser string; some hosts refuse requests from obvious bots.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 ",
    "(KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3"
);

// Output destinations, one per category
pub const SUCCESSFUL_FILE: &str = "successful.txt";
pub const UNSUCCESSFUL_FILE: &str = "unsuccessful.txt";
pub const SSL_UNTRUSTED_CA_FILE: &str = "ssl_cert_err.txt";
pub const SSL_SELF_SIGNED_FILE: &str = "ssl_self_sign_err.txt";
pub const SSL_OTHER_FILE: &str = "other_ssl_cert_err.txt";
pub const REQUEST_ERROR_FILE: &str = "request_errors.txt";
