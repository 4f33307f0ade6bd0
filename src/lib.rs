//! ca_census library: HTTPS probing and TLS issuer classification
//!
//! This library probes a list of hostnames over HTTPS, sorts every target into
//! one of six categories and, for certificate failures, inspects the issuer of
//! the presented certificate against watchlists of untrusted and self-signed
//! certificate authorities. Results land in one text file per category and a
//! summary of each run is stored in SQLite.
//!
//! # Example
//!
//! ```no_run
//! use ca_census::{run_scan, Category, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! ca_census::initialization::init_crypto_provider();
//! let config = Config {
//!     file: std::path::PathBuf::from("hosts.txt"),
//!     timeout_seconds: 10,
//!     ..Default::default()
//! };
//!
//! let report = run_scan(config).await?;
//! println!(
//!     "Probed {} targets: {} behind an untrusted CA, {} self-signed",
//!     report.total_targets,
//!     report.count(Category::SslUntrustedCa),
//!     report.count(Category::SslSelfSigned)
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a multi-threaded Tokio runtime. Use `#[tokio::main]`
//! in your application or call library functions within an async context.

mod app;
mod classify;
pub mod config;
mod error_handling;
pub mod initialization;
mod probe;
mod run;
mod sink;
mod storage;
mod summary;
mod tls;

// Re-export public API
pub use classify::{classify, classify_issuer, Category, Classification};
pub use config::{Config, LogFormat, LogLevel, Opt};
pub use error_handling::{DatabaseError, InitializationError, SinkError};
pub use probe::{HttpsProber, Outcome, Prober, Target};
pub use run::{read_targets, run_scan, run_with, ProbeScheduler, ScanReport};
pub use sink::ResultSink;
pub use storage::{
    delete_database, query_run_history, run_migrations, SqliteSummaryStore, StoredRun,
    SummaryStore,
};
pub use summary::{summarize, RunSummary};
pub use tls::{issuer_name, CertificateInspector, IssuerName};
