//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_CONCURRENCY_MULTIPLIER, DEFAULT_DB_NAME, DEFAULT_INPUT_FILE, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ca_census",
    about = "Analyse which sites require a Russian Trusted CA certificate to work properly."
)]
pub struct Opt {
    /// File with one hostname or URL per line
    #[arg(long, default_value = DEFAULT_INPUT_FILE)]
    pub input: PathBuf,

    /// Directory receiving the categorised result files
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Timeout for each web request, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS as i64, allow_negative_numbers = true)]
    pub timeout: i64,

    /// Database name; created if it does not exist
    #[arg(long, default_value = DEFAULT_DB_NAME)]
    pub name: PathBuf,

    /// Flag signalling that the dataset has been updated
    #[arg(long)]
    pub updated: bool,

    /// Delete an existing database with this name before running
    #[arg(long)]
    pub delete: Option<PathBuf>,

    /// Workers per available CPU
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY_MULTIPLIER)]
    pub concurrency_multiplier: usize,

    /// Fixed worker count (overrides --concurrency-multiplier)
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Also write logs to a timestamped file in this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use ca_census::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("hosts.txt"),
///     timeout_seconds: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// File to read targets from
    pub file: PathBuf,

    /// Directory for the per-category result files
    pub output_dir: PathBuf,

    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Requested per-request timeout in seconds; non-positive values fall back to the default
    pub timeout_seconds: i64,

    /// Workers per available CPU
    pub concurrency_multiplier: usize,

    /// Fixed worker count, overriding the multiplier
    pub max_concurrency: Option<usize>,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Whether the input dataset was refreshed since the previous run
    pub dataset_updated: bool,
}

impl Config {
    /// Effective per-request timeout in whole seconds.
    pub fn timeout_secs(&self) -> u64 {
        if self.timeout_seconds <= 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            self.timeout_seconds as u64
        }
    }

    /// Effective per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs())
    }

    /// Number of workers in the probe pool.
    pub fn pool_size(&self) -> usize {
        if let Some(fixed) = self.max_concurrency {
            return fixed.max(1);
        }
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        cores.saturating_mul(self.concurrency_multiplier).max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_INPUT_FILE),
            output_dir: PathBuf::from("."),
            db_path: PathBuf::from(DEFAULT_DB_NAME),
            timeout_seconds: DEFAULT_TIMEOUT_SECS as i64,
            concurrency_multiplier: DEFAULT_CONCURRENCY_MULTIPLIER,
            max_concurrency: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            dataset_updated: false,
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            file: opt.input,
            output_dir: opt.output_dir,
            db_path: opt.name,
            timeout_seconds: opt.timeout,
            concurrency_multiplier: opt.concurrency_multiplier,
            max_concurrency: opt.max_concurrency,
            user_agent: opt.user_agent,
            dataset_updated: opt.updated,
        }
    }
}
