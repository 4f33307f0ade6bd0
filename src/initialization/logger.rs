//! Logger initialization.
//!
//! This module provides a function to initialize the logger with custom
//! formatting, optionally mirroring every line into a timestamped log file.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Writes every log line to stdout and to a log file.
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        std::io::stdout().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stdout().flush()?;
        self.file.flush()
    }
}

/// Initializes the logger with the specified level and format.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter overrides it.
///
/// When `log_dir` is given, the directory is created and every line is also
/// written to `<log_dir>/<YYYY-MM-DD_HH-MM-SS>_logfile.log`; colors are
/// disabled in that case so the file stays plain text.
///
/// # Returns
///
/// The path of the log file, if one was created.
///
/// # Errors
///
/// Returns `InitializationError::LoggerSetupError` if the log file cannot be
/// created, or `InitializationError::LoggerError` if a logger is already set.
pub fn init_logger_with(
    level: LevelFilter,
    format: LogFormat,
    log_dir: Option<&Path>,
) -> Result<Option<PathBuf>, InitializationError> {
    colored::control::set_override(log_dir.is_none());

    let mut builder = env_logger::Builder::from_default_env();

    // CLI-provided level takes precedence over RUST_LOG
    builder.filter_level(level);
    builder.filter_module("sqlx", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("rustls", LevelFilter::Warn);
    builder.filter_module("ca_census", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    let log_file = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|e| {
                InitializationError::LoggerSetupError(format!(
                    "cannot create log directory {}: {e}",
                    dir.display()
                ))
            })?;
            let path = dir.join(format!(
                "{}_logfile.log",
                chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
            ));
            let file = File::create(&path).map_err(|e| {
                InitializationError::LoggerSetupError(format!(
                    "cannot create log file {}: {e}",
                    path.display()
                ))
            })?;
            builder.target(env_logger::Target::Pipe(Box::new(TeeWriter { file })));
            Some(path)
        }
        None => None,
    };

    // try_init() so tests that initialize twice get an error instead of a panic
    builder.try_init().map_err(InitializationError::from)?;

    Ok(log_file)
}
