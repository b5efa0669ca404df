//! Log file setup for host applications
//!
//! The engine only emits `tracing` events; a host that wants them on disk
//! calls [`init_file_logging`] once at startup and keeps the guard alive.

use std::path::Path;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_DIRECTIVE: &str = "puyors=debug";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to open log file: {0}")]
    Appender(#[from] InitError),
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("a global subscriber is already installed")]
    AlreadyInstalled,
}

/// Build the env filter from `RUST_LOG`, falling back to [`DEFAULT_DIRECTIVE`]
pub fn env_filter() -> Result<EnvFilter, LoggingError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(rust_log.as_deref())
}

fn filter_from(rust_log: Option<&str>) -> Result<EnvFilter, LoggingError> {
    let directives = match rust_log {
        Some(value) if !value.trim().is_empty() => value,
        _ => DEFAULT_DIRECTIVE,
    };
    Ok(EnvFilter::try_new(directives)?)
}

/// Install a global subscriber writing to `dir/file_name`
///
/// Events are written from a background thread; dropping the returned
/// guard flushes it.
pub fn init_file_logging(dir: &Path, file_name: &str) -> Result<WorkerGuard, LoggingError> {
    std::fs::create_dir_all(dir)?;
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter()?)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)?;

    tracing::info!(log = %dir.join(file_name).display(), "puyors logging started");
    Ok(guard)
}
