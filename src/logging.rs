use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::error::{FinderError, Result};

/// Install the process-wide subscriber: compact INFO output on stdout and a
/// verbose DEBUG log in `log_path`. Call once, from a binary.
///
/// The returned guard flushes the file writer on drop, so keep it alive
/// until the program exits.
pub fn configure_logging(log_path: &Path) -> Result<WorkerGuard> {
    let logging_err = |source: io::Error| FinderError::Logging {
        path: log_path.to_path_buf(),
        source,
    };

    let directory = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(directory).map_err(logging_err)?;

    let file_name = log_path.file_name().ok_or_else(|| {
        logging_err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "log path has no file name",
        ))
    })?;

    // Stdout log configuration
    let stdout_log = fmt::layer()
        .with_writer(io::stdout)
        .with_target(false)
        .with_filter(EnvFilter::new("info"));

    // File log configuration
    let file_appender = rolling::never(directory, file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_log = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::Registry::default()
        .with(stdout_log)
        .with(file_log)
        .init();

    tracing::debug!("Logger initialized; writing to {}", log_path.display());
    Ok(guard)
}
