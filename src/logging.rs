use std::fs;
use tracing::warn;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

const DEFAULT_DIRECTIVE: &str = "qevent=info";

/// Initializes the logging system with both console and file output.
///
/// When the log directory cannot be used, logging continues on the console
/// only and no guard is returned. Otherwise hold the guard until exit; it
/// flushes the file writer on drop.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let (writer, guard, failure) = match open_file_writer(config) {
        Ok((writer, guard)) => (Some(writer), Some(guard), None),
        Err(reason) => (None, None, Some(reason)),
    };

    // JSON lines in the file
    let file_layer = writer.map(|w| fmt::layer().json().with_writer(w));

    // Console goes to stderr so listings on stdout stay pipeable
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    if let Some(reason) = failure {
        warn!("File logging disabled: {}", reason);
    }
    guard
}

/// Non-blocking daily-rolling appender under `config.dir`
fn open_file_writer(config: &LoggingConfig) -> Result<(NonBlocking, WorkerGuard), String> {
    fs::create_dir_all(&config.dir)
        .map_err(|e| format!("cannot create log directory {}: {}", config.dir, e))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(config.file_name.as_str())
        .build(&config.dir)
        .map_err(|e| format!("cannot open log file in {}: {}", config.dir, e))?;

    Ok(tracing_appender::non_blocking(appender))
}
