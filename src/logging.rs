//! `tracing` subscriber setup with console and file toggles.

use crate::config::LoggingConfig;
use crate::error::ConfigError;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over the configured filter.
/// Call once; a second call fails because a global subscriber is already set.
///
/// With file logging on, the returned guard owns the background writer and must
/// stay alive until shutdown or buffered lines are lost.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| ConfigError::Logging(e.to_string()))?;

    let console = config.enable_console_log.then(fmt::layer);

    let (file, guard) = if config.enable_file_log {
        let (writer, guard) = file_writer(&config.log_file)?;
        (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))?;
    Ok(guard)
}

/// Non-blocking appender for `path`. The directory is created if missing.
fn file_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard), ConfigError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| ConfigError::Logging(format!("{}: not a file path", path.display())))?;
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .map_err(|e| ConfigError::Logging(format!("{}: {}", path.display(), e)))?;
    Ok(tracing_appender::non_blocking(appender))
}
