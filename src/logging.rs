//! File logging.
//!
//! The terminal UI owns stdout, so log output goes to a daily-rolling file
//! under `<data dir>/kisetsu/logs` instead. `RUST_LOG` takes precedence over
//! the configured level.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::{APP_DIR, LoggingConfig},
    error::{Error, Result},
};

/// Log file prefix; the appender adds the date.
const LOG_FILE_PREFIX: &str = "kisetsu.log";

/// Directory log files are written to.
pub fn log_dir(config: &LoggingConfig) -> PathBuf {
    config.directory.clone().unwrap_or_else(|| {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR)
            .join("logs")
    })
}

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(level: &str) -> String {
    format!("kisetsu={level},kisetsu_tui={level},hyper=warn,reqwest=warn,h2=warn")
}

/// Installs the global subscriber.
///
/// Returns `None` when logging is disabled. Otherwise keep the returned guard
/// alive for the lifetime of the program, dropping it flushes the writer.
///
/// # Errors
///
/// * [`Error::Io`] - the log directory cannot be created
/// * [`Error::Other`] - a global subscriber is already installed
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    if !config.enabled {
        return Ok(None);
    }

    let dir = log_dir(config);
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&config.level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init()
        .map_err(|e| Error::Other(format!("Failed to initialize logging: {}", e)))?;

    tracing::info!(log_dir = %dir.display(), "logging initialized");
    Ok(Some(guard))
}
