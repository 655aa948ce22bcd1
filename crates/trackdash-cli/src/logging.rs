//! File logging.
//!
//! The dashboard owns the terminal, so logs go to
//! `$TRACKDASH_HOME/logs/trackdash.log`. The filter comes from
//! `TRACKDASH_LOG`, then `[log] level` in config, then `info`.

use std::fs;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use trackdash_core::config::{LogConfig, paths};

const LOG_ENV: &str = "TRACKDASH_LOG";
const LOG_FILE: &str = "trackdash.log";

/// Installs the global subscriber. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn init(config: &LogConfig) -> Result<WorkerGuard> {
    let dir = paths::log_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(&dir)
        .with_context(|| format!("Failed to open log file in {}", dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter(config))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))?;

    Ok(guard)
}

fn filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
