//! Debug logging support for sfmx
//!
//! When debug logging is enabled in the config, read and write operations are
//! logged to the configured file, or to stderr when no file is set.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

/// Initialize the debug logging system
///
/// Returns the log file path when logging to a file, `None` when logging is
/// disabled or goes to stderr.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    if !config.debug {
        return Ok(None);
    }

    let filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid logging level: {}", config.level))?;

    let Some(log_path) = config.log_file.clone() else {
        let subscriber = registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .with(filter);
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;
        return Ok(None);
    };

    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let subscriber = registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(log_file))
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    Ok(Some(log_path))
}
