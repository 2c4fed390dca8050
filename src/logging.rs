//! Logging setup for the optimizer.
//!
//! Diagnostics go to the console and to a daily-rolling file in the
//! platform data directory. When that directory is unavailable the file
//! layer is dropped and only the console is used.
//!
//! ```no_run
//! data_optimizer::logging::init(false).expect("Failed to initialize logging");
//! tracing::info!("Optimizer started");
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/data-optimizer/logs`
/// - macOS: `~/Library/Application Support/data-optimizer/logs`
/// - Linux: `~/.local/share/data-optimizer/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    let log_dir = base_dir.join("data-optimizer").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

/// Installs the global subscriber.
///
/// The level defaults to `info` (`debug` when `verbose` is set) and can be
/// overridden with `RUST_LOG`.
///
/// # Errors
///
/// Returns error if the filter is invalid or a subscriber is already set.
pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("Failed to create env filter")?;

    let console_layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr);

    let (file_layer, log_dir) = match get_log_dir().and_then(|dir| {
        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .max_log_files(10)
            .filename_prefix("data-optimizer")
            .filename_suffix("log")
            .build(&dir)
            .context("Failed to create file appender")
            .map(|appender| (appender, dir))
    }) {
        Ok((appender, dir)) => {
            let layer = fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(appender)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(dir))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    match log_dir {
        Some(dir) => tracing::debug!("Logging initialized, log directory: {}", dir.display()),
        None => tracing::debug!("Logging initialized (console only)"),
    }

    Ok(())
}
