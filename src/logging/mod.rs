//! Application logging functionality
//!
//! Logs go to stderr through `tracing-subscriber`. With `--log-file` (or
//! `log_to_file` in settings.json) they are also written to a daily log file
//! in ~/.config/fontsmith/logs/.

use crate::core::config_file::ConfigFile;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Prefix of the daily log files.
pub const LOG_FILE_PREFIX: &str = "fontsmith.log";

#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    /// Log at debug level unless `RUST_LOG` says otherwise.
    pub verbose: bool,
    /// Also write logs to the log directory.
    pub to_file: bool,
}

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    ConfigFile::logs_dir()
}

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

/// Install the global subscriber.
///
/// The returned guard flushes the log file when dropped and must live until
/// the program exits. Installing twice is a no-op.
pub fn init(options: LogOptions) -> Option<WorkerGuard> {
    let (file_layer, guard) = if options.to_file {
        let dir = logs_dir();
        match fs::create_dir_all(&dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!("Failed to create log directory {:?}: {}", dir, e);
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let installed = tracing_subscriber::registry()
        .with(default_filter(options.verbose))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed && guard.is_some() {
        tracing::info!(
            "=== fontsmith started at {} ===",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        );
    }

    guard
}
