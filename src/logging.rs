//! File logging.
//!
//! The TUI owns the terminal, so log output never goes to stdout or
//! stderr. When the user has enabled logs (or debug mode), events are
//! appended to `<config dir>/logs/mainframe.log`; otherwise no subscriber
//! writes anywhere.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::Config;

/// Log filename within the log directory.
const LOG_FILENAME: &str = "mainframe.log";

/// Environment variable overriding the default filter.
pub const LOG_ENV: &str = "MAINFRAME_LOG";

/// Whether the settings ask for a log file at all.
pub fn logging_enabled(config: &Config) -> bool {
    config.logs || config.debug
}

/// Default filter directive for the given settings.
pub fn default_directive(config: &Config) -> &'static str {
    if config.debug { "debug" } else { "info" }
}

/// Path of the log file inside `log_dir`.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILENAME)
}

fn open_log_file(log_dir: &Path) -> io::Result<File> {
    fs::create_dir_all(log_dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path(log_dir))
}

/// Install the global subscriber.
///
/// Returns the log file path when file logging is active. Failing to open
/// the file disables logging rather than corrupting the terminal.
pub fn init(config: &Config, log_dir: &Path) -> Option<PathBuf> {
    if !logging_enabled(config) {
        return None;
    }

    let file = open_log_file(log_dir).ok()?;
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(filter)
        .try_init();
    if installed.is_err() {
        return None;
    }

    let path = log_file_path(log_dir);
    tracing::info!(path = %path.display(), "logging initialized");
    Some(path)
}
