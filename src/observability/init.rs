//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber: an `EnvFilter` in front of
//! a fmt layer that writes plain-text events to the rotating log file.

use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::file_writer::FileWriter;
use crate::config::Config;
use crate::infrastructure::paths;

static LOG_FILE: OnceLock<PathBuf> = OnceLock::new();

/// Filter directives: `RUST_LOG` wins, then `trace_level`, then `info`.
fn filter_directives(config: &Config, env: Option<String>) -> String {
    env.filter(|value| !value.trim().is_empty())
        .or_else(|| config.trace_level.clone())
        .unwrap_or_else(|| "info".to_string())
}

/// Initializes the tracing subscriber with file output.
///
/// Events go to `<data dir>/kvexplorer.log`, never to the terminal.
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently gives up if that fails (logging is optional)
/// - Idempotent: only the first call installs a subscriber
///
/// Returns the log file path once tracing is active.
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    if let Some(path) = LOG_FILE.get() {
        return Some(path.clone());
    }

    let data_dir = paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return None;
    }

    let directives = filter_directives(config, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));

    let log_file = paths::default_log_file();
    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(FileWriter::new(log_file.clone()));

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .ok()?;

    tracing::info!(filter = %directives, version = env!("CARGO_PKG_VERSION"), "tracing initialized");
    Some(LOG_FILE.get_or_init(|| log_file).clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_filter_wins_over_config() {
        let config = Config {
            trace_level: Some("debug".to_string()),
            ..Config::default()
        };
        assert_eq!(filter_directives(&config, Some("warn".into())), "warn");
        assert_eq!(filter_directives(&config, None), "debug");
        assert_eq!(filter_directives(&config, Some("  ".into())), "debug");
        assert_eq!(filter_directives(&Config::default(), None), "info");
    }
}
