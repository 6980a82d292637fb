//! Command-line entry point.
//!
//! Loads the configuration, starts file logging, opens the configured store
//! and hands the terminal to the interactive runtime.
//!
//! # Startup
//!
//! 1. Parse flags (`--config`, `--endpoints`)
//! 2. Load the config file, writing a default one if it is missing
//! 3. Initialize tracing (file only)
//! 4. Open the store; a TiKV connection failure aborts here
//! 5. Run the event loop until `Esc` on the palette or Ctrl-C
//!
//! Startup failures are reported on stderr before the terminal is touched.

#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use kvexplorer::config::ConfigSource;
use kvexplorer::infrastructure::{default_config_path, expand_tilde};
use kvexplorer::runtime::Runtime;
use kvexplorer::{initialize, observability, storage, Config, Theme};

#[derive(Debug, Parser)]
#[command(name = "kvexplorer")]
#[command(version)]
#[command(about = "Interactive terminal explorer and editor for key-value stores")]
struct Cli {
    /// Config file path (default: ~/.kvexplorer.json)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Comma-separated PD endpoints, overriding `pd_address` from the config
    #[arg(short, long, value_name = "HOST:PORT,...")]
    endpoints: Option<String>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let path: PathBuf = cli
        .config
        .as_deref()
        .map_or_else(default_config_path, expand_tilde);

    let (mut config, source) = Config::load_or_create(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    match source {
        ConfigSource::Loaded => {}
        ConfigSource::Created => {
            println!("Created default config file: {}", path.display());
            println!("Please edit the config file with your connection details.");
        }
        ConfigSource::Defaulted(reason) => {
            eprintln!("Warning: Could not create config file: {reason}");
        }
    }

    config.apply_endpoints(cli.endpoints.as_deref());
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if let Some(log_file) = observability::init_tracing(&config) {
        tracing::debug!(path = %log_file.display(), "logging to file");
    }
    tracing::info!(backend = ?config.backend, endpoints = ?config.pd_address, "starting kvexplorer");

    let store = storage::open_store(&config)
        .await
        .context("Failed to open store")?;

    let theme = Theme::from_config(&config);
    let runtime = Runtime::new(store, initialize(&config), theme);

    let result = runtime.run().await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "interactive loop failed");
    }
    result
}
