//! Explorer configuration loaded from a JSON file.
//!
//! The file defaults to `$HOME/.kvexplorer.json`. When it does not exist a
//! default one is written so the user has something to edit; a failure to
//! write it only produces a warning.
//!
//! ```json
//! {
//!   "address": ["127.0.0.1:2379"],
//!   "pd_address": ["127.0.0.1:2379"],
//!   "user": "",
//!   "passwd": "",
//!   "backend": "tikv",
//!   "scan_limit": 50,
//!   "theme": "kvexplorer-dark"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::app::state::DEFAULT_SCAN_LIMIT;
use crate::domain::error::{ExplorerError, Result};
use crate::infrastructure::{default_data_file, expand_tilde};

const DEFAULT_ENDPOINT: &str = "127.0.0.1:2379";

/// Which [`Store`](crate::storage::Store) implementation to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// TiKV raw KV through the placement driver (cargo feature `tikv`).
    Tikv,
    /// Local JSON snapshot at `data_file`.
    File,
    /// In-process map, lost on exit.
    Memory,
}

impl Default for BackendKind {
    fn default() -> Self {
        if cfg!(feature = "tikv") {
            Self::Tikv
        } else {
            Self::File
        }
    }
}

/// Outcome of [`Config::load_or_create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from an existing file.
    Loaded,
    /// File was missing; defaults were written to it.
    Created,
    /// File was missing and could not be written; defaults are in use.
    Defaulted(String),
}

/// Explorer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cluster addresses. Informational; connections go through `pd_address`.
    pub address: Vec<String>,

    /// Placement driver endpoints used to connect to TiKV.
    pub pd_address: Vec<String>,

    /// Reserved for authenticated clusters; not sent by the raw client.
    pub user: String,

    /// Reserved for authenticated clusters; not sent by the raw client.
    pub passwd: String,

    pub backend: BackendKind,

    /// Snapshot path for the `file` backend. `~` is expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<String>,

    /// Maximum entries per scan. Default: 50
    pub scan_limit: usize,

    /// Built-in theme name: `kvexplorer-dark` or `kvexplorer-light`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_file: Option<String>,

    /// Log filter used when `RUST_LOG` is unset, e.g. `debug`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: vec![DEFAULT_ENDPOINT.to_string()],
            pd_address: vec![DEFAULT_ENDPOINT.to_string()],
            user: String::new(),
            passwd: String::new(),
            backend: BackendKind::default(),
            data_file: None,
            scan_limit: DEFAULT_SCAN_LIMIT,
            theme: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Loads the config at `path`, writing defaults there if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_create(path: &Path) -> Result<(Self, ConfigSource)> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config = serde_json::from_str(&contents).map_err(|e| {
                ExplorerError::Config(format!("failed to parse {}: {e}", path.display()))
            })?;
            return Ok((config, ConfigSource::Loaded));
        }

        let config = Self::default();
        let source = match config.save(path) {
            Ok(()) => ConfigSource::Created,
            Err(e) => ConfigSource::Defaulted(e.to_string()),
        };
        Ok((config, source))
    }

    /// Writes the config as pretty JSON with a two-space indent.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ExplorerError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, json + "\n")?;
        Ok(())
    }

    /// Replaces the PD endpoints with a comma-separated list, if given.
    pub fn apply_endpoints(&mut self, endpoints: Option<&str>) {
        if let Some(list) = endpoints {
            self.pd_address = list
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(String::from)
                .collect();
        }
    }

    /// Checks settings that would only fail later at connect time.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Config`] for a TiKV backend without endpoints
    /// or a zero scan limit.
    pub fn validate(&self) -> Result<()> {
        if self.backend == BackendKind::Tikv && self.pd_address.is_empty() {
            return Err(ExplorerError::Config("no PD endpoints specified".to_string()));
        }
        if self.scan_limit == 0 {
            return Err(ExplorerError::Config("scan_limit must be positive".to_string()));
        }
        Ok(())
    }

    /// Resolved snapshot path for the `file` backend.
    #[must_use]
    pub fn data_file_path(&self) -> PathBuf {
        self.data_file
            .as_deref()
            .map_or_else(default_data_file, expand_tilde)
    }
}
