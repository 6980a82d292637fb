//! Path resolution for configuration, data and log files.
//!
//! The config file lives in the home directory; everything the explorer
//! writes on its own (log file, local store snapshot) goes under the platform
//! data directory, e.g. `~/.local/share/kvexplorer` on Linux.

use std::path::PathBuf;

const APP_DIR: &str = "kvexplorer";
const CONFIG_FILE: &str = ".kvexplorer.json";

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default config file path, `$HOME/.kvexplorer.json`.
#[must_use]
pub fn default_config_path() -> PathBuf {
    home_dir().join(CONFIG_FILE)
}

/// Returns the data directory for logs and the local store snapshot.
///
/// Falls back to `$HOME/.kvexplorer` when the platform has no data directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(|| home_dir().join(".kvexplorer"), |dir| dir.join(APP_DIR))
}

/// Default location of the `file` backend snapshot.
#[must_use]
pub fn default_data_file() -> PathBuf {
    get_data_dir().join("store.json")
}

/// Default location of the rotated log file.
#[must_use]
pub fn default_log_file() -> PathBuf {
    get_data_dir().join("kvexplorer.log")
}

/// Expands a leading `~` to the home directory.
///
/// ```
/// use kvexplorer::infrastructure::expand_tilde;
///
/// let path = expand_tilde("/absolute/path");
/// assert_eq!(path.to_str(), Some("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        home_dir()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else {
        PathBuf::from(path)
    }
}
