//! Structural detection and pretty-printing of stored values.
//!
//! Values are opaque text to the store. Before showing a value the detail
//! viewer asks this module which serialization it looks like and re-renders it
//! with canonical indentation:
//!
//! | Format | Accepted when | Output |
//! |--------|---------------|--------|
//! | JSON   | parses as JSON | 2-space indented |
//! | YAML   | parses as YAML and contains `:` or `-` | serializer default, trimmed |
//! | TOML   | parses as a TOML table and contains `=` or `[` | serializer default, trimmed |
//! | TEXT   | anything else, including empty input | unchanged |
//!
//! Detection runs on the whitespace-trimmed input and checks the formats in the
//! order of the table. Any failure while re-serializing falls back to the
//! original text, so callers never see an error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{ExplorerError, Result};

/// Serialization detected for a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    #[default]
    PlainText,
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Short label shown next to a value, e.g. `Value (JSON):`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
            Self::PlainText => "TEXT",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Detects the serialization of `content`.
#[must_use]
pub fn detect_format(content: &str) -> Format {
    let content = content.trim();
    if content.is_empty() {
        return Format::PlainText;
    }

    if is_json(content) {
        Format::Json
    } else if is_yaml(content) {
        Format::Yaml
    } else if is_toml(content) {
        Format::Toml
    } else {
        Format::PlainText
    }
}

/// Pretty-prints `content` in its detected format.
///
/// Returns the re-serialized text together with the format. Plain text, and
/// any value whose re-serialization fails, comes back unchanged.
#[must_use]
pub fn format_content(content: &str) -> (String, Format) {
    let format = detect_format(content);
    let pretty = match format {
        Format::Json => pretty_json(content),
        Format::Yaml => pretty_yaml(content),
        Format::Toml => pretty_toml(content),
        Format::PlainText => return (content.to_string(), format),
    };

    match pretty {
        Ok(text) => (text, format),
        Err(e) => {
            tracing::debug!(format = %format, error = %e, "Falling back to raw value text");
            (content.to_string(), format)
        }
    }
}

fn is_json(content: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(content).is_ok()
}

fn is_yaml(content: &str) -> bool {
    serde_yaml::from_str::<serde_yaml::Value>(content).is_ok()
        && (content.contains(':') || content.contains('-'))
}

fn is_toml(content: &str) -> bool {
    content.parse::<toml::Table>().is_ok() && (content.contains('=') || content.contains('['))
}

fn pretty_json(content: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(content.trim())
        .map_err(|e| ExplorerError::Format(format!("invalid JSON: {e}")))?;
    serde_json::to_string_pretty(&value)
        .map_err(|e| ExplorerError::Format(format!("cannot serialize JSON: {e}")))
}

fn pretty_yaml(content: &str) -> Result<String> {
    let value: serde_yaml::Value = serde_yaml::from_str(content.trim())
        .map_err(|e| ExplorerError::Format(format!("invalid YAML: {e}")))?;
    let text = serde_yaml::to_string(&value)
        .map_err(|e| ExplorerError::Format(format!("cannot serialize YAML: {e}")))?;
    Ok(text.trim().to_string())
}

fn pretty_toml(content: &str) -> Result<String> {
    let table: toml::Table = content
        .trim()
        .parse()
        .map_err(|e| ExplorerError::Format(format!("invalid TOML: {e}")))?;
    let text = toml::to_string(&table)
        .map_err(|e| ExplorerError::Format(format!("cannot serialize TOML: {e}")))?;
    Ok(text.trim().to_string())
}
