//! Theme management and ratatui style generation.
//!
//! This module defines the color scheme system for the explorer, supporting
//! built-in themes and custom themes loaded from TOML files. Colors are
//! written as hex strings and converted to 24-bit ratatui colors.
//!
//! # Built-in Themes
//!
//! - `kvexplorer-dark`: Dark theme (default)
//! - `kvexplorer-light`: Light theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! title_fg = "#89b4fa"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! input_border = "#f5c2e7"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! cursor_fg = "#1e1e2e"
//! cursor_bg = "#f9e2af"
//! header_fg = "#94e2d5"
//! status_fg = "#a6e3a1"
//! error_fg = "#f38ba8"
//! indicator_fg = "#cba6f7"
//! placeholder_fg = "#7f849c"
//! ```

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::domain::error::{ExplorerError, Result};
use crate::infrastructure::expand_tilde;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "kvexplorer-dark";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Screen title.
    pub title_fg: String,
    /// Regular text: values, keys, list rows.
    pub text_normal: String,
    /// Help line and secondary labels.
    pub text_dim: String,

    /// Borders of value and inactive input boxes.
    pub border: String,
    /// Border of the focused input box.
    pub input_border: String,

    /// Highlighted list row.
    pub selection_fg: String,
    pub selection_bg: String,

    /// Block cursor in the viewer and editor.
    pub cursor_fg: String,
    pub cursor_bg: String,

    /// List headers and field labels.
    pub header_fg: String,
    /// Status messages for completed operations.
    pub status_fg: String,
    /// Status messages for failed operations.
    pub error_fg: String,
    /// Mode indicator and editor sub-mode label.
    pub indicator_fg: String,
    /// Placeholders and empty-list messages.
    pub placeholder_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` if the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "kvexplorer-dark" => include_str!("../../themes/kvexplorer-dark.toml"),
            "kvexplorer-light" => include_str!("../../themes/kvexplorer-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| ExplorerError::Config(format!("failed to parse theme TOML: {e}")))
    }

    /// Resolves the theme for `config`: `theme_file`, then `theme`, then the default.
    ///
    /// Unreadable or unknown themes are logged and replaced by the default.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        if let Some(file) = &config.theme_file {
            match Self::from_file(expand_tilde(file)) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(theme_file = %file, error = %e, "failed to load theme file, using default"),
            }
        }
        if let Some(name) = &config.theme {
            match Self::from_name(name) {
                Some(theme) => return theme,
                None => tracing::warn!(theme = %name, "unknown theme, using default"),
            }
        }
        Self::default()
    }

    /// Converts a hex color to a ratatui RGB color.
    ///
    /// Strips `#` prefix if present. Malformed input yields white.
    #[must_use]
    pub fn color(hex: &str) -> Color {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Color::Rgb(255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        Color::Rgb(channel(0..2), channel(2..4), channel(4..6))
    }

    fn fg(hex: &str) -> Style {
        Style::default().fg(Self::color(hex))
    }

    #[must_use]
    pub fn title(&self) -> Style {
        Self::fg(&self.colors.title_fg).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text(&self) -> Style {
        Self::fg(&self.colors.text_normal)
    }

    #[must_use]
    pub fn dim(&self) -> Style {
        Self::fg(&self.colors.text_dim)
    }

    #[must_use]
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Self::fg(&self.colors.input_border)
        } else {
            Self::fg(&self.colors.border)
        }
    }

    #[must_use]
    pub fn selection(&self) -> Style {
        Self::fg(&self.colors.selection_fg)
            .bg(Self::color(&self.colors.selection_bg))
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn cursor(&self) -> Style {
        Self::fg(&self.colors.cursor_fg).bg(Self::color(&self.colors.cursor_bg))
    }

    #[must_use]
    pub fn header(&self) -> Style {
        Self::fg(&self.colors.header_fg).add_modifier(Modifier::BOLD)
    }

    /// Status line style; failures use the error color.
    #[must_use]
    pub fn status(&self, is_error: bool) -> Style {
        if is_error {
            Self::fg(&self.colors.error_fg)
        } else {
            Self::fg(&self.colors.status_fg)
        }
    }

    #[must_use]
    pub fn indicator(&self) -> Style {
        Self::fg(&self.colors.indicator_fg).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn placeholder(&self) -> Style {
        Self::fg(&self.colors.placeholder_fg).add_modifier(Modifier::ITALIC)
    }

    /// Terminal-default palette used if the built-in theme cannot be parsed.
    fn fallback() -> Self {
        let white = "#ffffff".to_string();
        let grey = "#808080".to_string();
        let black = "#000000".to_string();
        Self {
            name: "fallback".to_string(),
            colors: ThemeColors {
                title_fg: white.clone(),
                text_normal: white.clone(),
                text_dim: grey.clone(),
                border: grey.clone(),
                input_border: white.clone(),
                selection_fg: black.clone(),
                selection_bg: white.clone(),
                cursor_fg: black,
                cursor_bg: white.clone(),
                header_fg: white.clone(),
                status_fg: white.clone(),
                error_fg: "#ff0000".to_string(),
                indicator_fg: white,
                placeholder_fg: grey,
            },
        }
    }
}

impl Default for Theme {
    /// Returns the default theme (`kvexplorer-dark`).
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(Self::fallback)
    }
}
