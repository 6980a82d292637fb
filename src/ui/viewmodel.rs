//! View model types representing renderable UI state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) by
//! `compute_viewmodel()` and consumed by the renderer. They contain no
//! business logic, only display-ready text: truncation, placeholders, cursor
//! markers and scroll indicators are already applied.

/// Complete screen for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenViewModel {
    /// Bold title on the first line.
    pub title: String,
    pub body: ScreenBody,
    /// Transient status message, if any.
    pub status: Option<String>,
    /// Keybinding hints.
    pub help: String,
    /// Mode marker on the last line, e.g. `---Search---`.
    pub indicator: Option<String>,
}

/// Mode-specific part of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenBody {
    Palette {
        input: String,
        commands: ListView,
    },
    Search {
        input: String,
        searching: bool,
        results: ListView,
    },
    Detail {
        key: String,
        value_label: String,
        value: TextView,
    },
    Edit {
        key: String,
        value: TextView,
        mode_label: &'static str,
        /// Command line being typed, with its trailing cursor.
        command_line: Option<String>,
    },
    Add {
        step_label: &'static str,
        key: FieldView,
        value: FieldView,
        /// `Value (Detected: JSON):` while the value field is active.
        value_label: Option<String>,
    },
}

/// A windowed list with optional header and scroll indicator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub header: Option<String>,
    pub rows: Vec<ListRow>,
    /// `[a-b of n]` when the list is longer than the window.
    pub scroll: Option<String>,
    /// Shown instead of rows when there is nothing to list.
    pub empty_message: Option<String>,
}

/// One visible list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub text: String,
    pub is_selected: bool,
}

/// Multi-line text with an optional block cursor `(line, column)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextView {
    pub lines: Vec<String>,
    pub cursor: Option<(usize, usize)>,
    /// Replaces the content when the text is empty.
    pub placeholder: Option<String>,
}

/// Single wizard field; `text` already contains the cursor bar when active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub text: String,
    pub is_active: bool,
}
