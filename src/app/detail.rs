//! Detail viewer: one entry, its formatted value and a navigation cursor.

use std::borrow::Cow;

use crate::app::handler::Key;
use crate::app::modes::{DeleteGesture, DetailView, GestureStep};
use crate::domain::display_text;
use crate::editor::{EditBuffer, EditorMode, EditorState};
use crate::format::{format_content, Format};

/// Viewer over the pretty-printed value of one key.
///
/// The cursor lives in an [`EditBuffer`] built from the formatted text, so it
/// follows the same clamping and wrapping rules as the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailState {
    /// Key as stored; may be binary.
    pub key: Vec<u8>,
    /// Value text; invalid UTF-8 is shown replaced.
    pub value: String,
    pub format: Format,
    pub view: DetailView,
    pub gesture: DeleteGesture,
    lines: EditBuffer,
}

/// Request produced by a key in the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    Stay,
    Back,
    Delete,
    /// Open the editor in insert mode; at column 0 when `line_start`.
    Edit { line_start: bool },
}

impl DetailState {
    #[must_use]
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<String>) -> Self {
        let value = value.into();
        let (formatted, format) = format_content(&value);
        Self {
            key: key.into(),
            value,
            format,
            view: DetailView::Command,
            gesture: DeleteGesture::default(),
            lines: EditBuffer::from_text(&formatted),
        }
    }

    #[must_use]
    pub fn key_text(&self) -> Cow<'_, str> {
        display_text(&self.key)
    }

    /// Formatted value as displayed.
    #[must_use]
    pub fn formatted(&self) -> String {
        self.lines.text()
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        self.lines.lines()
    }

    #[must_use]
    pub const fn cursor(&self) -> (usize, usize) {
        self.lines.cursor()
    }

    /// Replaces the value after a save, keeping the cursor as close as possible.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let (line, col) = self.lines.cursor();
        self.value = value.into();
        let (formatted, format) = format_content(&self.value);
        self.format = format;
        self.lines = EditBuffer::from_text(&formatted);
        self.lines.set_cursor(line, col);
    }

    /// Builds an editor over the displayed lines.
    #[must_use]
    pub fn open_editor(&self, line_start: bool) -> EditorState {
        let mut buffer = self.lines.clone();
        if line_start {
            buffer.move_to_line_start();
        }
        EditorState::new(self.key.clone(), buffer, EditorMode::Insert)
    }

    pub fn handle_key(&mut self, key: &Key) -> DetailOutcome {
        if *key == Key::Esc {
            self.gesture.reset();
            return DetailOutcome::Back;
        }

        match self.view {
            DetailView::Command => self.handle_command(key),
            DetailView::Plain => match key {
                Key::Char('c') => {
                    self.view = DetailView::Command;
                    DetailOutcome::Stay
                }
                Key::Char('i') => DetailOutcome::Edit { line_start: false },
                Key::Char('I') => DetailOutcome::Edit { line_start: true },
                _ => DetailOutcome::Stay,
            },
        }
    }

    fn handle_command(&mut self, key: &Key) -> DetailOutcome {
        match self.gesture.advance(key) {
            GestureStep::Armed => return DetailOutcome::Stay,
            GestureStep::Fired => return DetailOutcome::Delete,
            GestureStep::Passed => {}
        }

        match key {
            Key::Char('i') => return DetailOutcome::Edit { line_start: false },
            Key::Char('I') => return DetailOutcome::Edit { line_start: true },
            Key::Char('v') => self.view = DetailView::Plain,
            Key::Char('h') => self.lines.move_left(),
            Key::Char('l') => self.lines.move_right(),
            Key::Char('j') => self.lines.move_down(),
            Key::Char('k') => self.lines.move_up(),
            _ => {}
        }
        DetailOutcome::Stay
    }
}
