//! Modal text editor.
//!
//! A small vi-like automaton over an [`EditBuffer`]. The editor owns no I/O:
//! [`EditorState::handle_key`] mutates the buffer and reports through an
//! [`EditorOutcome`] when the caller has to persist the text or close the
//! editor.
//!
//! # Sub-modes
//!
//! - **Command**: `i I a A o O` enter insert mode, `h j k l` (and arrows) move,
//!   `dd` deletes the line, `:` opens the command line, `Esc` closes the editor.
//! - **Insert**: printable characters are inserted, `Enter` splits the line,
//!   `Backspace` deletes or joins lines, arrows move, `Esc` back to command.
//! - **Command line**: collects `:w`, `:x`, `:wq`, `:q`, `:q!`; `Enter` runs it,
//!   `Esc` abandons it.
//!
//! `Ctrl-S` saves without leaving the editor from command and insert mode.

pub mod buffer;
pub mod command_line;

pub use buffer::EditBuffer;
pub use command_line::{CommandLine, ExCommand};

use crate::app::handler::Key;
use crate::app::modes::{DeleteGesture, GestureStep};

/// Editor sub-mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorMode {
    #[default]
    Command,
    Insert,
    CommandLine(CommandLine),
}

impl EditorMode {
    /// Status-line label for the sub-mode.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Command => "-- COMMAND --",
            Self::Insert => "-- INSERT --",
            Self::CommandLine(_) => "-- COMMAND LINE --",
        }
    }
}

/// What the caller should do after a key was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    Continue,
    /// Close the editor without saving.
    Discard,
    /// Persist `value`; leave the editor once the save succeeds if `exit_after`.
    Save { value: String, exit_after: bool },
}

/// Editing session over the value stored under `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    /// Key the buffer is saved under, as stored.
    pub key: Vec<u8>,
    pub buffer: EditBuffer,
    pub mode: EditorMode,
    pub gesture: DeleteGesture,
}

impl EditorState {
    #[must_use]
    pub fn new(key: impl Into<Vec<u8>>, buffer: EditBuffer, mode: EditorMode) -> Self {
        Self {
            key: key.into(),
            buffer,
            mode,
            gesture: DeleteGesture::default(),
        }
    }

    #[must_use]
    pub fn command_line(&self) -> Option<&str> {
        match &self.mode {
            EditorMode::CommandLine(line) => Some(line.as_str()),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: &Key) -> EditorOutcome {
        match self.mode {
            EditorMode::Command => self.handle_command(key),
            EditorMode::Insert => self.handle_insert(key),
            EditorMode::CommandLine(_) => self.handle_command_line(key),
        }
    }

    fn save(&self, exit_after: bool) -> EditorOutcome {
        EditorOutcome::Save {
            value: self.buffer.text(),
            exit_after,
        }
    }

    fn handle_command(&mut self, key: &Key) -> EditorOutcome {
        match self.gesture.advance(key) {
            GestureStep::Armed => return EditorOutcome::Continue,
            GestureStep::Fired => {
                tracing::debug!(line = self.buffer.cursor().0, "deleting line");
                self.buffer.delete_line();
                return EditorOutcome::Continue;
            }
            GestureStep::Passed => {}
        }

        let buf = &mut self.buffer;
        match key {
            Key::Esc => return EditorOutcome::Discard,
            Key::Save => return self.save(false),
            Key::Char('i') => self.mode = EditorMode::Insert,
            Key::Char('I') => {
                buf.move_to_line_start();
                self.mode = EditorMode::Insert;
            }
            Key::Char('a') => {
                buf.step_past_cursor();
                self.mode = EditorMode::Insert;
            }
            Key::Char('A') => {
                buf.move_to_line_end();
                self.mode = EditorMode::Insert;
            }
            Key::Char('o') => {
                buf.open_below();
                self.mode = EditorMode::Insert;
            }
            Key::Char('O') => {
                buf.open_above();
                self.mode = EditorMode::Insert;
            }
            Key::Char('h') | Key::Left => buf.move_left(),
            Key::Char('l') | Key::Right => buf.move_right(),
            Key::Char('j') | Key::Down => buf.move_down(),
            Key::Char('k') | Key::Up => buf.move_up(),
            Key::Char(':') => self.mode = EditorMode::CommandLine(CommandLine::default()),
            _ => {}
        }
        EditorOutcome::Continue
    }

    fn handle_insert(&mut self, key: &Key) -> EditorOutcome {
        let buf = &mut self.buffer;
        match key {
            Key::Esc => self.mode = EditorMode::Command,
            Key::Save => return self.save(false),
            Key::Enter => buf.split_line(),
            Key::Backspace => buf.backspace(),
            Key::Left => buf.move_left(),
            Key::Right => buf.move_right(),
            Key::Up => buf.move_up(),
            Key::Down => buf.move_down(),
            Key::Char(c) => buf.insert_char(*c),
            _ => {}
        }
        EditorOutcome::Continue
    }

    fn handle_command_line(&mut self, key: &Key) -> EditorOutcome {
        let EditorMode::CommandLine(line) = &mut self.mode else {
            return EditorOutcome::Continue;
        };

        match key {
            Key::Esc => self.mode = EditorMode::Command,
            Key::Backspace => line.backspace(),
            Key::Char(c) => line.push(*c),
            Key::Enter => {
                let command = line.command();
                tracing::debug!(input = %line.as_str(), command = ?command, "command line submitted");
                self.mode = EditorMode::Command;
                return match command {
                    Some(ExCommand::Write) => self.save(false),
                    Some(ExCommand::WriteQuit) => self.save(true),
                    Some(ExCommand::Quit) => EditorOutcome::Discard,
                    None => EditorOutcome::Continue,
                };
            }
            _ => {}
        }
        EditorOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn editor(text: &str) -> EditorState {
        EditorState::new("k", EditBuffer::from_text(text), EditorMode::Command)
    }

    fn type_keys(ed: &mut EditorState, keys: &str) -> EditorOutcome {
        let mut last = EditorOutcome::Continue;
        for c in keys.chars() {
            last = ed.handle_key(&Key::Char(c));
        }
        last
    }

    #[test]
    fn insert_variants_position_cursor() {
        let mut ed = editor("hello");
        ed.buffer.set_cursor(0, 2);
        ed.handle_key(&Key::Char('I'));
        assert_eq!(ed.mode, EditorMode::Insert);
        assert_eq!(ed.buffer.cursor(), (0, 0));

        ed.handle_key(&Key::Esc);
        ed.handle_key(&Key::Char('A'));
        assert_eq!(ed.buffer.cursor(), (0, 5));

        ed.handle_key(&Key::Esc);
        assert_eq!(ed.mode, EditorMode::Command);
        assert_eq!(ed.buffer.cursor(), (0, 5));
        ed.handle_key(&Key::Char('a'));
        assert_eq!(ed.buffer.cursor(), (0, 5));

        ed.handle_key(&Key::Esc);
        ed.buffer.set_cursor(0, 1);
        ed.handle_key(&Key::Char('a'));
        assert_eq!(ed.buffer.cursor(), (0, 2));
    }

    #[test]
    fn open_line_below_and_type() {
        let mut ed = editor("a\nb");
        ed.handle_key(&Key::Char('o'));
        type_keys(&mut ed, "new");
        assert_eq!(ed.buffer.text(), "a\nnew\nb");
        ed.handle_key(&Key::Esc);
        ed.handle_key(&Key::Char('O'));
        assert_eq!(ed.buffer.text(), "a\n\nnew\nb");
        assert_eq!(ed.buffer.cursor(), (1, 0));
    }

    #[test]
    fn double_d_deletes_line() {
        let mut ed = editor("one\ntwo\nthree");
        ed.handle_key(&Key::Char('j'));
        type_keys(&mut ed, "dd");
        assert_eq!(ed.buffer.text(), "one\nthree");
        assert_eq!(ed.buffer.cursor(), (1, 0));
    }

    #[test]
    fn interrupted_gesture_does_not_delete() {
        let mut ed = editor("one\ntwo");
        type_keys(&mut ed, "dld");
        assert_eq!(ed.buffer.text(), "one\ntwo");
        assert!(ed.gesture.is_armed());
    }

    #[test]
    fn dd_on_last_line_clears_it() {
        let mut ed = editor("only");
        type_keys(&mut ed, "dd");
        assert_eq!(ed.buffer.lines(), [""]);
    }

    #[test]
    fn insert_mode_edits() {
        let mut ed = editor("ab");
        ed.handle_key(&Key::Char('A'));
        ed.handle_key(&Key::Enter);
        type_keys(&mut ed, "cd");
        ed.handle_key(&Key::Left);
        ed.handle_key(&Key::Left);
        ed.handle_key(&Key::Backspace);
        assert_eq!(ed.buffer.text(), "abcd");
        assert_eq!(ed.buffer.cursor(), (0, 2));
        // letters are text in insert mode
        type_keys(&mut ed, "dd:");
        assert_eq!(ed.buffer.text(), "abdd:cd");
        assert_eq!(ed.mode, EditorMode::Insert);
    }

    #[test]
    fn command_line_commands() {
        let mut ed = editor("v");
        ed.handle_key(&Key::Char(':'));
        assert_eq!(ed.command_line(), Some(":"));
        type_keys(&mut ed, "wq");
        assert_eq!(
            ed.handle_key(&Key::Enter),
            EditorOutcome::Save { value: "v".into(), exit_after: true }
        );
        assert_eq!(ed.mode, EditorMode::Command);

        type_keys(&mut ed, ":w");
        assert_eq!(
            ed.handle_key(&Key::Enter),
            EditorOutcome::Save { value: "v".into(), exit_after: false }
        );

        type_keys(&mut ed, ":q!");
        assert_eq!(ed.handle_key(&Key::Enter), EditorOutcome::Discard);

        type_keys(&mut ed, ":zz");
        assert_eq!(ed.handle_key(&Key::Enter), EditorOutcome::Continue);
        assert_eq!(ed.mode, EditorMode::Command);
    }

    #[test]
    fn command_line_escape_and_backspace() {
        let mut ed = editor("v");
        type_keys(&mut ed, ":w");
        ed.handle_key(&Key::Backspace);
        ed.handle_key(&Key::Backspace);
        ed.handle_key(&Key::Backspace);
        assert_eq!(ed.command_line(), Some(":"));
        ed.handle_key(&Key::Esc);
        assert_eq!(ed.mode, EditorMode::Command);
        assert_eq!(ed.buffer.text(), "v");
    }

    #[test]
    fn save_shortcut_keeps_editor_open() {
        let mut ed = editor("v");
        ed.handle_key(&Key::Char('i'));
        ed.handle_key(&Key::Char('x'));
        assert_eq!(
            ed.handle_key(&Key::Save),
            EditorOutcome::Save { value: "xv".into(), exit_after: false }
        );
        assert_eq!(ed.mode, EditorMode::Insert);
    }

    #[test]
    fn escape_in_command_mode_discards() {
        let mut ed = editor("v");
        assert_eq!(ed.handle_key(&Key::Esc), EditorOutcome::Discard);
    }
}
