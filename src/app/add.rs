//! Add wizard: collects a key, then a (possibly multi-line) value.

use crate::app::handler::Key;

/// Field currently receiving input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AddStep {
    #[default]
    Key,
    Value,
}

/// Request produced by a key in the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Continue,
    Cancel,
    Submit { key: String, value: String },
}

/// Both wizard fields and the cursor (in characters) of the active one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddState {
    key: String,
    value: String,
    step: AddStep,
    cursor: usize,
}

impl AddState {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn step(&self) -> AddStep {
        self.step
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    fn has_key(&self) -> bool {
        !self.key.trim().is_empty()
    }

    fn field_mut(&mut self) -> &mut String {
        match self.step {
            AddStep::Key => &mut self.key,
            AddStep::Value => &mut self.value,
        }
    }

    fn field_len(&self) -> usize {
        match self.step {
            AddStep::Key => self.key.chars().count(),
            AddStep::Value => self.value.chars().count(),
        }
    }

    fn switch_to(&mut self, step: AddStep) {
        self.step = step;
        self.cursor = self.field_len();
    }

    fn insert(&mut self, c: char) {
        let cursor = self.cursor;
        let field = self.field_mut();
        let offset = field.char_indices().nth(cursor).map_or(field.len(), |(i, _)| i);
        field.insert(offset, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let cursor = self.cursor;
        let field = self.field_mut();
        if let Some((offset, _)) = field.char_indices().nth(cursor) {
            field.remove(offset);
        }
    }

    pub fn handle_key(&mut self, key: &Key) -> AddOutcome {
        match (key, self.step) {
            (Key::Esc, _) => return AddOutcome::Cancel,
            (Key::Save, _) => {
                if self.has_key() {
                    return AddOutcome::Submit {
                        key: self.key.trim().to_string(),
                        value: self.value.clone(),
                    };
                }
            }
            (Key::Tab | Key::Enter, AddStep::Key) => {
                if self.has_key() {
                    self.switch_to(AddStep::Value);
                }
            }
            (Key::Tab, AddStep::Value) => self.switch_to(AddStep::Key),
            (Key::Enter, AddStep::Value) => self.insert('\n'),
            (Key::Left, _) => self.cursor = self.cursor.saturating_sub(1),
            (Key::Right, _) => {
                if self.cursor < self.field_len() {
                    self.cursor += 1;
                }
            }
            (Key::Backspace, _) => self.backspace(),
            (Key::Char(c), _) => self.insert(*c),
            _ => {}
        }
        AddOutcome::Continue
    }
}
