//! Highlight and scroll bookkeeping for windowed lists.

use std::ops::Range;

/// Number of rows a list shows at once.
pub const VISIBLE_ROWS: usize = 10;

/// Highlighted index plus the first visible row of a list.
///
/// The highlight always stays inside `offset..offset + VISIBLE_ROWS`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor {
    pub index: usize,
    pub offset: usize,
}

impl ListCursor {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn move_up(&mut self) {
        if self.index > 0 {
            self.index -= 1;
            if self.index < self.offset {
                self.offset = self.index;
            }
        }
    }

    pub fn move_down(&mut self, len: usize) {
        if self.index + 1 < len {
            self.index += 1;
            if self.index >= self.offset + VISIBLE_ROWS {
                self.offset = self.index + 1 - VISIBLE_ROWS;
            }
        }
    }

    /// Pulls the cursor back inside a list that shrank to `len` items.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.reset();
            return;
        }
        self.index = self.index.min(len - 1);
        self.offset = self.offset.min(self.index);
        if self.index >= self.offset + VISIBLE_ROWS {
            self.offset = self.index + 1 - VISIBLE_ROWS;
        }
    }

    /// Indices of the rows currently on screen.
    #[must_use]
    pub fn visible(&self, len: usize) -> Range<usize> {
        let start = self.offset.min(len);
        start..(start + VISIBLE_ROWS).min(len)
    }
}
