//! Line buffer with a clamped cursor.
//!
//! Columns count characters, not bytes, so multi-byte text never splits a
//! code point. The cursor column may equal the line length, which places it
//! just past the last character.

/// Multi-line text buffer with a line/column cursor.
///
/// Always holds at least one line. `line < lines.len()` and
/// `col <= lines[line].chars().count()` hold after every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    lines: Vec<String>,
    line: usize,
    col: usize,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            line: 0,
            col: 0,
        }
    }
}

impl EditBuffer {
    /// Splits `text` on `'\n'`. Joining with [`EditBuffer::text`] gives the input back.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
            line: 0,
            col: 0,
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub const fn cursor(&self) -> (usize, usize) {
        (self.line, self.col)
    }

    #[must_use]
    pub fn current_line(&self) -> &str {
        self.lines.get(self.line).map_or("", String::as_str)
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |l| l.chars().count())
    }

    fn current_len(&self) -> usize {
        self.line_len(self.line)
    }

    /// Places the cursor, clamping both coordinates into range.
    pub fn set_cursor(&mut self, line: usize, col: usize) {
        self.line = line.min(self.lines.len().saturating_sub(1));
        self.col = col.min(self.current_len());
    }

    pub fn move_to_line_start(&mut self) {
        self.col = 0;
    }

    pub fn move_to_line_end(&mut self) {
        self.col = self.current_len();
    }

    /// Moves one column left, wrapping to the end of the previous line.
    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.line > 0 {
            self.line -= 1;
            self.col = self.current_len();
        }
    }

    /// Moves one column right, wrapping to the start of the next line.
    pub fn move_right(&mut self) {
        if self.col < self.current_len() {
            self.col += 1;
        } else if self.line + 1 < self.lines.len() {
            self.line += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.line > 0 {
            self.line -= 1;
            self.col = self.col.min(self.current_len());
        }
    }

    pub fn move_down(&mut self) {
        if self.line + 1 < self.lines.len() {
            self.line += 1;
            self.col = self.col.min(self.current_len());
        }
    }

    /// Advances one column unless already at the end of the line (vi `a`).
    pub fn step_past_cursor(&mut self) {
        if self.col < self.current_len() {
            self.col += 1;
        }
    }

    fn byte_offset(&self) -> usize {
        let line = self.current_line();
        line.char_indices()
            .nth(self.col)
            .map_or(line.len(), |(idx, _)| idx)
    }

    pub fn insert_char(&mut self, c: char) {
        let offset = self.byte_offset();
        if let Some(line) = self.lines.get_mut(self.line) {
            line.insert(offset, c);
            self.col += 1;
        }
    }

    /// Splits the current line at the cursor; the tail becomes a new line below.
    pub fn split_line(&mut self) {
        let offset = self.byte_offset();
        let tail = self
            .lines
            .get_mut(self.line)
            .map(|line| line.split_off(offset))
            .unwrap_or_default();
        self.lines.insert(self.line + 1, tail);
        self.line += 1;
        self.col = 0;
    }

    /// Deletes the character before the cursor.
    ///
    /// At column 0 of a non-first line the line is appended to the previous
    /// one and removed; the cursor lands on the join point.
    pub fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            let offset = self.byte_offset();
            if let Some(line) = self.lines.get_mut(self.line) {
                line.remove(offset);
            }
        } else if self.line > 0 {
            let removed = self.lines.remove(self.line);
            self.line -= 1;
            self.col = self.current_len();
            if let Some(prev) = self.lines.get_mut(self.line) {
                prev.push_str(&removed);
            }
        }
    }

    /// Inserts an empty line below the cursor line and moves onto it.
    pub fn open_below(&mut self) {
        self.lines.insert(self.line + 1, String::new());
        self.line += 1;
        self.col = 0;
    }

    /// Inserts an empty line above the cursor line and moves onto it.
    pub fn open_above(&mut self) {
        self.lines.insert(self.line, String::new());
        self.col = 0;
    }

    /// Removes the cursor line. A sole line is cleared instead.
    pub fn delete_line(&mut self) {
        if self.lines.len() == 1 {
            self.lines[0].clear();
        } else {
            self.lines.remove(self.line);
            if self.line >= self.lines.len() {
                self.line = self.lines.len() - 1;
            }
        }
        self.col = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_invariants(buf: &EditBuffer) {
        assert!(!buf.lines().is_empty());
        let (line, col) = buf.cursor();
        assert!(line < buf.lines().len(), "line {line} out of range");
        assert!(col <= buf.lines()[line].chars().count(), "col {col} out of range");
    }

    #[test]
    fn text_round_trips() {
        for text in ["", "a", "a\nb", "\n", "a\n\nb\n", "héllo\nwörld"] {
            let buf = EditBuffer::from_text(text);
            assert_eq!(buf.text(), text);
            assert_eq!(EditBuffer::from_text(&buf.text()), buf);
        }
    }

    #[test]
    fn horizontal_moves_wrap_between_lines() {
        let mut buf = EditBuffer::from_text("ab\ncd");
        buf.move_left();
        assert_eq!(buf.cursor(), (0, 0));

        buf.set_cursor(0, 2);
        buf.move_right();
        assert_eq!(buf.cursor(), (1, 0));
        buf.move_left();
        assert_eq!(buf.cursor(), (0, 2));

        buf.set_cursor(1, 2);
        buf.move_right();
        assert_eq!(buf.cursor(), (1, 2));
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let mut buf = EditBuffer::from_text("long line\nab");
        buf.set_cursor(0, 8);
        buf.move_down();
        assert_eq!(buf.cursor(), (1, 2));
        buf.move_down();
        assert_eq!(buf.cursor(), (1, 2));
        buf.move_up();
        assert_eq!(buf.cursor(), (0, 2));
        buf.move_up();
        assert_eq!(buf.cursor(), (0, 2));
    }

    #[test]
    fn insert_split_and_merge() {
        let mut buf = EditBuffer::from_text("hello");
        buf.set_cursor(0, 2);
        buf.insert_char('X');
        assert_eq!(buf.text(), "heXllo");
        assert_eq!(buf.cursor(), (0, 3));

        buf.split_line();
        assert_eq!(buf.lines(), ["heX", "llo"]);
        assert_eq!(buf.cursor(), (1, 0));

        buf.backspace();
        assert_eq!(buf.text(), "heXllo");
        assert_eq!(buf.cursor(), (0, 3));
    }

    #[test]
    fn backspace_at_buffer_start_is_noop() {
        let mut buf = EditBuffer::from_text("abc");
        buf.backspace();
        assert_eq!(buf.text(), "abc");
        assert_eq!(buf.cursor(), (0, 0));
    }

    #[test]
    fn multibyte_editing_uses_char_columns() {
        let mut buf = EditBuffer::from_text("日本");
        buf.move_to_line_end();
        assert_eq!(buf.cursor(), (0, 2));
        buf.backspace();
        buf.insert_char('語');
        assert_eq!(buf.text(), "日語");
    }

    #[test]
    fn open_lines() {
        let mut buf = EditBuffer::from_text("a\nb");
        buf.open_below();
        assert_eq!(buf.lines(), ["a", "", "b"]);
        assert_eq!(buf.cursor(), (1, 0));

        buf.set_cursor(0, 1);
        buf.open_above();
        assert_eq!(buf.lines(), ["", "a", "", "b"]);
        assert_eq!(buf.cursor(), (0, 0));
    }

    #[test]
    fn delete_line_never_empties_buffer() {
        let mut buf = EditBuffer::from_text("only");
        buf.set_cursor(0, 3);
        buf.delete_line();
        assert_eq!(buf.lines(), [""]);
        assert_eq!(buf.cursor(), (0, 0));

        let mut buf = EditBuffer::from_text("a\nb\nc");
        buf.set_cursor(2, 1);
        buf.delete_line();
        assert_eq!(buf.lines(), ["a", "b"]);
        assert_eq!(buf.cursor(), (1, 0));
    }

    #[test]
    fn invariants_hold_over_mixed_operations() {
        let mut buf = EditBuffer::from_text("first\nsecond line\n\nlast");
        let ops: [fn(&mut EditBuffer); 12] = [
            EditBuffer::move_down,
            EditBuffer::move_to_line_end,
            EditBuffer::split_line,
            EditBuffer::backspace,
            EditBuffer::move_right,
            EditBuffer::delete_line,
            EditBuffer::open_above,
            |b| b.insert_char('z'),
            EditBuffer::move_left,
            EditBuffer::backspace,
            EditBuffer::open_below,
            EditBuffer::move_up,
        ];
        for round in 0..5 {
            for (i, op) in ops.iter().enumerate() {
                if (i + round) % 3 == 0 {
                    buf.delete_line();
                }
                op(&mut buf);
                assert_invariants(&buf);
                assert_eq!(EditBuffer::from_text(&buf.text()).lines(), buf.lines());
            }
        }
    }
}
