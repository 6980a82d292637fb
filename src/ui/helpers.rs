//! Text shaping helpers shared by the view model and components.
//!
//! All helpers operate on character indices, never byte indices, so multi-byte
//! keys and values are cut on code point boundaries.

use std::ops::Range;

use ratatui::style::Style;
use ratatui::text::{Line, Span};

/// Longest key shown in a result row before it is shortened.
pub const MAX_KEY_WIDTH: usize = 120;

/// Shortens `text` to [`MAX_KEY_WIDTH`] characters, ending in `...`.
///
/// Empty keys are shown as `<empty key>`.
#[must_use]
pub fn display_key(text: &str) -> String {
    if text.is_empty() {
        return "<empty key>".to_string();
    }
    if text.chars().count() > MAX_KEY_WIDTH {
        let kept: String = text.chars().take(MAX_KEY_WIDTH - 3).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

/// Inserts a `|` cursor bar before the character at `cursor`.
#[must_use]
pub fn with_cursor_bar(text: &str, cursor: usize) -> String {
    let mut out = String::with_capacity(text.len() + 1);
    let mut placed = false;
    for (i, c) in text.chars().enumerate() {
        if i == cursor {
            out.push('|');
            placed = true;
        }
        out.push(c);
    }
    if !placed {
        out.push('|');
    }
    out
}

/// `[a-b of n]` for a window that does not show the whole list.
#[must_use]
pub fn scroll_indicator(visible: &Range<usize>, total: usize) -> Option<String> {
    (total > crate::app::list::VISIBLE_ROWS)
        .then(|| format!("[{}-{} of {}]", visible.start + 1, visible.end, total))
}

/// Splits `line` into spans with the character at `col` drawn in `cursor_style`.
///
/// A cursor past the end of the line is drawn as a highlighted space.
#[must_use]
pub fn line_with_block_cursor(line: &str, col: usize, base: Style, cursor_style: Style) -> Line<'static> {
    let before: String = line.chars().take(col).collect();
    let mut rest = line.chars().skip(col);
    let under = rest.next().map_or_else(|| " ".to_string(), String::from);
    let after: String = rest.collect();

    Line::from(vec![
        Span::styled(before, base),
        Span::styled(under, cursor_style),
        Span::styled(after, base),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_keys_are_truncated_to_120_chars() {
        let key = "k".repeat(130);
        let shown = display_key(&key);
        assert_eq!(shown.chars().count(), 120);
        assert!(shown.ends_with("..."));
        assert_eq!(display_key(&"k".repeat(120)), "k".repeat(120));
    }

    #[test]
    fn empty_key_placeholder() {
        assert_eq!(display_key(""), "<empty key>");
    }

    #[test]
    fn cursor_bar_positions() {
        assert_eq!(with_cursor_bar("", 0), "|");
        assert_eq!(with_cursor_bar("abc", 0), "|abc");
        assert_eq!(with_cursor_bar("abc", 1), "a|bc");
        assert_eq!(with_cursor_bar("abc", 3), "abc|");
        assert_eq!(with_cursor_bar("日本", 1), "日|本");
    }

    #[test]
    fn scroll_indicator_only_for_long_lists() {
        assert_eq!(scroll_indicator(&(0..4), 4), None);
        assert_eq!(scroll_indicator(&(5..15), 30).as_deref(), Some("[6-15 of 30]"));
    }

    #[test]
    fn block_cursor_past_line_end_is_a_space() {
        let line = line_with_block_cursor("ab", 2, Style::default(), Style::default());
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "ab ");
    }
}
