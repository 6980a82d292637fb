//! Bordered multi-line text with an optional block cursor.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use ratatui::Frame;

use crate::ui::helpers::line_with_block_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TextView;

/// First line to show so that `cursor_line` stays inside `height` rows.
#[must_use]
pub fn scroll_offset(cursor_line: usize, height: usize) -> usize {
    if height == 0 {
        0
    } else {
        cursor_line.saturating_sub(height - 1)
    }
}

fn text_lines(view: &TextView, theme: &Theme) -> Vec<Line<'static>> {
    if let Some(placeholder) = &view.placeholder {
        return vec![Line::from(Span::styled(placeholder.clone(), theme.placeholder()))];
    }

    view.lines
        .iter()
        .enumerate()
        .map(|(i, line)| match view.cursor {
            Some((row, col)) if row == i => line_with_block_cursor(line, col, theme.text(), theme.cursor()),
            _ => Line::from(Span::styled(line.clone(), theme.text())),
        })
        .collect()
}

/// Renders `view` in a rounded border, scrolled to keep the cursor visible.
pub fn render_text_view(frame: &mut Frame<'_>, area: Rect, view: &TextView, focused: bool, theme: &Theme) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme.border(focused));
    let inner_height = usize::from(block.inner(area).height);
    let offset = view
        .cursor
        .map_or(0, |(row, _)| scroll_offset(row, inner_height));

    let paragraph = Paragraph::new(text_lines(view, theme))
        .block(block)
        .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);
}
