//! Windowed list renderer for commands and search results.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::ListView;

fn list_lines(list: &ListView, theme: &Theme) -> Vec<Line<'static>> {
    if let Some(message) = &list.empty_message {
        return vec![Line::from(Span::styled(message.clone(), theme.placeholder()))];
    }

    let mut lines = Vec::with_capacity(list.rows.len() + 2);
    if let Some(header) = &list.header {
        lines.push(Line::from(Span::styled(header.clone(), theme.header())));
    }
    for row in &list.rows {
        let style = if row.is_selected { theme.selection() } else { theme.text() };
        lines.push(Line::from(Span::styled(format!(" {} ", row.text), style)));
    }
    if let Some(scroll) = &list.scroll {
        lines.push(Line::from(Span::styled(scroll.clone(), theme.placeholder())));
    }
    lines
}

/// Renders the header, visible rows and scroll indicator of `list`.
///
/// The view model already holds only the rows inside the scroll window.
pub fn render_list(frame: &mut Frame<'_>, area: Rect, list: &ListView, theme: &Theme) {
    frame.render_widget(Paragraph::new(list_lines(list, theme)), area);
}
