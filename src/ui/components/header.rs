//! Title line renderer.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::ui::theme::Theme;

/// Renders the bold screen title on a single line.
pub fn render_header(frame: &mut Frame<'_>, area: Rect, title: &str, theme: &Theme) {
    let line = Line::from(Span::styled(title.to_string(), theme.title()));
    frame.render_widget(Paragraph::new(line), area);
}
