//! Bordered single-field input box.

use ratatui::layout::Rect;
use ratatui::text::{Span, Text};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::ui::theme::Theme;

/// Renders `text` inside a rounded border, highlighted when `focused`.
///
/// `text` already carries its cursor bar; embedded newlines become lines.
pub fn render_input(frame: &mut Frame<'_>, area: Rect, text: &str, focused: bool, theme: &Theme) {
    let style = if focused { theme.text() } else { theme.dim() };
    let block = Block::bordered()
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(theme.border(focused));
    let paragraph = Paragraph::new(Text::styled(text.to_string(), style)).block(block);
    frame.render_widget(paragraph, area);
}

/// Renders a one-line label such as `Key:` or `Value (Detected: JSON):`.
pub fn render_label(frame: &mut Frame<'_>, area: Rect, label: &str, theme: &Theme) {
    frame.render_widget(Paragraph::new(Span::styled(label.to_string(), theme.header())), area);
}
