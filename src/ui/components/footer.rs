//! Footer renderer: status line, keybinding hints and mode indicator.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::ui::theme::Theme;

/// Lines the footer occupies.
pub const FOOTER_HEIGHT: u16 = 3;

/// Whether a status message reports a failed operation.
#[must_use]
pub fn is_error_status(status: &str) -> bool {
    status.contains("failed:")
}

/// Renders the three footer lines.
///
/// ```text
/// Saved successfully!
/// • Esc return • dd delete • i edit • v view mode
/// ---Search---
/// ```
///
/// Missing parts leave their line blank so the help text never jumps.
pub fn render_footer(
    frame: &mut Frame<'_>,
    area: Rect,
    status: Option<&str>,
    help: &str,
    indicator: Option<&str>,
    theme: &Theme,
) {
    let [status_area, help_area, indicator_area] = Layout::vertical([Constraint::Length(1); 3]).areas(area);

    if let Some(status) = status {
        let style = theme.status(is_error_status(status));
        frame.render_widget(Paragraph::new(Line::from(Span::styled(status.to_string(), style))), status_area);
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(help.to_string(), theme.dim()))),
        help_area,
    );

    if let Some(indicator) = indicator {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(indicator.to_string(), theme.indicator()))),
            indicator_area,
        );
    }
}
