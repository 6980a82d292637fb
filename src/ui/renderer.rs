//! Top-level rendering coordinator.
//!
//! This module provides the main rendering entry point. It computes the view
//! model from the application state and lays out one screen per mode:
//!
//! ```text
//! ┌ title ─────────────────────────┐
//! │ mode body (input, list, text)  │
//! │ …                              │
//! │ status                         │
//! │ help                           │
//! └ indicator ─────────────────────┘
//! ```

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::ui::components::{
    render_footer, render_header, render_input, render_label, render_list, render_text_view, FOOTER_HEIGHT,
};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FieldView, ListView, ScreenBody, ScreenViewModel, TextView};

/// Height of a bordered single-line input box.
const INPUT_HEIGHT: u16 = 3;

/// Renders the current state into `frame`.
pub fn render(frame: &mut Frame<'_>, state: &AppState, theme: &Theme) {
    let viewmodel = state.compute_viewmodel();
    let area = frame.area();
    render_viewmodel(frame, area, &viewmodel, theme);
}

/// Renders a pre-computed view model into `area`.
pub fn render_viewmodel(frame: &mut Frame<'_>, area: Rect, vm: &ScreenViewModel, theme: &Theme) {
    let [title_area, _, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(area);

    render_header(frame, title_area, &vm.title, theme);

    match &vm.body {
        ScreenBody::Palette { input, commands } => render_palette(frame, body_area, input, commands, theme),
        ScreenBody::Search {
            input,
            searching,
            results,
        } => render_search(frame, body_area, input, *searching, results, theme),
        ScreenBody::Detail {
            key,
            value_label,
            value,
        } => render_detail(frame, body_area, key, value_label, value, theme),
        ScreenBody::Edit {
            key,
            value,
            mode_label,
            command_line,
        } => render_edit(frame, body_area, key, value, mode_label, command_line.as_deref(), theme),
        ScreenBody::Add {
            step_label,
            key,
            value,
            value_label,
        } => render_add(frame, body_area, step_label, key, value, value_label.as_deref(), theme),
    }

    render_footer(
        frame,
        footer_area,
        vm.status.as_deref(),
        &vm.help,
        vm.indicator.as_deref(),
        theme,
    );
}

fn render_palette(frame: &mut Frame<'_>, area: Rect, input: &str, commands: &ListView, theme: &Theme) {
    let [input_area, list_area] =
        Layout::vertical([Constraint::Length(INPUT_HEIGHT), Constraint::Min(1)]).areas(area);
    render_input(frame, input_area, input, true, theme);
    render_list(frame, list_area, commands, theme);
}

fn render_search(
    frame: &mut Frame<'_>,
    area: Rect,
    input: &str,
    searching: bool,
    results: &ListView,
    theme: &Theme,
) {
    let [input_area, busy_area, list_area] = Layout::vertical([
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(u16::from(searching)),
        Constraint::Min(1),
    ])
    .areas(area);

    render_input(frame, input_area, input, true, theme);
    if searching {
        frame.render_widget(Paragraph::new(Span::styled("Searching...", theme.placeholder())), busy_area);
    }
    render_list(frame, list_area, results, theme);
}

fn render_detail(frame: &mut Frame<'_>, area: Rect, key: &str, value_label: &str, value: &TextView, theme: &Theme) {
    let [key_area, label_area, value_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(3),
    ])
    .areas(area);

    render_label(frame, key_area, &format!("Key: {key}"), theme);
    render_label(frame, label_area, value_label, theme);
    render_text_view(frame, value_area, value, value.cursor.is_some(), theme);
}

fn render_edit(
    frame: &mut Frame<'_>,
    area: Rect,
    key: &str,
    value: &TextView,
    mode_label: &str,
    command_line: Option<&str>,
    theme: &Theme,
) {
    let command_height = if command_line.is_some() { INPUT_HEIGHT } else { 0 };
    let [key_area, value_area, mode_area, command_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(command_height),
    ])
    .areas(area);

    render_label(frame, key_area, &format!("Editing: {key}"), theme);
    render_text_view(frame, value_area, value, command_line.is_none(), theme);
    frame.render_widget(Paragraph::new(Span::styled(mode_label.to_string(), theme.indicator())), mode_area);
    if let Some(line) = command_line {
        render_input(frame, command_area, line, true, theme);
    }
}

fn render_add(
    frame: &mut Frame<'_>,
    area: Rect,
    step_label: &str,
    key: &FieldView,
    value: &FieldView,
    value_label: Option<&str>,
    theme: &Theme,
) {
    let [step_area, key_label_area, key_area, value_label_area, value_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(1),
        Constraint::Min(INPUT_HEIGHT),
    ])
    .areas(area);

    frame.render_widget(Paragraph::new(Span::styled(step_label.to_string(), theme.indicator())), step_area);
    render_label(frame, key_label_area, "Key:", theme);
    render_input(frame, key_area, &key.text, key.is_active, theme);
    render_label(frame, value_label_area, value_label.unwrap_or("Value:"), theme);
    render_input(frame, value_area, &value.text, value.is_active, theme);
}
