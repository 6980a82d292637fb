//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single process-wide state value. It
//! owns the active [`Mode`] (with that mode's sub-state), the search sub-state
//! that survives trips through Detail and Edit, and the carry-over status
//! message.
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] is a pure projection of the state into a
//! [`ScreenViewModel`]. It is recomputed after every apply step; nothing in the
//! state depends on what was last drawn.

use crate::app::add::AddStep;
use crate::app::detail::DetailState;
use crate::app::list::ListCursor;
use crate::app::modes::{DetailView, Mode};
use crate::app::palette::CommandEntry;
use crate::app::search::SearchState;
use crate::app::Action;
use crate::domain::display_text;
use crate::format::detect_format;
use crate::ui::helpers::{display_key, scroll_indicator, with_cursor_bar};
use crate::ui::viewmodel::{FieldView, ListRow, ListView, ScreenBody, ScreenViewModel, TextView};
use crate::worker::WorkerMessage;

/// Default number of entries requested per scan.
pub const DEFAULT_SCAN_LIMIT: usize = 50;

const APP_TITLE: &str = "KV Explorer";

/// Central application state container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Active mode and its sub-state.
    pub mode: Mode,

    /// Search box, last result page and pending scan.
    ///
    /// Reset when Search is entered from the palette and when it is left with
    /// `Esc`; kept while Detail and Edit are open on top of it.
    pub search: SearchState,

    /// Transient message from the last completed store operation.
    pub status: Option<String>,

    /// Maximum entries per scan.
    pub scan_limit: usize,

    next_request_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_LIMIT)
    }
}

impl AppState {
    /// Creates the initial state: palette mode, empty search, no status.
    #[must_use]
    pub fn new(scan_limit: usize) -> Self {
        Self {
            mode: Mode::default(),
            search: SearchState::default(),
            status: None,
            scan_limit,
            next_request_id: 1,
        }
    }

    /// Issues a scan for the current search query.
    ///
    /// Allocates a fresh request id and records it as the only result the
    /// search view will accept.
    pub fn issue_scan(&mut self) -> Action {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.search.begin_scan(request_id);
        tracing::debug!(request_id, query = %self.search.query(), "scan issued");
        Action::PostToWorker(WorkerMessage::scan(
            request_id,
            self.search.query(),
            self.scan_limit,
        ))
    }

    /// Projects the state into a renderable screen description.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ScreenViewModel {
        match &self.mode {
            Mode::Palette(palette) => ScreenViewModel {
                title: APP_TITLE.to_string(),
                body: ScreenBody::Palette {
                    input: format!("> {}|", palette.prefix()),
                    commands: Self::command_list(palette.filtered(), palette.list),
                },
                status: None,
                help: "• ↑/↓ select command • Enter to execute • Type to filter • Esc quit".to_string(),
                indicator: Some("---Main---".to_string()),
            },
            Mode::Search => self.search_screen(),
            Mode::Detail(detail) => self.detail_screen(detail),
            Mode::Edit(session) => {
                let editor = &session.editor;
                let help = match editor.mode {
                    crate::editor::EditorMode::CommandLine(_) => {
                        "• :w to save • :x to save and exit • :q to quit • Esc to cancel"
                    }
                    crate::editor::EditorMode::Insert => {
                        "• Esc then :w to save • Esc then :x to save and exit • Ctrl+S to save"
                    }
                    crate::editor::EditorMode::Command => {
                        "• i/a/o to insert • hjkl to move • dd to delete line • : for commands • Esc to exit"
                    }
                };
                ScreenViewModel {
                    title: "Edit Mode".to_string(),
                    body: ScreenBody::Edit {
                        key: display_text(&editor.key).into_owned(),
                        value: TextView {
                            lines: editor.buffer.lines().to_vec(),
                            cursor: Some(editor.buffer.cursor()),
                            placeholder: None,
                        },
                        mode_label: editor.mode.label(),
                        command_line: editor.command_line().map(|line| format!("{line}_")),
                    },
                    status: self.status.clone(),
                    help: help.to_string(),
                    indicator: None,
                }
            }
            Mode::Add(add) => {
                let on_value = add.step() == AddStep::Value;
                let field = |text: &str, active: bool| FieldView {
                    text: if active {
                        with_cursor_bar(text, add.cursor())
                    } else {
                        text.to_string()
                    },
                    is_active: active,
                };
                ScreenViewModel {
                    title: APP_TITLE.to_string(),
                    body: ScreenBody::Add {
                        step_label: if on_value {
                            "Step 2/2: Enter Value"
                        } else {
                            "Step 1/2: Enter Key"
                        },
                        key: field(add.key(), !on_value),
                        value: field(add.value(), on_value),
                        value_label: on_value
                            .then(|| format!("Value (Detected: {}):", detect_format(add.value()))),
                    },
                    status: self.status.clone(),
                    help: if on_value {
                        "• Tab to switch to key • Enter for newline • Ctrl+S to save • Esc to cancel"
                    } else {
                        "• Tab/Enter to switch to value • Esc to cancel"
                    }
                    .to_string(),
                    indicator: Some("---Add---".to_string()),
                }
            }
        }
    }

    fn command_list(filtered: &[CommandEntry], list: ListCursor) -> ListView {
        if filtered.is_empty() {
            return ListView {
                empty_message: Some("No matching commands".to_string()),
                ..ListView::default()
            };
        }

        let visible = list.visible(filtered.len());
        let rows = filtered[visible.clone()]
            .iter()
            .enumerate()
            .map(|(i, entry)| ListRow {
                text: format!("{:<10} {}", entry.name, entry.description),
                is_selected: visible.start + i == list.index,
            })
            .collect();

        ListView {
            header: Some(format!("Available Commands ({})", filtered.len())),
            rows,
            scroll: scroll_indicator(&visible, filtered.len()),
            empty_message: None,
        }
    }

    fn search_screen(&self) -> ScreenViewModel {
        let search = &self.search;
        let total = search.results.len();

        let results = if total == 0 {
            ListView {
                empty_message: (!search.query().is_empty()).then(|| "No results found".to_string()),
                ..ListView::default()
            }
        } else {
            let visible = search.list.visible(total);
            let rows = search.results[visible.clone()]
                .iter()
                .enumerate()
                .map(|(i, entry)| ListRow {
                    text: display_key(&entry.key_text()),
                    is_selected: visible.start + i == search.list.index,
                })
                .collect();
            ListView {
                header: Some(format!(
                    "---------------------- results ({total}) ----------------------"
                )),
                rows,
                scroll: scroll_indicator(&visible, total),
                empty_message: None,
            }
        };

        let help = if search.query().is_empty() && total == 0 {
            "• Start typing to search • Esc to main"
        } else {
            "• ↑/↓ navigate • Enter view • dd delete • Esc to main"
        };

        ScreenViewModel {
            title: APP_TITLE.to_string(),
            body: ScreenBody::Search {
                input: format!("> {}", with_cursor_bar(search.query(), search.cursor())),
                searching: search.is_searching(),
                results,
            },
            status: self.status.clone(),
            help: help.to_string(),
            indicator: Some("---Search---".to_string()),
        }
    }

    fn detail_screen(&self, detail: &DetailState) -> ScreenViewModel {
        let command_view = detail.view == DetailView::Command;
        let empty = detail.formatted().is_empty();

        ScreenViewModel {
            title: if command_view {
                "Detail View -- NORMAL --"
            } else {
                "Detail View -- VIEW --"
            }
            .to_string(),
            body: ScreenBody::Detail {
                key: detail.key_text().into_owned(),
                value_label: format!("Value ({}):", detail.format),
                value: TextView {
                    lines: detail.lines().to_vec(),
                    cursor: (command_view && !empty).then(|| detail.cursor()),
                    placeholder: empty.then(|| "<empty value>".to_string()),
                },
            },
            status: self.status.clone(),
            help: if command_view {
                "• Esc return • dd delete • i edit • v view mode"
            } else {
                "• Esc return • c command mode • i edit"
            }
            .to_string(),
            indicator: None,
        }
    }
}
