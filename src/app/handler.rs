//! Event handling and state transition logic.
//!
//! This module implements the apply step: every keystroke and every worker
//! response passes through [`apply`], which returns the next state and at most
//! one [`Action`]. It is the only place where the mode changes.
//!
//! # Architecture
//!
//! 1. Events arrive from the terminal (as [`Key`]) or from the command layer
//! 2. [`apply`] routes keys to the handler of the active [`Mode`]
//! 3. Worker responses are routed by kind, whatever the active mode is
//! 4. The resulting action, if any, is returned for the runtime to execute
//!
//! The interrupt key quits from every mode before any routing happens.

use crate::app::add::AddOutcome;
use crate::app::detail::{DetailOutcome, DetailState};
use crate::app::modes::{DetailView, EditSession, GestureStep, Mode};
use crate::app::palette::{PaletteState, PaletteTarget};
use crate::app::search::SearchState;
use crate::app::{Action, AppState};
use crate::domain::display_text;
use crate::editor::{EditorMode, EditorOutcome};
use crate::worker::{WorkerMessage, WorkerResponse};

/// A keystroke, normalised away from the terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character.
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    /// Ctrl-C.
    Interrupt,
    /// Ctrl-S.
    Save,
    /// Anything the state machine does not bind.
    Other,
}

/// Input to the apply step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    Worker(WorkerResponse),
}

/// Applies one event to the state.
///
/// Consumes the previous state and returns the next one together with the
/// action to execute, if any.
///
/// # Example
///
/// ```rust
/// use kvexplorer::app::{apply, AppState, Event, Key};
///
/// let (state, action) = apply(AppState::new(50), Event::Key(Key::Char('/')));
/// assert!(action.is_none());
/// assert_eq!(state.mode.kind(), kvexplorer::app::ModeKind::Palette);
/// ```
#[must_use]
pub fn apply(mut state: AppState, event: Event) -> (AppState, Option<Action>) {
    let action = handle_event(&mut state, event);
    (state, action)
}

/// In-place form of [`apply`] used by the runtime loop.
pub fn handle_event(state: &mut AppState, event: Event) -> Option<Action> {
    let _span = tracing::debug_span!("handle_event", mode = ?state.mode.kind()).entered();

    let before = state.mode.kind();
    let action = match event {
        Event::Key(Key::Interrupt) => {
            tracing::debug!("interrupt received");
            Some(Action::Quit)
        }
        Event::Key(key) => handle_key(state, key),
        Event::Worker(response) => handle_response(state, response),
    };

    let after = state.mode.kind();
    if before != after {
        tracing::debug!(from = ?before, to = ?after, "mode changed");
    }
    action
}

fn handle_key(state: &mut AppState, key: Key) -> Option<Action> {
    match std::mem::take(&mut state.mode) {
        Mode::Palette(palette) => handle_palette(state, palette, key),
        Mode::Search => handle_search(state, key),
        Mode::Detail(detail) => handle_detail(state, detail, key),
        Mode::Edit(session) => handle_edit(state, *session, key),
        Mode::Add(mut add) => match add.handle_key(&key) {
            AddOutcome::Continue => {
                state.mode = Mode::Add(add);
                None
            }
            AddOutcome::Cancel => {
                tracing::debug!("add wizard abandoned");
                None
            }
            AddOutcome::Submit { key, value } => {
                tracing::debug!(key = %key, "submitting new entry");
                state.mode = Mode::Add(add);
                Some(Action::PostToWorker(WorkerMessage::AddEntry {
                    key: key.into_bytes(),
                    value,
                }))
            }
        },
    }
}

fn handle_palette(state: &mut AppState, mut palette: PaletteState, key: Key) -> Option<Action> {
    match key {
        Key::Esc => {
            state.mode = Mode::Palette(palette);
            return Some(Action::Quit);
        }
        Key::Enter => {
            if let Some(entry) = palette.selected().copied() {
                tracing::debug!(command = entry.name, "executing palette command");
                state.status = None;
                match entry.target {
                    PaletteTarget::Search => {
                        state.search = SearchState::default();
                        state.mode = Mode::Search;
                        return Some(state.issue_scan());
                    }
                    PaletteTarget::Add => {
                        state.mode = Mode::Add(Default::default());
                        return None;
                    }
                }
            }
        }
        Key::Up => palette.move_up(),
        Key::Down => palette.move_down(),
        Key::Backspace => palette.backspace(),
        Key::Char(c) => palette.push(c),
        _ => {}
    }
    state.mode = Mode::Palette(palette);
    None
}

fn handle_search(state: &mut AppState, key: Key) -> Option<Action> {
    state.mode = Mode::Search;
    let search = &mut state.search;

    match search.gesture.advance(&key) {
        GestureStep::Armed => return None,
        GestureStep::Fired => {
            let entry = search.selected()?;
            tracing::debug!(key = %entry.key_text(), "deleting highlighted key");
            return Some(Action::PostToWorker(WorkerMessage::DeleteKey {
                key: entry.key.clone(),
            }));
        }
        GestureStep::Passed => {}
    }

    match key {
        Key::Esc => {
            state.search = SearchState::default();
            state.mode = Mode::Palette(PaletteState::default());
        }
        Key::Enter => {
            if let Some(entry) = search.selected() {
                state.mode = Mode::Detail(DetailState::new(entry.key.clone(), entry.value_text()));
            }
        }
        Key::Up => search.move_up(),
        Key::Down => search.move_down(),
        Key::Left => search.move_left(),
        Key::Right => search.move_right(),
        Key::Backspace => {
            if search.backspace() {
                return Some(state.issue_scan());
            }
        }
        Key::Char(c) => {
            search.insert_char(c);
            return Some(state.issue_scan());
        }
        _ => {}
    }
    None
}

fn handle_detail(state: &mut AppState, mut detail: DetailState, key: Key) -> Option<Action> {
    match detail.handle_key(&key) {
        DetailOutcome::Stay => {
            state.mode = Mode::Detail(detail);
            None
        }
        DetailOutcome::Back => {
            state.mode = Mode::Search;
            None
        }
        DetailOutcome::Delete => {
            let key = detail.key.clone();
            tracing::debug!(key = %display_text(&key), "deleting viewed key");
            state.mode = Mode::Detail(detail);
            Some(Action::PostToWorker(WorkerMessage::DeleteKey { key }))
        }
        DetailOutcome::Edit { line_start } => {
            let editor = detail.open_editor(line_start);
            state.mode = Mode::Edit(Box::new(EditSession { detail, editor }));
            None
        }
    }
}

fn handle_edit(state: &mut AppState, mut session: EditSession, key: Key) -> Option<Action> {
    if key == Key::Enter && matches!(session.editor.mode, EditorMode::CommandLine(_)) {
        state.status = None;
    }

    match session.editor.handle_key(&key) {
        EditorOutcome::Continue => {
            state.mode = Mode::Edit(Box::new(session));
            None
        }
        EditorOutcome::Discard => {
            tracing::debug!(key = %session.detail.key_text(), "edits discarded");
            let mut detail = session.detail;
            detail.view = DetailView::Command;
            state.mode = Mode::Detail(detail);
            None
        }
        EditorOutcome::Save { value, exit_after } => {
            let key = session.editor.key.clone();
            tracing::debug!(key = %display_text(&key), exit_after, "saving buffer");
            state.mode = Mode::Edit(Box::new(session));
            Some(Action::PostToWorker(WorkerMessage::SaveValue {
                key,
                value,
                exit_to_detail: exit_after,
            }))
        }
    }
}

fn handle_response(state: &mut AppState, response: WorkerResponse) -> Option<Action> {
    if response.is_failure() {
        tracing::warn!(response = ?response, "store operation failed");
    }

    match response {
        WorkerResponse::ScanCompleted { request_id, entries } => {
            let count = entries.len();
            if state.search.accept_results(request_id, entries) {
                tracing::debug!(request_id, count, "scan results applied");
            } else {
                tracing::debug!(request_id, "dropping stale scan results");
            }
            None
        }
        WorkerResponse::ScanFailed { request_id, message } => {
            if state.search.fail_scan(request_id) {
                state.status = Some(format!("Search failed: {message}"));
            }
            None
        }
        WorkerResponse::KeyDeleted { key } => {
            state.search.remove_key(&key);
            state.status = Some(format!("Deleted key '{}'", display_text(&key)));
            let refresh = match &state.mode {
                Mode::Search => true,
                Mode::Detail(detail) => detail.key == key,
                _ => false,
            };
            if refresh {
                state.mode = Mode::Search;
                Some(state.issue_scan())
            } else {
                None
            }
        }
        WorkerResponse::DeleteFailed { message, .. } => {
            state.status = Some(format!("Delete failed: {message}"));
            None
        }
        WorkerResponse::SaveCompleted {
            key,
            value,
            exit_to_detail,
        } => {
            state.status = Some("Saved successfully!".to_string());
            state.search.update_value(&key, &value);
            match std::mem::take(&mut state.mode) {
                Mode::Edit(mut session) if session.detail.key == key => {
                    session.detail.set_value(value);
                    if exit_to_detail {
                        let mut detail = session.detail;
                        detail.view = DetailView::Command;
                        state.mode = Mode::Detail(detail);
                    } else {
                        state.mode = Mode::Edit(session);
                    }
                }
                Mode::Detail(mut detail) if detail.key == key => {
                    detail.set_value(value);
                    state.mode = Mode::Detail(detail);
                }
                other => state.mode = other,
            }
            None
        }
        WorkerResponse::SaveFailed { message, .. } => {
            state.status = Some(format!("Save failed: {message}"));
            None
        }
        WorkerResponse::EntryAdded { key, .. } => {
            state.status = Some(format!("Added key '{}' successfully!", display_text(&key)));
            if matches!(state.mode, Mode::Add(_)) {
                state.mode = Mode::Search;
                Some(state.issue_scan())
            } else {
                None
            }
        }
        WorkerResponse::AddFailed { message, .. } => {
            state.status = Some(format!("Add failed: {message}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::ModeKind;
    use crate::domain::KvEntry;
    use pretty_assertions::assert_eq;

    fn keys(state: AppState, keys: &[Key]) -> (AppState, Vec<Action>) {
        keys.iter().fold((state, Vec::new()), |(state, mut actions), key| {
            let (state, action) = apply(state, Event::Key(*key));
            actions.extend(action);
            (state, actions)
        })
    }

    fn text(s: &str) -> Vec<Key> {
        s.chars().map(Key::Char).collect()
    }

    fn search_state(entries: &[(&str, &str)]) -> AppState {
        let (mut state, _) = keys(AppState::new(50), &[Key::Enter]);
        let id = state.search.pending_request().unwrap_or_default();
        let entries = entries.iter().map(|(k, v)| KvEntry::new(*k, *v)).collect();
        state.search.accept_results(id, entries);
        state
    }

    #[test]
    fn interrupt_quits_from_every_mode() {
        let palette = AppState::new(50);
        let search = search_state(&[("a", "1")]);
        let (detail, _) = keys(search_state(&[("a", "1")]), &[Key::Enter]);
        let (edit, _) = keys(detail.clone(), &[Key::Char('i')]);
        let (add, _) = keys(AppState::new(50), &[Key::Down, Key::Enter]);

        for state in [palette, search, detail, edit, add] {
            let kind = state.mode.kind();
            let (_, action) = apply(state, Event::Key(Key::Interrupt));
            assert_eq!(action, Some(Action::Quit), "{kind:?}");
        }
    }

    #[test]
    fn escape_in_palette_quits() {
        let (_, action) = apply(AppState::new(50), Event::Key(Key::Esc));
        assert_eq!(action, Some(Action::Quit));
    }

    #[test]
    fn palette_enter_opens_add_and_clears_status() {
        let mut state = AppState::new(50);
        state.status = Some("old".into());
        let mut seq = text("/a");
        seq.push(Key::Enter);
        let (state, actions) = keys(state, &seq);
        assert_eq!(state.mode.kind(), ModeKind::Add);
        assert_eq!(state.status, None);
        assert!(actions.is_empty());
    }

    #[test]
    fn palette_enter_with_no_match_stays() {
        let mut seq = text("zz");
        seq.push(Key::Enter);
        let (state, actions) = keys(AppState::new(50), &seq);
        assert_eq!(state.mode.kind(), ModeKind::Palette);
        assert!(actions.is_empty());
    }

    #[test]
    fn first_d_in_search_is_not_typed() {
        let state = search_state(&[("a", "1")]);
        let (state, actions) = keys(state, &[Key::Char('d'), Key::Char('x')]);
        assert_eq!(state.search.query(), "x");
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn d_x_d_never_deletes() {
        let state = search_state(&[("a", "1")]);
        let (_, actions) = keys(state, &text("dxd"));
        assert!(actions
            .iter()
            .all(|a| !matches!(a, Action::PostToWorker(WorkerMessage::DeleteKey { .. }))));
    }

    #[test]
    fn dd_with_empty_results_does_nothing() {
        let state = search_state(&[]);
        let (_, actions) = keys(state, &text("dd"));
        assert!(actions.is_empty());
    }

    #[test]
    fn detail_escape_keeps_search_results() {
        let state = search_state(&[("a", "1"), ("b", "2")]);
        let (state, _) = keys(state, &[Key::Down, Key::Enter, Key::Esc]);
        assert_eq!(state.mode.kind(), ModeKind::Search);
        assert_eq!(state.search.results.len(), 2);
        assert_eq!(state.search.list.index, 1);
    }

    #[test]
    fn stale_scan_does_not_overwrite_newer_results() {
        let state = search_state(&[]);
        let (state, actions) = keys(state, &text("ab"));
        let ids: Vec<u64> = actions
            .iter()
            .filter_map(|a| match a {
                Action::PostToWorker(WorkerMessage::Scan { request_id, .. }) => Some(*request_id),
                _ => None,
            })
            .collect();
        assert_eq!(ids.len(), 2);

        let (state, _) = apply(
            state,
            Event::Worker(WorkerResponse::ScanCompleted {
                request_id: ids[1],
                entries: vec![KvEntry::new("ab", "new")],
            }),
        );
        let (state, _) = apply(
            state,
            Event::Worker(WorkerResponse::ScanCompleted {
                request_id: ids[0],
                entries: vec![KvEntry::new("a", "old")],
            }),
        );
        assert_eq!(state.search.results, vec![KvEntry::new("ab", "new")]);
    }

    #[test]
    fn late_delete_while_editing_does_not_switch_mode() {
        let state = search_state(&[("a", "1"), ("b", "2")]);
        let (state, _) = keys(state, &[Key::Enter, Key::Char('i')]);
        let (state, action) = apply(
            state,
            Event::Worker(WorkerResponse::KeyDeleted { key: "b".into() }),
        );
        assert_eq!(state.mode.kind(), ModeKind::Edit);
        assert_eq!(action, None);
        assert_eq!(state.search.results, vec![KvEntry::new("a", "1")]);
    }

    #[test]
    fn binary_key_is_deleted_and_saved_by_its_bytes() {
        let key = b"bin\xff\x01".to_vec();
        let (mut state, _) = keys(AppState::new(50), &[Key::Enter]);
        let id = state.search.pending_request().unwrap_or_default();
        state.search.accept_results(id, vec![KvEntry::new(key.clone(), "v")]);

        let (detail, _) = keys(state, &[Key::Enter]);
        let (_, actions) = keys(detail.clone(), &text("dd"));
        assert_eq!(
            actions,
            vec![Action::PostToWorker(WorkerMessage::DeleteKey { key: key.clone() })]
        );

        let mut seq = vec![Key::Char('i'), Key::Esc];
        seq.extend(text(":w"));
        seq.push(Key::Enter);
        let (_, actions) = keys(detail, &seq);
        assert_eq!(
            actions,
            vec![Action::PostToWorker(WorkerMessage::SaveValue {
                key,
                value: "v".into(),
                exit_to_detail: false,
            })]
        );
    }

    #[test]
    fn save_failure_keeps_editor_and_buffer() {
        let state = search_state(&[("a", "1")]);
        let (state, _) = keys(state, &[Key::Enter, Key::Char('i'), Key::Char('X')]);
        let (state, _) = apply(
            state,
            Event::Worker(WorkerResponse::SaveFailed {
                key: "a".into(),
                message: "boom".into(),
            }),
        );
        assert_eq!(state.status.as_deref(), Some("Save failed: boom"));
        let Mode::Edit(session) = &state.mode else {
            panic!("expected edit mode");
        };
        assert_eq!(session.editor.buffer.text(), "X1");
    }

    #[test]
    fn write_keeps_editing_and_updates_cached_value() {
        let state = search_state(&[("a", "1")]);
        let mut seq = vec![
            Key::Enter,
            Key::Char('i'),
            Key::Esc,
            Key::Char('A'),
            Key::Char('2'),
            Key::Esc,
        ];
        seq.extend(text(":w"));
        seq.push(Key::Enter);
        let (state, actions) = keys(state, &seq);
        assert_eq!(
            actions.last(),
            Some(&Action::PostToWorker(WorkerMessage::SaveValue {
                key: "a".into(),
                value: "12".into(),
                exit_to_detail: false,
            }))
        );

        let (state, _) = apply(
            state,
            Event::Worker(WorkerResponse::SaveCompleted {
                key: "a".into(),
                value: "12".into(),
                exit_to_detail: false,
            }),
        );
        assert_eq!(state.mode.kind(), ModeKind::Edit);
        assert_eq!(state.status.as_deref(), Some("Saved successfully!"));
        assert_eq!(state.search.results[0].value, b"12");
        let Mode::Edit(session) = &state.mode else {
            panic!("expected edit mode");
        };
        assert_eq!(session.detail.value, "12");
    }

    #[test]
    fn quit_command_restores_detail_without_saving() {
        let state = search_state(&[("a", "1")]);
        let mut seq = vec![Key::Enter, Key::Char('v'), Key::Char('i'), Key::Char('Z'), Key::Esc];
        seq.extend(text(":q"));
        seq.push(Key::Enter);
        let (state, actions) = keys(state, &seq);
        assert!(actions.is_empty());
        let Mode::Detail(detail) = &state.mode else {
            panic!("expected detail mode");
        };
        assert_eq!(detail.view, DetailView::Command);
        assert_eq!(detail.formatted(), "1");
    }

    #[test]
    fn entry_added_returns_to_search_and_rescans() {
        let (state, _) = keys(AppState::new(50), &[Key::Down, Key::Enter]);
        let mut seq = text("k");
        seq.extend([Key::Tab, Key::Char('v'), Key::Save]);
        let (state, actions) = keys(state, &seq);
        assert_eq!(
            actions,
            vec![Action::PostToWorker(WorkerMessage::AddEntry {
                key: "k".into(),
                value: "v".into(),
            })]
        );

        let (state, action) = apply(
            state,
            Event::Worker(WorkerResponse::EntryAdded {
                key: "k".into(),
                value: "v".into(),
            }),
        );
        assert_eq!(state.mode.kind(), ModeKind::Search);
        assert_eq!(state.status.as_deref(), Some("Added key 'k' successfully!"));
        assert!(matches!(
            action,
            Some(Action::PostToWorker(WorkerMessage::Scan { .. }))
        ));
    }

    #[test]
    fn add_failure_keeps_wizard() {
        let (state, _) = keys(AppState::new(50), &[Key::Down, Key::Enter]);
        let (state, _) = apply(
            state,
            Event::Worker(WorkerResponse::AddFailed {
                key: "k".into(),
                message: "denied".into(),
            }),
        );
        assert_eq!(state.mode.kind(), ModeKind::Add);
        assert_eq!(state.status.as_deref(), Some("Add failed: denied"));
    }
}
