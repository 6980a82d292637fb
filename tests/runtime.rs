//! Command layer and rendering without a real terminal.

use std::sync::Arc;
use std::time::Duration;

use kvexplorer::app::{apply, Action, AppState, Event, Key};
use kvexplorer::storage::{MemoryStore, Store};
use kvexplorer::ui::{render, Theme};
use kvexplorer::worker::{CommandDispatcher, StoreWorker, WorkerMessage, WorkerResponse};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn screen(state: &AppState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
    terminal
        .draw(|frame| render(frame, state, &Theme::default()))
        .unwrap();
    let buffer = terminal.backend().buffer();
    let width = usize::from(buffer.area.width);
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn drive(state: AppState, keys: &[Key]) -> (AppState, Vec<Action>) {
    keys.iter().fold((state, Vec::new()), |(state, mut actions), key| {
        let (state, action) = apply(state, Event::Key(*key));
        actions.extend(action);
        (state, actions)
    })
}

#[tokio::test]
async fn dispatcher_answers_every_message() {
    let store = Arc::new(MemoryStore::with_entries([("a", "1"), ("b", "2")]));
    let (dispatcher, mut responses) = CommandDispatcher::new(StoreWorker::new(store.clone()));

    dispatcher.dispatch(WorkerMessage::scan(1, "", 50));
    dispatcher.dispatch(WorkerMessage::DeleteKey { key: "missing".into() });

    let mut received = Vec::new();
    for _ in 0..2 {
        let response = tokio::time::timeout(Duration::from_secs(5), responses.recv())
            .await
            .expect("worker timed out")
            .expect("channel closed");
        received.push(response);
    }

    assert!(received
        .iter()
        .any(|r| matches!(r, WorkerResponse::ScanCompleted { request_id: 1, entries } if entries.len() == 2)));
    assert!(received
        .iter()
        .any(|r| matches!(r, WorkerResponse::DeleteFailed { key, .. } if key == b"missing")));
    assert_eq!(store.len().unwrap(), 2);
}

#[tokio::test]
async fn dispatched_save_reaches_the_store() {
    let store = Arc::new(MemoryStore::with_entries([("k", "old")]));
    let (dispatcher, mut responses) = CommandDispatcher::new(StoreWorker::new(store.clone()));

    dispatcher.dispatch(WorkerMessage::SaveValue {
        key: "k".into(),
        value: "new".into(),
        exit_to_detail: false,
    });
    let response = responses.recv().await.unwrap();

    assert!(!response.is_failure());
    assert_eq!(store.get(b"k").unwrap(), Some(b"new".to_vec()));
}

#[test]
fn every_mode_renders() {
    let palette = AppState::default();
    assert!(screen(&palette).contains("---Main---"));

    let (search, actions) = drive(AppState::default(), &[Key::Enter]);
    assert_eq!(actions.len(), 1);
    assert!(screen(&search).contains("Searching..."));

    let id = search.search.pending_request().unwrap();
    let (search, _) = apply(
        search,
        Event::Worker(WorkerResponse::ScanCompleted {
            request_id: id,
            entries: vec![kvexplorer::KvEntry::new("user:1", "name = \"ada\"")],
        }),
    );
    let text = screen(&search);
    assert!(text.contains("user:1"));
    assert!(text.contains("---Search---"));

    let (detail, _) = drive(search, &[Key::Enter]);
    let text = screen(&detail);
    assert!(text.contains("Key: user:1"));
    assert!(text.contains("Value (TOML):"));

    let (edit, _) = drive(detail, &[Key::Char('i'), Key::Esc, Key::Char(':')]);
    let text = screen(&edit);
    assert!(text.contains("Editing: user:1"));
    assert!(text.contains("-- COMMAND LINE --"));

    let (add, _) = drive(AppState::default(), &[Key::Char('/'), Key::Char('a'), Key::Enter]);
    let text = screen(&add);
    assert!(text.contains("Key:"));
}

#[test]
fn failure_status_is_rendered() {
    let (state, _) = drive(AppState::default(), &[Key::Enter]);
    let id = state.search.pending_request().unwrap();
    let (state, _) = apply(
        state,
        Event::Worker(WorkerResponse::ScanFailed {
            request_id: id,
            message: "region unavailable".into(),
        }),
    );
    assert!(screen(&state).contains("Search failed: region unavailable"));
}
