//! Interactive runtime: owns the terminal, runs the event loop, executes actions.
//!
//! All side effects happen here. The apply step stays pure and returns an
//! [`Action`]; this module performs it.
//!
//! ```text
//! crossterm EventStream ──▶ map_key ──┐
//!                                     ├─▶ handle_event ─▶ Action ─▶ dispatcher / quit
//! dispatcher responses (mpsc) ────────┘
//! ```
//!
//! The screen is redrawn after every event.
//!
//! Structure:
//! - `input`: crossterm key mapping
//! - `terminal`: raw mode, alternate screen, panic hook

pub mod input;
pub mod terminal;

use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{Event as TermEvent, EventStream};
use futures_util::StreamExt;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::app::{handle_event, Action, AppState, Event};
use crate::storage::Store;
use crate::ui::{render, Theme};
use crate::worker::{CommandDispatcher, StoreWorker, WorkerResponse};

pub use input::map_key;
pub use terminal::{restore_terminal, setup_terminal, TerminalGuard};

/// State, theme and command layer of one interactive session.
pub struct Runtime {
    pub state: AppState,
    theme: Theme,
    dispatcher: CommandDispatcher,
    responses: UnboundedReceiver<WorkerResponse>,
}

impl Runtime {
    /// Creates a runtime over `store`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, state: AppState, theme: Theme) -> Self {
        let (dispatcher, responses) = CommandDispatcher::new(StoreWorker::new(store));
        Self {
            state,
            theme,
            dispatcher,
            responses,
        }
    }

    /// Applies one event and executes the resulting action.
    ///
    /// Returns `false` once the session should end.
    pub fn handle(&mut self, event: Event) -> bool {
        match handle_event(&mut self.state, event) {
            Some(Action::Quit) => {
                tracing::info!("quit requested");
                false
            }
            Some(Action::PostToWorker(message)) => {
                self.dispatcher.dispatch(message);
                true
            }
            None => true,
        }
    }

    /// Waits for the next worker response.
    pub async fn next_response(&mut self) -> Option<WorkerResponse> {
        self.responses.recv().await
    }

    /// Runs the interactive loop until quit or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up, drawn to or read.
    /// The terminal is restored in every case.
    pub async fn run(mut self) -> Result<()> {
        let mut guard = TerminalGuard::new()?;
        let mut events = EventStream::new();
        tracing::info!("interactive loop started");

        loop {
            guard
                .terminal()
                .draw(|frame| render(frame, &self.state, &self.theme))
                .context("Failed to draw frame")?;

            let event = tokio::select! {
                input = events.next() => match input {
                    Some(Ok(TermEvent::Key(key))) => match map_key(&key) {
                        Some(key) => Event::Key(key),
                        None => continue,
                    },
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                    None => break,
                },
                Some(response) = self.responses.recv() => Event::Worker(response),
            };

            if !self.handle(event) {
                break;
            }
        }

        tracing::info!("interactive loop finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Key, ModeKind};
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn search_results_flow_back_through_the_loop() {
        let store = Arc::new(MemoryStore::with_entries([("user:1", "a"), ("user:2", "b")]));
        let mut runtime = Runtime::new(store, AppState::default(), Theme::default());

        assert!(runtime.handle(Event::Key(Key::Enter)));
        assert_eq!(runtime.state.mode.kind(), ModeKind::Search);
        assert!(runtime.state.search.is_searching());

        let response = runtime.next_response().await.unwrap();
        assert!(runtime.handle(Event::Worker(response)));
        assert!(!runtime.state.search.is_searching());
        assert_eq!(runtime.state.search.results.len(), 2);
    }

    #[tokio::test]
    async fn interrupt_ends_the_session() {
        let mut runtime = Runtime::new(Arc::new(MemoryStore::new()), AppState::default(), Theme::default());
        assert!(!runtime.handle(Event::Key(Key::Interrupt)));
    }
}
