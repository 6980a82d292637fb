//! kvexplorer: an interactive terminal explorer and modal editor for key-value stores.
//!
//! kvexplorer lets you:
//! - Browse keys by prefix with a windowed result list
//! - Inspect values with automatic JSON / YAML / TOML pretty-printing
//! - Edit values in a vi-style modal editor (`:w`, `:x`, `:q`, `dd`)
//! - Add and delete entries without leaving the terminal
//! - Talk to TiKV (cargo feature `tikv`), a local JSON file or an in-memory map

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Binary (main.rs) + Runtime (runtime/)              │  ← Entry point, event loop
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/, editor/)                  │  ← State machine
//! │  - Mode dispatch and transitions                    │
//! │  - Modal editor                                     │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Worker Layer  │   │ Format        │
//! │ (ui/)         │   │ (worker/)     │   │ (format/)     │
//! │ - Rendering   │   │ - Dispatch    │   │ - Detection   │
//! │ - Theming     │   │ - Store calls │   │ - Pretty print│
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage Layer (storage/)                           │
//! │  - Store trait, memory / JSON file / TiKV backends  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure, Config & Domain                    │
//! │  - Paths, JSON config, errors, entries, key ranges  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Mode state machine with event/action model
//! - [`editor`]: Vi-style edit buffer and sub-modes
//! - [`format`]: Value format detection and pretty-printing
//! - [`domain`]: Core domain types (entries, key ranges, errors)
//! - [`storage`]: Store trait and backends
//! - [`worker`]: Background command layer
//! - [`runtime`]: Terminal lifecycle and event loop
//! - [`ui`]: ratatui rendering with theme support
//! - [`config`]: JSON configuration file
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: File-based tracing
//!
//! # Example
//!
//! Driving the state machine without a terminal:
//!
//! ```rust
//! use kvexplorer::app::{apply, AppState, Event, Key, ModeKind};
//!
//! let (state, action) = apply(AppState::default(), Event::Key(Key::Enter));
//! assert_eq!(state.mode.kind(), ModeKind::Search);
//! assert!(action.is_some()); // initial scan for the empty prefix
//! ```

pub mod app;
pub mod config;
pub mod domain;
pub mod editor;
pub mod format;
pub mod infrastructure;
pub mod observability;
pub mod runtime;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{apply, handle_event, Action, AppState, Event, Key, Mode, ModeKind};
pub use config::{BackendKind, Config};
pub use domain::{ExplorerError, KvEntry, Result};
pub use ui::Theme;

/// Builds the initial application state for `config`.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(scan_limit = config.scan_limit, "initializing application state");
    AppState::new(config.scan_limit)
}
