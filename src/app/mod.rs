//! Application layer: the mode state machine.
//!
//! This module sits between the runtime loop and the worker/storage layers. It
//! owns the single [`AppState`] value and the pure transition [`apply`].
//!
//! # Architecture
//!
//! ```text
//! Key / WorkerResponse → apply(State) → (State', Option<Action>) → runtime
//!                            ↑                                        ↓
//!                            └────────── WorkerResponse ◀── worker ◀──┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects emitted by the apply step
//! - [`handler`]: Key and worker-response routing
//! - [`modes`]: Mode variants, detail sub-mode, `dd` gesture automaton
//! - [`list`]: Highlight and scroll window for lists
//! - [`palette`], [`search`], [`detail`], [`add`]: Per-mode sub-states
//! - [`state`]: The state container and its view model projection

pub mod actions;
pub mod add;
pub mod detail;
pub mod handler;
pub mod list;
pub mod modes;
pub mod palette;
pub mod search;
pub mod state;

pub use actions::Action;
pub use handler::{apply, handle_event, Event, Key};
pub use modes::{DeleteGesture, DetailView, EditSession, Mode, ModeKind};
pub use state::AppState;
