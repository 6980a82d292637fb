//! Background command layer for store operations.
//!
//! This module keeps slow store calls away from the interaction loop. The
//! state machine emits [`WorkerMessage`]s, the dispatcher runs them on the
//! blocking pool, and every message comes back as exactly one
//! [`WorkerResponse`].
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types
//! - `handler`: Executes a message against a [`Store`](crate::storage::Store)
//! - `dispatch`: Runs messages in the background and delivers responses

pub mod dispatch;
pub mod handler;
pub mod messages;

pub use dispatch::CommandDispatcher;
pub use handler::StoreWorker;
pub use messages::{WorkerMessage, WorkerResponse};
