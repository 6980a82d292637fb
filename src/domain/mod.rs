//! Domain layer for kvexplorer.
//!
//! Core types shared by the state machine, the command layer and the store
//! backends, independent of the terminal or any particular store client.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`entry`]: Key/value pairs returned by scans
//! - [`keys`]: Scan ranges and the prefix upper bound

pub mod entry;
pub mod error;
pub mod keys;

pub use entry::{display_text, KvEntry};
pub use error::{ExplorerError, Result};
pub use keys::{next_key, KeyRange};
