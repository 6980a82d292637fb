//! Structured logging to a rotating file.
//!
//! All crate code logs through `tracing` macros. Because the terminal is in
//! raw mode while the explorer runs, the subscriber writes to a file under
//! the data directory instead of stderr.
//!
//! # Configuration
//!
//! The filter is chosen by:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `file_writer`: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
