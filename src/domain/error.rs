//! Error types for kvexplorer.
//!
//! This module defines the centralized error type [`ExplorerError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for kvexplorer operations.
///
/// Store failures never escape the interactive loop: the worker turns them into
/// response messages carrying the rendered error text. The remaining variants
/// surface during startup (configuration, store connection, filesystem).
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// A store operation failed.
    ///
    /// Covers transport failures, rejected writes and malformed data returned
    /// by the backend. The string contains a description of what went wrong.
    #[error("Store error: {0}")]
    Store(String),

    /// The key addressed by a point operation does not exist.
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A value could not be parsed or re-serialized in its detected format.
    ///
    /// Never shown to the user; the formatter falls back to the raw text.
    #[error("Format error: {0}")]
    Format(String),

    /// Communication with the background command layer failed.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

/// A specialized `Result` type for kvexplorer operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;
