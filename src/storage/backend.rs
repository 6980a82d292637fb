//! Store backend abstraction.
//!
//! This module defines the [`Store`] trait that abstracts over the key-value
//! backends the explorer can talk to. The worker only ever sees a
//! `dyn Store`, so switching between a remote cluster and a local file does
//! not touch the state machine.
//!
//! Keys and values are raw bytes. Ranges are half-open, see [`KeyRange`].

use crate::domain::error::Result;
use crate::domain::KeyRange;

/// A raw key-value pair as returned by scans and batch reads.
pub type KvPair = (Vec<u8>, Vec<u8>);

/// Abstraction over key-value store backends.
///
/// Implementations are shared between the worker tasks, so every method takes
/// `&self` and the trait requires `Send + Sync`. Calls may block; the worker
/// runs them on the blocking thread pool.
///
/// # Implementations
///
/// - [`MemoryStore`](crate::storage::MemoryStore): in-process ordered map
/// - [`JsonFileStore`](crate::storage::JsonFileStore): local JSON snapshot with atomic writes
/// - `TikvStore`: TiKV raw KV (cargo feature `tikv`)
pub trait Store: Send + Sync {
    /// Reads a single key.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Reads several keys at once, returning only those that exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    fn batch_get(&self, keys: &[Vec<u8>]) -> Result<Vec<KvPair>>;

    /// Writes a single key, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected or cannot be persisted.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Writes several pairs in one call.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected. Some backends may apply a
    /// prefix of the batch before failing.
    fn batch_put(&self, pairs: &[KvPair]) -> Result<()>;

    /// Deletes a single key.
    ///
    /// # Errors
    ///
    /// Local backends return [`ExplorerError::NotFound`](crate::domain::ExplorerError::NotFound)
    /// when the key does not exist. Remote backends treat deletes as idempotent.
    fn delete(&self, key: &[u8]) -> Result<()>;

    /// Deletes every key in `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete is rejected or cannot be persisted.
    fn delete_range(&self, range: &KeyRange) -> Result<()>;

    /// Up to `limit` pairs in `range`, ascending by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    fn scan(&self, range: &KeyRange, limit: usize) -> Result<Vec<KvPair>>;

    /// Up to `limit` pairs in `range`, descending by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    fn reverse_scan(&self, range: &KeyRange, limit: usize) -> Result<Vec<KvPair>>;
}
