//! JSON file-based store backend.
//!
//! This module provides a local, human-readable store using JSON
//! serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(log n) lookups, the whole file is loaded once on open
//! - **Write**: O(n), every mutation rewrites the snapshot
//! - **Best for**: local fixtures and small datasets
//!
//! Keys and values must be valid UTF-8 because the snapshot stores them as
//! JSON strings.

use crate::domain::error::{ExplorerError, Result};
use crate::domain::KeyRange;
use crate::storage::backend::{KvPair, Store};
use crate::storage::models::StoreSnapshot;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// JSON file store backend.
///
/// The entire snapshot is kept in memory behind a mutex and persisted after
/// every successful mutation. A mutation that cannot be written leaves both
/// the file and the in-memory copy unchanged.
#[derive(Debug)]
pub struct JsonFileStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory copy of the file, loaded on creation.
    data: Mutex<StoreSnapshot>,
}

impl JsonFileStore {
    /// Creates or opens a JSON file store.
    ///
    /// If the file exists, loads existing data. Otherwise starts empty; the
    /// file is written on the first mutation. Parent directories are created
    /// automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON file store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            StoreSnapshot::default()
        };

        tracing::debug!(entries = data.entries.len(), "file store opened");

        Ok(Self {
            file_path,
            data: Mutex::new(data),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StoreSnapshot> {
        let contents = std::fs::read_to_string(path)?;
        let data: StoreSnapshot = serde_json::from_str(&contents)
            .map_err(|e| ExplorerError::Store(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            entries = data.entries.len(),
            "loaded store snapshot"
        );

        Ok(data)
    }

    /// Writes the snapshot to a temporary file, then renames it over the target.
    fn save_to_file(&self, data: &StoreSnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| ExplorerError::Store(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(entries = data.entries.len(), "store saved");
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreSnapshot>> {
        self.data
            .lock()
            .map_err(|_| ExplorerError::Store("file store lock poisoned".to_string()))
    }

    /// Applies `change` to a copy of the snapshot and commits it once saved.
    fn mutate<T>(&self, change: impl FnOnce(&mut StoreSnapshot) -> Result<T>) -> Result<T> {
        let mut guard = self.lock()?;
        let mut next = guard.clone();
        let out = change(&mut next)?;
        next.touch();
        self.save_to_file(&next)?;
        *guard = next;
        Ok(out)
    }

    fn scan_snapshot(&self, range: &KeyRange, limit: usize, reverse: bool) -> Result<Vec<KvPair>> {
        let data = self.lock()?;
        let to_pair = |(k, v): (&String, &String)| (k.clone().into_bytes(), v.clone().into_bytes());
        let in_range = |(k, _): &(&String, &String)| range.contains(k.as_bytes());
        let pairs = if reverse {
            data.entries.iter().rev().filter(in_range).take(limit).map(to_pair).collect()
        } else {
            data.entries.iter().filter(in_range).take(limit).map(to_pair).collect()
        };
        Ok(pairs)
    }
}

fn utf8(bytes: &[u8], what: &str) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|_| ExplorerError::Store(format!("{what} is not valid UTF-8")))
}

impl Store for JsonFileStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let key = utf8(key, "key")?;
        Ok(self.lock()?.entries.get(&key).map(|v| v.clone().into_bytes()))
    }

    fn batch_get(&self, keys: &[Vec<u8>]) -> Result<Vec<KvPair>> {
        let data = self.lock()?;
        let mut found = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = data.entries.get(&utf8(key, "key")?) {
                found.push((key.clone(), value.clone().into_bytes()));
            }
        }
        Ok(found)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let _span = tracing::debug_span!("json_put", key = %String::from_utf8_lossy(key)).entered();
        let key = utf8(key, "key")?;
        let value = utf8(value, "value")?;
        self.mutate(|data| {
            data.entries.insert(key, value);
            Ok(())
        })
    }

    fn batch_put(&self, pairs: &[KvPair]) -> Result<()> {
        let _span = tracing::debug_span!("json_batch_put", count = pairs.len()).entered();
        let decoded = pairs
            .iter()
            .map(|(k, v)| Ok((utf8(k, "key")?, utf8(v, "value")?)))
            .collect::<Result<Vec<_>>>()?;
        self.mutate(|data| {
            data.entries.extend(decoded);
            Ok(())
        })
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        let _span = tracing::debug_span!("json_delete", key = %String::from_utf8_lossy(key)).entered();
        let key = utf8(key, "key")?;
        self.mutate(|data| {
            data.entries
                .remove(&key)
                .map(|_| ())
                .ok_or(ExplorerError::NotFound(key))
        })
    }

    fn delete_range(&self, range: &KeyRange) -> Result<()> {
        self.mutate(|data| {
            let before = data.entries.len();
            data.entries.retain(|k, _| !range.contains(k.as_bytes()));
            tracing::debug!(removed = before - data.entries.len(), "range deleted");
            Ok(())
        })
    }

    fn scan(&self, range: &KeyRange, limit: usize) -> Result<Vec<KvPair>> {
        self.scan_snapshot(range, limit, false)
    }

    fn reverse_scan(&self, range: &KeyRange, limit: usize) -> Result<Vec<KvPair>> {
        self.scan_snapshot(range, limit, true)
    }
}
