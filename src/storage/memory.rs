//! In-process store backed by an ordered map.
//!
//! Used by the `memory` backend and throughout the tests. Data lives only as
//! long as the process.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{Mutex, MutexGuard};

use crate::domain::error::{ExplorerError, Result};
use crate::domain::KeyRange;
use crate::storage::backend::{KvPair, Store};

type Entries = BTreeMap<Vec<u8>, Vec<u8>>;

/// Ordered in-memory key-value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Entries>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pre-populated store. Accepts text or raw byte pairs.
    pub fn with_entries<K, V, I>(pairs: I) -> Self
    where
        K: Into<Vec<u8>>,
        V: Into<Vec<u8>>,
        I: IntoIterator<Item = (K, V)>,
    {
        let entries = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Number of stored keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the map lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    /// # Errors
    ///
    /// Returns an error if the map lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Entries>> {
        self.entries
            .lock()
            .map_err(|_| ExplorerError::Store("memory store lock poisoned".to_string()))
    }
}

/// Pairs of `entries` inside `range`, ascending or descending, at most `limit`.
pub(crate) fn collect_range(entries: &Entries, range: &KeyRange, limit: usize, reverse: bool) -> Vec<KvPair> {
    if range.end.as_ref().is_some_and(|end| *end <= range.start) {
        return Vec::new();
    }
    let bounds = (
        Bound::Included(range.start.clone()),
        range.end.clone().map_or(Bound::Unbounded, Bound::Excluded),
    );
    let clone = |(k, v): (&Vec<u8>, &Vec<u8>)| (k.clone(), v.clone());
    let iter = entries.range::<Vec<u8>, _>(bounds);
    if reverse {
        iter.rev().take(limit).map(clone).collect()
    } else {
        iter.take(limit).map(clone).collect()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn batch_get(&self, keys: &[Vec<u8>]) -> Result<Vec<KvPair>> {
        let entries = self.lock()?;
        Ok(keys
            .iter()
            .filter_map(|k| entries.get(k).map(|v| (k.clone(), v.clone())))
            .collect())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.lock()?.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn batch_put(&self, pairs: &[KvPair]) -> Result<()> {
        self.lock()?.extend(pairs.iter().cloned());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.lock()?
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| ExplorerError::NotFound(String::from_utf8_lossy(key).into_owned()))
    }

    fn delete_range(&self, range: &KeyRange) -> Result<()> {
        self.lock()?.retain(|k, _| !range.contains(k));
        Ok(())
    }

    fn scan(&self, range: &KeyRange, limit: usize) -> Result<Vec<KvPair>> {
        let entries = self.lock()?;
        Ok(collect_range(&entries, range, limit, false))
    }

    fn reverse_scan(&self, range: &KeyRange, limit: usize) -> Result<Vec<KvPair>> {
        let entries = self.lock()?;
        Ok(collect_range(&entries, range, limit, true))
    }
}
