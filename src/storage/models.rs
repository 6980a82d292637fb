//! On-disk record types for the local file backend.
//!
//! The file backend persists a [`StoreSnapshot`]: a versioned, human-readable
//! object mapping keys to values. These types are separate from
//! [`KvEntry`](crate::domain::KvEntry) so the file format can evolve without
//! touching the state machine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Top-level structure serialized to the data file.
///
/// ```json
/// {
///   "version": 1,
///   "updated_at": 1700000000,
///   "entries": {
///     "user:1": "{\"name\":\"alice\"}"
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Version of the file format for future migrations.
    pub version: u32,

    /// Unix timestamp of the last write, `None` for a fresh file.
    #[serde(default)]
    pub updated_at: Option<i64>,

    /// All entries, ordered by key.
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            updated_at: None,
            entries: BTreeMap::new(),
        }
    }
}

impl StoreSnapshot {
    /// Stamps the snapshot with the current time.
    pub fn touch(&mut self) {
        self.updated_at = Some(chrono::Utc::now().timestamp());
    }
}
