//! Store worker: executes one command message against the store.
//!
//! Every message resolves into exactly one response. Store errors never
//! escape; they are logged and turned into the matching `*Failed` response
//! whose message is shown as the status line.

use std::sync::Arc;

use crate::domain::error::Result;
use crate::domain::KvEntry;
use crate::storage::Store;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Executes [`WorkerMessage`]s against a shared store.
#[derive(Clone)]
pub struct StoreWorker {
    store: Arc<dyn Store>,
}

impl std::fmt::Debug for StoreWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreWorker").finish_non_exhaustive()
    }
}

impl StoreWorker {
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Helper for handling store operation results with consistent logging.
    fn handle_db_result<T>(
        operation: &str,
        result: Result<T>,
        on_success: impl FnOnce(T) -> WorkerResponse,
        on_failure: impl FnOnce(String) -> WorkerResponse,
    ) -> WorkerResponse {
        match result {
            Ok(value) => {
                tracing::debug!(operation, "store operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation, error = %e, "store operation failed");
                on_failure(e.to_string())
            }
        }
    }

    fn handle_scan(&self, request_id: u64, prefix: &str, limit: usize) -> WorkerResponse {
        let range = WorkerMessage::scan_range(prefix);
        Self::handle_db_result(
            "scan",
            self.store.scan(&range, limit),
            |pairs| {
                let entries: Vec<KvEntry> = pairs
                    .iter()
                    .map(|(k, v)| KvEntry::from_bytes(k, v))
                    .collect();
                tracing::debug!(request_id, count = entries.len(), "scan returned entries");
                WorkerResponse::ScanCompleted { request_id, entries }
            },
            |message| WorkerResponse::ScanFailed { request_id, message },
        )
    }

    fn handle_delete(&self, key: Vec<u8>) -> WorkerResponse {
        Self::handle_db_result(
            "delete",
            self.store.delete(&key),
            |()| WorkerResponse::KeyDeleted { key: key.clone() },
            |message| WorkerResponse::DeleteFailed {
                key: key.clone(),
                message,
            },
        )
    }

    fn handle_save(&self, key: Vec<u8>, value: String, exit_to_detail: bool) -> WorkerResponse {
        Self::handle_db_result(
            "save",
            self.store.put(&key, value.as_bytes()),
            |()| WorkerResponse::SaveCompleted {
                key: key.clone(),
                value: value.clone(),
                exit_to_detail,
            },
            |message| WorkerResponse::SaveFailed {
                key: key.clone(),
                message,
            },
        )
    }

    fn handle_add(&self, key: Vec<u8>, value: String) -> WorkerResponse {
        Self::handle_db_result(
            "add",
            self.store.put(&key, value.as_bytes()),
            |()| WorkerResponse::EntryAdded {
                key: key.clone(),
                value: value.clone(),
            },
            |message| WorkerResponse::AddFailed {
                key: key.clone(),
                message,
            },
        )
    }

    /// Processes a worker message and returns the appropriate response.
    ///
    /// Blocks for as long as the store call takes; callers on the async
    /// runtime go through [`CommandDispatcher`](crate::worker::CommandDispatcher).
    pub fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let span = tracing::debug_span!("worker_handle_message", operation = message.operation());
        let _guard = span.entered();

        match message {
            WorkerMessage::Scan {
                request_id,
                prefix,
                limit,
            } => self.handle_scan(request_id, &prefix, limit),
            WorkerMessage::DeleteKey { key } => self.handle_delete(key),
            WorkerMessage::SaveValue {
                key,
                value,
                exit_to_detail,
            } => self.handle_save(key, value, exit_to_detail),
            WorkerMessage::AddEntry { key, value } => self.handle_add(key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn worker() -> (Arc<MemoryStore>, StoreWorker) {
        let store = Arc::new(MemoryStore::with_entries([
            ("user:1", "{\"name\":\"a\"}"),
            ("user:2", "b"),
            ("order:1", "o"),
        ]));
        let worker = StoreWorker::new(store.clone());
        (store, worker)
    }

    #[test]
    fn scan_maps_pairs_to_entries() {
        let (_, worker) = worker();
        let response = worker.handle_message(WorkerMessage::scan(7, "user", 50));
        let WorkerResponse::ScanCompleted { request_id, entries } = response else {
            panic!("expected scan result");
        };
        assert_eq!(request_id, 7);
        assert_eq!(entries, vec![KvEntry::new("user:1", "{\"name\":\"a\"}"), KvEntry::new("user:2", "b")]);
    }

    #[test]
    fn empty_prefix_scans_all_with_limit() {
        let (_, worker) = worker();
        let WorkerResponse::ScanCompleted { entries, .. } = worker.handle_message(WorkerMessage::scan(1, "", 2))
        else {
            panic!("expected scan result");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key_text(), "order:1");
    }

    #[test]
    fn delete_then_delete_again_fails() {
        let (store, worker) = worker();
        let ok = worker.handle_message(WorkerMessage::DeleteKey { key: "user:2".into() });
        assert_eq!(ok, WorkerResponse::KeyDeleted { key: "user:2".into() });
        assert_eq!(store.get(b"user:2").unwrap(), None);

        let failed = worker.handle_message(WorkerMessage::DeleteKey { key: "user:2".into() });
        let WorkerResponse::DeleteFailed { key, message } = failed else {
            panic!("expected failure");
        };
        assert_eq!(key, b"user:2");
        assert!(message.contains("user:2"));
    }

    #[test]
    fn save_and_add_write_through() {
        let (store, worker) = worker();
        let saved = worker.handle_message(WorkerMessage::SaveValue {
            key: "user:2".into(),
            value: "B".into(),
            exit_to_detail: true,
        });
        assert_eq!(
            saved,
            WorkerResponse::SaveCompleted {
                key: "user:2".into(),
                value: "B".into(),
                exit_to_detail: true
            }
        );
        let added = worker.handle_message(WorkerMessage::AddEntry {
            key: "new".into(),
            value: "x".into(),
        });
        assert!(!added.is_failure());
        assert_eq!(store.get(b"user:2").unwrap(), Some(b"B".to_vec()));
        assert_eq!(store.get(b"new").unwrap(), Some(b"x".to_vec()));
    }

    #[test]
    fn binary_keys_round_trip_unchanged() {
        let key = b"bin\xff\x01".to_vec();
        let store = Arc::new(MemoryStore::with_entries([(key.clone(), b"v".to_vec())]));
        let worker = StoreWorker::new(store.clone());

        let WorkerResponse::ScanCompleted { entries, .. } = worker.handle_message(WorkerMessage::scan(1, "", 10))
        else {
            panic!("expected scan result");
        };
        assert_eq!(entries[0].key, key);

        let saved = worker.handle_message(WorkerMessage::SaveValue {
            key: entries[0].key.clone(),
            value: "w".into(),
            exit_to_detail: false,
        });
        assert!(!saved.is_failure());
        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(store.get(&key).unwrap(), Some(b"w".to_vec()));

        let deleted = worker.handle_message(WorkerMessage::DeleteKey { key: key.clone() });
        assert_eq!(deleted, WorkerResponse::KeyDeleted { key });
        assert!(store.is_empty().unwrap());
    }
}
