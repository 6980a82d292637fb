//! Detached execution of worker messages.
//!
//! The interaction loop never waits on the store. [`CommandDispatcher::dispatch`]
//! runs the message on tokio's blocking pool and delivers the response on an
//! unbounded channel that the loop drains alongside terminal input.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::domain::ExplorerError;
use crate::worker::{StoreWorker, WorkerMessage, WorkerResponse};

/// Runs store commands off the interaction path.
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    worker: StoreWorker,
    responses: UnboundedSender<WorkerResponse>,
}

impl CommandDispatcher {
    /// Creates a dispatcher and the receiver its responses arrive on.
    #[must_use]
    pub fn new(worker: StoreWorker) -> (Self, UnboundedReceiver<WorkerResponse>) {
        let (responses, rx) = mpsc::unbounded_channel();
        (Self { worker, responses }, rx)
    }

    /// Starts `message` in the background and returns immediately.
    ///
    /// Must be called from within a tokio runtime. Exactly one response is
    /// sent per message; a panicking store call becomes the message's failure
    /// response.
    pub fn dispatch(&self, message: WorkerMessage) {
        tracing::debug!(operation = message.operation(), "dispatching worker message");
        let worker = self.worker.clone();
        let responses = self.responses.clone();

        tokio::spawn(async move {
            let fallback = message.clone();
            let response = match tokio::task::spawn_blocking(move || worker.handle_message(message)).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(error = %e, operation = fallback.operation(), "worker task failed");
                    let error = ExplorerError::Worker(format!("task failed: {e}"));
                    fallback.failed(error.to_string())
                }
            };
            if responses.send(response).is_err() {
                tracing::debug!("response dropped, interaction loop has exited");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{KeyRange, Result};
    use crate::storage::{KvPair, MemoryStore, Store};
    use std::sync::Arc;

    struct PanickingStore;

    impl Store for PanickingStore {
        fn get(&self, _: &[u8]) -> Result<Option<Vec<u8>>> {
            panic!("store crashed")
        }
        fn batch_get(&self, _: &[Vec<u8>]) -> Result<Vec<KvPair>> {
            panic!("store crashed")
        }
        fn put(&self, _: &[u8], _: &[u8]) -> Result<()> {
            panic!("store crashed")
        }
        fn batch_put(&self, _: &[KvPair]) -> Result<()> {
            panic!("store crashed")
        }
        fn delete(&self, _: &[u8]) -> Result<()> {
            panic!("store crashed")
        }
        fn delete_range(&self, _: &KeyRange) -> Result<()> {
            panic!("store crashed")
        }
        fn scan(&self, _: &KeyRange, _: usize) -> Result<Vec<KvPair>> {
            panic!("store crashed")
        }
        fn reverse_scan(&self, _: &KeyRange, _: usize) -> Result<Vec<KvPair>> {
            panic!("store crashed")
        }
    }

    #[tokio::test]
    async fn responses_arrive_on_the_channel() {
        let store = Arc::new(MemoryStore::with_entries([("a", "1"), ("b", "2")]));
        let (dispatcher, mut rx) = CommandDispatcher::new(StoreWorker::new(store));

        dispatcher.dispatch(WorkerMessage::scan(9, "", 50));
        let response = rx.recv().await.unwrap();
        let WorkerResponse::ScanCompleted { request_id, entries } = response else {
            panic!("expected scan result");
        };
        assert_eq!(request_id, 9);
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn panicking_store_yields_worker_error() {
        let (dispatcher, mut rx) = CommandDispatcher::new(StoreWorker::new(Arc::new(PanickingStore)));

        dispatcher.dispatch(WorkerMessage::scan(4, "", 50));
        let response = rx.recv().await.unwrap();
        let WorkerResponse::ScanFailed { request_id, message } = response else {
            panic!("expected scan failure");
        };
        assert_eq!(request_id, 4);
        assert!(message.starts_with("Worker communication error: task failed"), "{message}");

        dispatcher.dispatch(WorkerMessage::DeleteKey { key: b"k".to_vec() });
        let response = rx.recv().await.unwrap();
        assert!(matches!(response, WorkerResponse::DeleteFailed { key, .. } if key == b"k"));
    }
}
