//! Command and result message types for the background command layer.
//!
//! This module defines the request and response protocol between the
//! interaction loop and the store worker. Every [`WorkerMessage`] resolves into
//! exactly one [`WorkerResponse`], success or failure, which is fed back into
//! the same apply step as keystrokes.

use crate::domain::{KeyRange, KvEntry};
use serde::{Deserialize, Serialize};

/// Store operations requested by the state machine.
///
/// Keys travel as the exact bytes the store returned, so binary keys are
/// written and deleted unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Scan keys sharing `prefix` (every key when empty), at most `limit` entries.
    Scan {
        /// Correlates the response with the search that issued it.
        request_id: u64,
        prefix: String,
        limit: usize,
    },

    /// Delete a single key.
    DeleteKey { key: Vec<u8> },

    /// Overwrite the value of an existing key from the editor.
    SaveValue {
        key: Vec<u8>,
        value: String,
        /// Whether the editor closes once the write lands (`:x`, `:wq`).
        exit_to_detail: bool,
    },

    /// Create a key from the add wizard.
    AddEntry { key: Vec<u8>, value: String },
}

impl WorkerMessage {
    /// Create a `Scan` message for a search box query.
    #[must_use]
    pub fn scan(request_id: u64, prefix: impl Into<String>, limit: usize) -> Self {
        Self::Scan {
            request_id,
            prefix: prefix.into(),
            limit,
        }
    }

    /// Key range covered by a `Scan` message.
    #[must_use]
    pub fn scan_range(prefix: &str) -> KeyRange {
        KeyRange::for_query(prefix)
    }

    /// The failure response this message resolves into when it cannot run.
    #[must_use]
    pub fn failed(&self, message: impl Into<String>) -> WorkerResponse {
        let message = message.into();
        match self {
            Self::Scan { request_id, .. } => WorkerResponse::ScanFailed {
                request_id: *request_id,
                message,
            },
            Self::DeleteKey { key } => WorkerResponse::DeleteFailed {
                key: key.clone(),
                message,
            },
            Self::SaveValue { key, .. } => WorkerResponse::SaveFailed {
                key: key.clone(),
                message,
            },
            Self::AddEntry { key, .. } => WorkerResponse::AddFailed {
                key: key.clone(),
                message,
            },
        }
    }

    /// Short operation name used in logs.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Scan { .. } => "scan",
            Self::DeleteKey { .. } => "delete",
            Self::SaveValue { .. } => "save",
            Self::AddEntry { .. } => "add",
        }
    }
}

/// Results delivered back to the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// A scan finished; entries are in ascending key order.
    ScanCompleted {
        request_id: u64,
        entries: Vec<KvEntry>,
    },

    ScanFailed { request_id: u64, message: String },

    KeyDeleted { key: Vec<u8> },

    DeleteFailed { key: Vec<u8>, message: String },

    /// The edited value was written.
    SaveCompleted {
        key: Vec<u8>,
        value: String,
        exit_to_detail: bool,
    },

    SaveFailed { key: Vec<u8>, message: String },

    EntryAdded { key: Vec<u8>, value: String },

    AddFailed { key: Vec<u8>, message: String },
}

impl WorkerResponse {
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::ScanFailed { .. }
                | Self::DeleteFailed { .. }
                | Self::SaveFailed { .. }
                | Self::AddFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_message_has_a_failure_response() {
        let messages = [
            WorkerMessage::scan(3, "p", 10),
            WorkerMessage::DeleteKey { key: "k".into() },
            WorkerMessage::SaveValue {
                key: "k".into(),
                value: "v".into(),
                exit_to_detail: false,
            },
            WorkerMessage::AddEntry {
                key: "k".into(),
                value: "v".into(),
            },
        ];
        for message in &messages {
            assert!(message.failed("boom").is_failure(), "{}", message.operation());
        }
        assert_eq!(
            messages[0].failed("boom"),
            WorkerResponse::ScanFailed {
                request_id: 3,
                message: "boom".into()
            }
        );
    }

    #[test]
    fn messages_survive_json() {
        for message in [
            WorkerMessage::scan(1, "user", 50),
            WorkerMessage::DeleteKey {
                key: b"bin\xff\x01".to_vec(),
            },
        ] {
            let json = serde_json::to_string(&message).unwrap();
            assert_eq!(serde_json::from_str::<WorkerMessage>(&json).unwrap(), message);
        }
    }
}
