//! Key-value entry model shown in search results.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Renders store bytes for display.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD. The result is never sent
/// back to the store.
#[must_use]
pub fn display_text(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// A key/value pair produced by a scan, as raw store bytes.
///
/// Entries keep the order in which the store returned them (ascending by key
/// bytes). The UI never re-sorts a result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvEntry {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl KvEntry {
    #[must_use]
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn from_bytes(key: &[u8], value: &[u8]) -> Self {
        Self::new(key, value)
    }

    #[must_use]
    pub fn key_text(&self) -> Cow<'_, str> {
        display_text(&self.key)
    }

    #[must_use]
    pub fn value_text(&self) -> Cow<'_, str> {
        display_text(&self.value)
    }
}
