//! Storage layer: the key-value store the explorer browses and edits.
//!
//! This module provides the [`Store`] abstraction consumed by the worker and
//! the backends behind it. Which backend is opened is decided by
//! [`Config::backend`](crate::config::Config::backend).
//!
//! # Modules
//!
//! - `backend`: Store trait abstraction for backend implementations
//! - `memory`: In-process ordered map
//! - `json`: JSON file-based store with atomic writes
//! - `models`: On-disk snapshot format of the JSON store
//! - `tikv`: TiKV raw KV client (cargo feature `tikv`)

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;
#[cfg(feature = "tikv")]
pub mod tikv;

pub use backend::{KvPair, Store};
pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use models::StoreSnapshot;
#[cfg(feature = "tikv")]
pub use tikv::TikvStore;

use std::sync::Arc;

use crate::config::{BackendKind, Config};
use crate::domain::error::Result;

/// Opens the store selected by `config`.
///
/// Must be called from within a tokio runtime when the TiKV backend is used.
///
/// # Errors
///
/// Returns an error if the backend cannot be opened or reached, or if the
/// TiKV backend is selected in a build without the `tikv` feature.
pub async fn open_store(config: &Config) -> Result<Arc<dyn Store>> {
    tracing::info!(backend = ?config.backend, "opening store");
    match config.backend {
        BackendKind::Memory => Ok(Arc::new(MemoryStore::new())),
        BackendKind::File => Ok(Arc::new(JsonFileStore::new(config.data_file_path())?)),
        BackendKind::Tikv => open_tikv(config).await,
    }
}

#[cfg(feature = "tikv")]
async fn open_tikv(config: &Config) -> Result<Arc<dyn Store>> {
    if !config.user.is_empty() {
        tracing::warn!("user/passwd are not supported by the raw client and are ignored");
    }
    Ok(Arc::new(TikvStore::connect(&config.pd_address).await?))
}

#[cfg(not(feature = "tikv"))]
#[allow(clippy::unused_async)]
async fn open_tikv(_config: &Config) -> Result<Arc<dyn Store>> {
    Err(crate::domain::ExplorerError::Config(
        "the tikv backend requires building with the `tikv` feature".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::KeyRange;

    #[tokio::test]
    async fn opens_memory_and_file_backends() {
        let dir = tempfile::TempDir::new().unwrap();
        let memory = Config {
            backend: BackendKind::Memory,
            ..Config::default()
        };
        let store = open_store(&memory).await.unwrap();
        store.put(b"k", b"v").unwrap();
        assert_eq!(store.scan(&KeyRange::all(), 10).unwrap().len(), 1);

        let file = Config {
            backend: BackendKind::File,
            data_file: Some(dir.path().join("s.json").display().to_string()),
            ..Config::default()
        };
        let store = open_store(&file).await.unwrap();
        store.put(b"k", b"v").unwrap();
        assert!(dir.path().join("s.json").exists());
    }
}
