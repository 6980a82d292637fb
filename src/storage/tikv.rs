//! TiKV raw key-value backend.
//!
//! Talks to a cluster through the placement driver endpoints using the raw
//! (non-transactional) API in the default API v2 keyspace. The client is
//! async; [`Store`] calls arrive on the blocking thread pool and are driven to
//! completion on the runtime captured at connect time.

use std::future::Future;
use std::ops::Bound;

use tikv_client::{BoundRange, Config as ClientConfig, Key, RawClient};
use tokio::runtime::Handle;

use crate::domain::error::{ExplorerError, Result};
use crate::domain::KeyRange;
use crate::storage::backend::{KvPair, Store};

/// Store backed by a TiKV cluster.
pub struct TikvStore {
    client: RawClient,
    runtime: Handle,
}

impl std::fmt::Debug for TikvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TikvStore").finish_non_exhaustive()
    }
}

fn store_error(e: tikv_client::Error) -> ExplorerError {
    ExplorerError::Store(e.to_string())
}

fn bound_range(range: &KeyRange) -> BoundRange {
    let start = Bound::Included(Key::from(range.start.clone()));
    let end = range
        .end
        .clone()
        .map_or(Bound::Unbounded, |end| Bound::Excluded(Key::from(end)));
    BoundRange::from((start, end))
}

fn limit_u32(limit: usize) -> u32 {
    u32::try_from(limit).unwrap_or(u32::MAX)
}

fn into_pairs(pairs: Vec<tikv_client::KvPair>) -> Vec<KvPair> {
    pairs
        .into_iter()
        .map(|pair| (Vec::from(pair.key().clone()), pair.value().clone()))
        .collect()
}

impl TikvStore {
    /// Connects to the cluster through `pd_endpoints`.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint list is empty or the placement driver
    /// cannot be reached.
    pub async fn connect(pd_endpoints: &[String]) -> Result<Self> {
        if pd_endpoints.is_empty() {
            return Err(ExplorerError::Config("no PD endpoints specified".to_string()));
        }
        tracing::info!(endpoints = ?pd_endpoints, "connecting to TiKV");

        let config = ClientConfig::default().with_default_keyspace();
        let client = RawClient::new_with_config(pd_endpoints.to_vec(), config)
            .await
            .map_err(store_error)?;

        Ok(Self {
            client,
            runtime: Handle::current(),
        })
    }

    fn block_on<F: Future>(&self, fut: F) -> F::Output {
        self.runtime.block_on(fut)
    }
}

impl Store for TikvStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.block_on(self.client.get(key.to_vec())).map_err(store_error)
    }

    fn batch_get(&self, keys: &[Vec<u8>]) -> Result<Vec<KvPair>> {
        self.block_on(self.client.batch_get(keys.to_vec()))
            .map(into_pairs)
            .map_err(store_error)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.block_on(self.client.put(key.to_vec(), value.to_vec()))
            .map_err(store_error)
    }

    fn batch_put(&self, pairs: &[KvPair]) -> Result<()> {
        self.block_on(self.client.batch_put(pairs.to_vec()))
            .map_err(store_error)
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.block_on(self.client.delete(key.to_vec()))
            .map_err(store_error)
    }

    fn delete_range(&self, range: &KeyRange) -> Result<()> {
        self.block_on(self.client.delete_range(bound_range(range)))
            .map_err(store_error)
    }

    fn scan(&self, range: &KeyRange, limit: usize) -> Result<Vec<KvPair>> {
        self.block_on(self.client.scan(bound_range(range), limit_u32(limit)))
            .map(into_pairs)
            .map_err(store_error)
    }

    fn reverse_scan(&self, range: &KeyRange, limit: usize) -> Result<Vec<KvPair>> {
        self.block_on(self.client.scan_reverse(bound_range(range), limit_u32(limit)))
            .map(into_pairs)
            .map_err(store_error)
    }
}
