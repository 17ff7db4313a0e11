//! Remote store contract

use crate::error::Result;
use crate::path::StorePath;
use crate::snapshot::Snapshot;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Network-accessible hierarchical key-value tree
///
/// This is the subset of a realtime database the sync layer relies on:
/// scoped writes with generated keys, partial updates, deletes, and one-shot
/// reads. Every future resolves only once the store has acknowledged the
/// request (or failed it).
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Insert `value` as a new child of `path` under a store-generated key
    ///
    /// Returns the generated key.
    async fn push(&self, path: &StorePath, value: Value) -> Result<String>;

    /// Overwrite the given fields of the node at `path`, leaving others intact
    async fn update(&self, path: &StorePath, updates: Map<String, Value>) -> Result<()>;

    /// Delete the node at `path` and everything beneath it
    async fn remove(&self, path: &StorePath) -> Result<()>;

    /// Read the node at `path` once
    async fn once(&self, path: &StorePath) -> Result<Snapshot>;
}
