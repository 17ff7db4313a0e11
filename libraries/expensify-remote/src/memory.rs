use crate::push_id::PushIdGenerator;
use async_trait::async_trait;
use expensify_core::path::validate_key;
use expensify_core::{ExpensifyError, RemoteStore, Result, Snapshot, StorePath, UserId};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory realtime database for tests and offline use.
///
/// Holds a single JSON tree and follows the hosted database's rules: writing
/// `null` deletes, empty objects disappear, pushes get sortable generated keys,
/// and a partial update on a missing node creates it.
#[derive(Clone, Debug, Default)]
pub struct MemoryRemoteStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    root: Value,
    push_ids: PushIdGenerator,
    offline: bool,
    denied: HashSet<UserId>,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the node at `path` (seeding fixtures)
    pub async fn set(&self, path: &StorePath, value: Value) {
        let mut inner = self.inner.write().await;
        write_at(&mut inner.root, path, value);
    }

    /// While offline every call fails with a network error
    pub async fn set_offline(&self, offline: bool) {
        self.inner.write().await.offline = offline;
    }

    /// Reject every call under `users/{uid}`
    pub async fn deny(&self, uid: &UserId) {
        self.inner.write().await.denied.insert(uid.clone());
    }

    pub async fn allow(&self, uid: &UserId) {
        self.inner.write().await.denied.remove(uid);
    }

    /// Copy of the entire tree
    pub async fn dump(&self) -> Value {
        self.inner.read().await.root.clone()
    }
}

impl Inner {
    fn check_access(&self, path: &StorePath) -> Result<()> {
        if self.offline {
            return Err(ExpensifyError::network("Memory store is offline"));
        }

        let mut segments = path.segments();
        if let (Some("users"), Some(uid)) = (segments.next(), segments.next()) {
            if self.denied.contains(&UserId::new(uid)) {
                return Err(ExpensifyError::permission_denied(format!(
                    "Access to {} denied",
                    path
                )));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MemoryRemoteStore {
    async fn push(&self, path: &StorePath, value: Value) -> Result<String> {
        let mut inner = self.inner.write().await;
        inner.check_access(path)?;

        let key = inner.push_ids.next_id();
        let child = path.child(&key)?;
        write_at(&mut inner.root, &child, value);

        debug!(path = %path, key = %key, "Pushed value");
        Ok(key)
    }

    async fn update(&self, path: &StorePath, updates: Map<String, Value>) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.check_access(path)?;

        for key in updates.keys() {
            validate_key(key)?;
        }
        if updates.is_empty() {
            return Ok(());
        }

        let node = node_mut(&mut inner.root, path);
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        if let Value::Object(map) = node {
            for (key, value) in updates {
                if value.is_null() {
                    map.remove(&key);
                } else {
                    map.insert(key, strip_nulls(value));
                }
            }
        }
        prune(&mut inner.root);

        debug!(path = %path, "Updated node");
        Ok(())
    }

    async fn remove(&self, path: &StorePath) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.check_access(path)?;

        let segments: Vec<&str> = path.segments().collect();
        remove_at(&mut inner.root, &segments);
        prune(&mut inner.root);

        debug!(path = %path, "Removed node");
        Ok(())
    }

    async fn once(&self, path: &StorePath) -> Result<Snapshot> {
        let inner = self.inner.read().await;
        inner.check_access(path)?;

        let value = path
            .segments()
            .try_fold(&inner.root, |node, segment| node.get(segment))
            .cloned()
            .unwrap_or(Value::Null);

        Ok(Snapshot::new(Some(path.key().to_string()), value))
    }
}

/// Walk to `path`, turning anything in the way into an object
fn node_mut<'a>(mut node: &'a mut Value, path: &StorePath) -> &'a mut Value {
    for segment in path.segments() {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        node = match node {
            Value::Object(map) => map.entry(segment.to_string()).or_insert(Value::Null),
            _ => unreachable!("node was just replaced with an object"),
        };
    }
    node
}

fn write_at(root: &mut Value, path: &StorePath, value: Value) {
    if value.is_null() {
        let segments: Vec<&str> = path.segments().collect();
        remove_at(root, &segments);
    } else {
        *node_mut(root, path) = strip_nulls(value);
    }
    prune(root);
}

fn remove_at(node: &mut Value, segments: &[&str]) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    let Value::Object(map) = node else {
        return;
    };

    if rest.is_empty() {
        map.remove(*first);
    } else if let Some(child) = map.get_mut(*first) {
        remove_at(child, rest);
    }
}

/// Drop nulls and empty objects everywhere below `node`
fn prune(node: &mut Value) {
    if let Value::Object(map) = node {
        for child in map.values_mut() {
            prune(child);
        }
        map.retain(|_, child| !is_empty_node(child));
        if map.is_empty() {
            *node = Value::Null;
        }
    }
}

fn strip_nulls(mut value: Value) -> Value {
    prune(&mut value);
    value
}

fn is_empty_node(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
