//! Point-in-time view of a subtree returned by a one-shot read

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Data read from one location in the remote store
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    key: Option<String>,
    value: Value,
}

impl Snapshot {
    pub fn new(key: Option<String>, value: Value) -> Self {
        Self { key, value }
    }

    /// Last path segment of the location that was read
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Raw JSON value; `Null` when nothing is stored
    pub fn val(&self) -> &Value {
        &self.value
    }

    /// True when the location holds any data
    pub fn exists(&self) -> bool {
        !self.value.is_null()
    }

    /// Child snapshots in the order the store yielded them
    ///
    /// Objects yield their entries; arrays (which the database returns for
    /// dense integer keys) yield their non-null elements keyed by index.
    pub fn children(&self) -> Box<dyn Iterator<Item = Snapshot> + '_> {
        match &self.value {
            Value::Object(map) => Box::new(
                map.iter()
                    .map(|(k, v)| Snapshot::new(Some(k.clone()), v.clone())),
            ),
            Value::Array(items) => Box::new(
                items
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(i, v)| Snapshot::new(Some(i.to_string()), v.clone())),
            ),
            _ => Box::new(std::iter::empty()),
        }
    }

    pub fn num_children(&self) -> usize {
        match &self.value {
            Value::Object(map) => map.len(),
            Value::Array(items) => items.iter().filter(|v| !v.is_null()).count(),
            _ => 0,
        }
    }

    /// Visit every child in order
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(Snapshot),
    {
        for child in self.children() {
            visit(child);
        }
    }

    /// Deserialize the stored value
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.value.clone())?)
    }
}
