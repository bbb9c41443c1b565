//! Runtime override variables.
//!
//! The store lives for the whole process and is shared by every request:
//! - `set` inserts or overwrites a key (an overwritten key keeps its position)
//! - `snapshot` returns the current entries in insertion order
//!
//! Every render reads a fresh snapshot, so an update is visible to the
//! next request without any invalidation step.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

/// A single key/value override
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
}

impl Variable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Ordered, last-write-wins variable storage
#[derive(Debug, Default)]
pub struct VariableStore {
    entries: RwLock<Vec<Variable>>,
}

impl VariableStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable, or overwrite the value of an existing key in place.
    ///
    /// No validation is applied: the empty string is a valid key.
    pub async fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        let mut entries = self.entries.write().await;

        match entries.iter_mut().find(|v| v.key == key) {
            Some(existing) => existing.value = value,
            None => entries.push(Variable { key, value }),
        }
    }

    /// Current entries in insertion order
    pub async fn snapshot(&self) -> Vec<Variable> {
        self.entries.read().await.clone()
    }

    /// Look up a single value
    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .await
            .iter()
            .find(|v| v.key == key)
            .map(|v| v.value.clone())
    }

    /// Number of stored variables
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Create an Arc-wrapped variable store
pub fn create_variable_store() -> Arc<VariableStore> {
    Arc::new(VariableStore::new())
}
