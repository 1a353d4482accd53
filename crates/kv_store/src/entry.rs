//! Raw value shapes exchanged with a key/value store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw field mapping persisted under one key. Carries no knowledge of domain field types.
pub type StoredValue = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One stored value together with the key it is addressed by.
pub struct StoredEntry {
    /// Store key.
    pub key: String,
    /// Raw persisted fields.
    pub value: StoredValue,
}

#[derive(Debug, Clone, PartialEq)]
/// One write submitted through [`crate::KeyValueStore::batch`].
///
/// Entries without a key are assigned one by the store.
pub struct BatchEntry {
    /// Key to write under, if the caller already has one.
    pub key: Option<String>,
    /// Raw fields to persist.
    pub value: StoredValue,
}

impl BatchEntry {
    /// Creates a batch entry for an already identified value.
    pub fn keyed(key: impl Into<String>, value: StoredValue) -> Self {
        Self {
            key: Some(key.into()),
            value,
        }
    }

    /// Creates a batch entry that asks the store to assign a key.
    pub fn unkeyed(value: StoredValue) -> Self {
        Self { key: None, value }
    }

    /// Returns the entry key, generating a fresh one when absent.
    pub fn resolve_key(&self) -> String {
        self.key.clone().unwrap_or_else(generate_key)
    }
}

/// Returns a fresh store key for values submitted without one.
pub fn generate_key() -> String {
    uuid::Uuid::new_v4().to_string()
}
