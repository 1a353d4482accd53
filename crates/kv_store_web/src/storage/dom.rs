//! Indexed record layout over DOM item storage.
//!
//! Namespace `users` keeps its key index as a JSON array under `users.index` and each record
//! as a JSON object under `users.item.<key>`. In the namespace, `%` and `.` are escaped as
//! `%25` and `%2E`, so the first `.` of every item key ends the namespace.

use kv_store::{
    BatchEntry, KeyValueStore, StoreError, StoreFuture, StoredEntry, StoredValue,
};

const INDEX_SUFFIX: &str = "index";
const ITEM_INFIX: &str = "item";

fn escape_namespace(namespace: &str) -> String {
    let mut escaped = String::with_capacity(namespace.len());
    for ch in namespace.chars() {
        match ch {
            '%' => escaped.push_str("%25"),
            '.' => escaped.push_str("%2E"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[derive(Debug, Clone)]
/// Namespace-scoped [`KeyValueStore`] over an [`ItemStorage`](crate::ItemStorage).
///
/// [`KeyValueStore::all`] yields entries in index (first insertion) order.
pub struct DomKeyValueStore<S> {
    namespace: String,
    prefix: String,
    storage: S,
}

impl<S: crate::ItemStorage> DomKeyValueStore<S> {
    /// Creates a store for `namespace` on top of `storage`.
    pub fn new(namespace: impl Into<String>, storage: S) -> Self {
        let namespace = namespace.into();
        Self {
            prefix: escape_namespace(&namespace),
            namespace,
            storage,
        }
    }

    /// Returns the namespace this store is scoped to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn index_key(&self) -> String {
        format!("{}.{INDEX_SUFFIX}", self.prefix)
    }

    fn item_key(&self, key: &str) -> String {
        format!("{}.{ITEM_INFIX}.{key}", self.prefix)
    }

    fn read_index(&self) -> Result<Vec<String>, StoreError> {
        match self.storage.get_item(&self.index_key())? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn write_index(&self, keys: &[String]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(keys)?;
        self.storage.set_item(&self.index_key(), &raw)
    }

    fn read_value(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        match self.storage.get_item(&self.item_key(key))? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Every key reaches the index before its item is written.
    fn write_batch(&self, entries: Vec<BatchEntry>) -> Result<Vec<String>, StoreError> {
        let mut items = Vec::with_capacity(entries.len());
        for entry in &entries {
            items.push((entry.resolve_key(), serde_json::to_string(&entry.value)?));
        }

        let mut index = self.read_index()?;
        let before = index.len();
        for (key, _) in &items {
            if !index.contains(key) {
                index.push(key.clone());
            }
        }
        if index.len() != before {
            self.write_index(&index)?;
        }

        let mut keys = Vec::with_capacity(items.len());
        for (key, raw) in items {
            self.storage.set_item(&self.item_key(&key), &raw)?;
            keys.push(key);
        }
        Ok(keys)
    }

    fn read_all(&self) -> Result<Vec<StoredEntry>, StoreError> {
        let mut entries = Vec::new();
        for key in self.read_index()? {
            // Index entries whose item was removed out-of-band are skipped.
            if let Some(value) = self.read_value(&key)? {
                entries.push(StoredEntry { key, value });
            }
        }
        Ok(entries)
    }

    fn remove_key(&self, key: &str) -> Result<(), StoreError> {
        self.storage.remove_item(&self.item_key(key))?;
        let mut index = self.read_index()?;
        let before = index.len();
        index.retain(|existing| existing != key);
        if index.len() != before {
            self.write_index(&index)?;
        }
        Ok(())
    }

    fn remove_everything(&self) -> Result<(), StoreError> {
        for key in self.read_index()? {
            self.storage.remove_item(&self.item_key(&key))?;
        }
        self.storage.remove_item(&self.index_key())
    }
}

impl<S: crate::ItemStorage> KeyValueStore for DomKeyValueStore<S> {
    fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Result<Option<StoredValue>, StoreError>> {
        Box::pin(async move { self.read_value(key) })
    }

    fn all<'a>(&'a self) -> StoreFuture<'a, Result<Vec<StoredEntry>, StoreError>> {
        Box::pin(async move { self.read_all() })
    }

    fn batch<'a>(
        &'a self,
        entries: Vec<BatchEntry>,
    ) -> StoreFuture<'a, Result<Vec<String>, StoreError>> {
        Box::pin(async move { self.write_batch(entries) })
    }

    fn remove<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Result<(), StoreError>> {
        Box::pin(async move { self.remove_key(key) })
    }

    fn clear_all<'a>(&'a self) -> StoreFuture<'a, Result<(), StoreError>> {
        Box::pin(async move { self.remove_everything() })
    }
}
