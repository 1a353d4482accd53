//! In-memory store shared across namespaces.

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    rc::Rc,
};

use crate::{
    BatchEntry, KeyValueStore, StorageBackend, StoreError, StoreFuture, StoredEntry, StoredValue,
};

type Namespaces = HashMap<String, BTreeMap<String, StoredValue>>;

#[derive(Debug, Clone, Default)]
/// In-memory backend whose stores all share one map, partitioned by namespace.
///
/// Cloning the backend shares the underlying data.
pub struct MemoryStorageBackend {
    inner: Rc<RefCell<Namespaces>>,
}

impl MemoryStorageBackend {
    /// Returns the namespaces that currently hold at least one entry, sorted.
    pub fn namespaces(&self) -> Vec<String> {
        let mut names = self
            .inner
            .borrow()
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(name, _)| name.clone())
            .collect::<Vec<_>>();
        names.sort();
        names
    }
}

impl StorageBackend for MemoryStorageBackend {
    type Store = MemoryKeyValueStore;

    fn is_supported(&self) -> bool {
        true
    }

    fn open(&self, namespace: &str) -> Result<Self::Store, StoreError> {
        Ok(MemoryKeyValueStore {
            namespace: namespace.to_string(),
            inner: self.inner.clone(),
        })
    }
}

#[derive(Debug, Clone)]
/// Namespace view over a [`MemoryStorageBackend`].
///
/// [`KeyValueStore::all`] yields entries ordered by key.
pub struct MemoryKeyValueStore {
    namespace: String,
    inner: Rc<RefCell<Namespaces>>,
}

impl Default for MemoryKeyValueStore {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            inner: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

impl MemoryKeyValueStore {
    /// Returns the namespace this store is scoped to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the number of entries in this namespace.
    pub fn len(&self) -> usize {
        self.inner
            .borrow()
            .get(&self.namespace)
            .map_or(0, BTreeMap::len)
    }

    /// Returns whether this namespace holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Result<Option<StoredValue>, StoreError>> {
        Box::pin(async move {
            Ok(self
                .inner
                .borrow()
                .get(&self.namespace)
                .and_then(|entries| entries.get(key))
                .cloned())
        })
    }

    fn all<'a>(&'a self) -> StoreFuture<'a, Result<Vec<StoredEntry>, StoreError>> {
        Box::pin(async move {
            let inner = self.inner.borrow();
            let Some(entries) = inner.get(&self.namespace) else {
                return Ok(Vec::new());
            };
            Ok(entries
                .iter()
                .map(|(key, value)| StoredEntry {
                    key: key.clone(),
                    value: value.clone(),
                })
                .collect())
        })
    }

    fn batch<'a>(
        &'a self,
        entries: Vec<BatchEntry>,
    ) -> StoreFuture<'a, Result<Vec<String>, StoreError>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            let namespace = inner.entry(self.namespace.clone()).or_default();
            let mut keys = Vec::with_capacity(entries.len());
            for entry in entries {
                let key = entry.resolve_key();
                namespace.insert(key.clone(), entry.value);
                keys.push(key);
            }
            Ok(keys)
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            if let Some(entries) = self.inner.borrow_mut().get_mut(&self.namespace) {
                entries.remove(key);
            }
            Ok(())
        })
    }

    fn clear_all<'a>(&'a self) -> StoreFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(&self.namespace);
            Ok(())
        })
    }
}
