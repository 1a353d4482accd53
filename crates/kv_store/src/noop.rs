//! No-op store and backend for unsupported targets and baseline tests.

use crate::{
    BatchEntry, KeyValueStore, StorageBackend, StoreError, StoreFuture, StoredEntry, StoredValue,
};

#[derive(Debug, Clone, Copy, Default)]
/// Store that persists nothing: reads are empty and writes are acknowledged.
pub struct NoopKeyValueStore;

impl KeyValueStore for NoopKeyValueStore {
    fn get<'a>(
        &'a self,
        _key: &'a str,
    ) -> StoreFuture<'a, Result<Option<StoredValue>, StoreError>> {
        Box::pin(async { Ok(None) })
    }

    fn all<'a>(&'a self) -> StoreFuture<'a, Result<Vec<StoredEntry>, StoreError>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn batch<'a>(
        &'a self,
        entries: Vec<BatchEntry>,
    ) -> StoreFuture<'a, Result<Vec<String>, StoreError>> {
        Box::pin(async move { Ok(entries.iter().map(BatchEntry::resolve_key).collect()) })
    }

    fn remove<'a>(&'a self, _key: &'a str) -> StoreFuture<'a, Result<(), StoreError>> {
        Box::pin(async { Ok(()) })
    }

    fn clear_all<'a>(&'a self) -> StoreFuture<'a, Result<(), StoreError>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Backend for environments without any local persistence.
///
/// Reports itself unsupported and refuses to open stores.
pub struct NoopStorageBackend;

impl StorageBackend for NoopStorageBackend {
    type Store = NoopKeyValueStore;

    fn is_supported(&self) -> bool {
        false
    }

    fn open(&self, _namespace: &str) -> Result<Self::Store, StoreError> {
        Err(StoreError::Unavailable(
            "no local persistence backend in this environment".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store = NoopKeyValueStore;
        let store_obj: &dyn KeyValueStore = &store;
        assert_eq!(block_on(store_obj.get("k")).expect("get"), None);
        assert!(block_on(store_obj.all()).expect("all").is_empty());
        let keys = block_on(store_obj.batch(vec![BatchEntry::keyed("k", StoredValue::new())]))
            .expect("batch");
        assert_eq!(keys, vec!["k".to_string()]);
        block_on(store_obj.remove("k")).expect("remove");
        block_on(store_obj.clear_all()).expect("clear");
    }

    #[test]
    fn noop_backend_is_unsupported() {
        let backend = NoopStorageBackend;
        assert!(!backend.is_supported());
        assert!(matches!(
            backend.open("users"),
            Err(StoreError::Unavailable(_))
        ));
    }
}
