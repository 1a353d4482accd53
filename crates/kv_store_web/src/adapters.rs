use kv_store::{
    BatchEntry, KeyValueStore, MemoryKeyValueStore, MemoryStorageBackend, StorageBackend,
    StoreError, StoreFuture, StoredEntry, StoredValue,
};

use crate::{BrowserItemStorage, DomKeyValueStore, WebStorageBackend};

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected storage strategy for `kv_store_web` adapters.
pub enum StorageStrategy {
    /// Browser `localStorage` persistence.
    Browser,
    /// Process-local in-memory persistence shared by every store on the current thread.
    Memory,
}

/// Returns the compile-time selected storage strategy for the active build.
pub const fn selected_storage_strategy() -> StorageStrategy {
    #[cfg(feature = "memory-backend")]
    {
        StorageStrategy::Memory
    }

    #[cfg(not(feature = "memory-backend"))]
    {
        StorageStrategy::Browser
    }
}

/// Returns the selected storage strategy as a stable string token.
pub fn storage_strategy_name() -> &'static str {
    match selected_storage_strategy() {
        StorageStrategy::Browser => "browser",
        StorageStrategy::Memory => "memory",
    }
}

thread_local! {
    static MEMORY_BACKEND: MemoryStorageBackend = MemoryStorageBackend::default();
}

/// Adapter enum that erases the concrete store behind [`KeyValueStore`].
#[derive(Debug, Clone)]
pub enum KeyValueStoreAdapter {
    /// Browser `localStorage` store.
    Browser(DomKeyValueStore<BrowserItemStorage>),
    /// In-memory store.
    Memory(MemoryKeyValueStore),
}

impl KeyValueStore for KeyValueStoreAdapter {
    fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Result<Option<StoredValue>, StoreError>> {
        match self {
            Self::Browser(store) => store.get(key),
            Self::Memory(store) => store.get(key),
        }
    }

    fn all<'a>(&'a self) -> StoreFuture<'a, Result<Vec<StoredEntry>, StoreError>> {
        match self {
            Self::Browser(store) => store.all(),
            Self::Memory(store) => store.all(),
        }
    }

    fn batch<'a>(
        &'a self,
        entries: Vec<BatchEntry>,
    ) -> StoreFuture<'a, Result<Vec<String>, StoreError>> {
        match self {
            Self::Browser(store) => store.batch(entries),
            Self::Memory(store) => store.batch(entries),
        }
    }

    fn remove<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Result<(), StoreError>> {
        match self {
            Self::Browser(store) => store.remove(key),
            Self::Memory(store) => store.remove(key),
        }
    }

    fn clear_all<'a>(&'a self) -> StoreFuture<'a, Result<(), StoreError>> {
        match self {
            Self::Browser(store) => store.clear_all(),
            Self::Memory(store) => store.clear_all(),
        }
    }
}

/// Adapter enum that erases the concrete backend behind [`StorageBackend`].
#[derive(Debug, Clone)]
pub enum StorageBackendAdapter {
    /// Browser `localStorage` backend.
    Browser(WebStorageBackend),
    /// In-memory backend.
    Memory(MemoryStorageBackend),
}

impl StorageBackend for StorageBackendAdapter {
    type Store = KeyValueStoreAdapter;

    fn is_supported(&self) -> bool {
        match self {
            Self::Browser(backend) => backend.is_supported(),
            Self::Memory(backend) => backend.is_supported(),
        }
    }

    fn open(&self, namespace: &str) -> Result<Self::Store, StoreError> {
        match self {
            Self::Browser(backend) => backend.open(namespace).map(KeyValueStoreAdapter::Browser),
            Self::Memory(backend) => backend.open(namespace).map(KeyValueStoreAdapter::Memory),
        }
    }
}

/// Builds the storage backend for the compile-time selected strategy.
///
/// The memory strategy hands out clones of one thread-local backend, so every proxy on the
/// thread shares its data.
pub fn storage_backend() -> StorageBackendAdapter {
    match selected_storage_strategy() {
        StorageStrategy::Browser => StorageBackendAdapter::Browser(WebStorageBackend),
        StorageStrategy::Memory => {
            StorageBackendAdapter::Memory(MEMORY_BACKEND.with(|backend| backend.clone()))
        }
    }
}
