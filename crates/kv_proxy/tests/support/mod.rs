#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    future::Future,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll},
};

use kv_proxy::{FieldDescriptor, LocalKeyValueProxy, ModelSchema, ProxyConfig};
use kv_store::{
    BatchEntry, KeyValueStore, MemoryKeyValueStore, MemoryStorageBackend, StorageBackend,
    StoreError, StoreFuture, StoredEntry, StoredValue,
};
use kv_store_web::{DomKeyValueStore, MemoryItemStorage};

pub fn user_schema() -> Rc<ModelSchema> {
    Rc::new(
        ModelSchema::new("User")
            .with_id_property("key")
            .field(FieldDescriptor::plain("key"))
            .field(FieldDescriptor::plain("name")),
    )
}

pub fn users_proxy<B: StorageBackend>(backend: B) -> LocalKeyValueProxy<B> {
    LocalKeyValueProxy::new(&ProxyConfig::new("users"), user_schema(), backend)
        .expect("construct users proxy")
}

/// Future that stays pending for `remaining` polls, waking itself each time.
pub struct Yield {
    remaining: usize,
}

impl Yield {
    pub fn times(remaining: usize) -> Self {
        Self { remaining }
    }
}

impl Future for Yield {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.remaining == 0 {
            return Poll::Ready(());
        }
        self.remaining -= 1;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

/// Memory store whose removals resolve later the earlier they were issued.
pub struct StaggeredStore {
    inner: MemoryKeyValueStore,
    issued: Cell<usize>,
    completed: Rc<RefCell<Vec<String>>>,
}

impl KeyValueStore for StaggeredStore {
    fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Result<Option<StoredValue>, StoreError>> {
        self.inner.get(key)
    }

    fn all<'a>(&'a self) -> StoreFuture<'a, Result<Vec<StoredEntry>, StoreError>> {
        self.inner.all()
    }

    fn batch<'a>(
        &'a self,
        entries: Vec<BatchEntry>,
    ) -> StoreFuture<'a, Result<Vec<String>, StoreError>> {
        self.inner.batch(entries)
    }

    fn remove<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Result<(), StoreError>> {
        let issued = self.issued.get();
        self.issued.set(issued + 1);
        let delay = 16usize.saturating_sub(issued * 4);
        Box::pin(async move {
            Yield::times(delay).await;
            self.inner.remove(key).await?;
            self.completed.borrow_mut().push(key.to_string());
            Ok::<(), StoreError>(())
        })
    }

    fn clear_all<'a>(&'a self) -> StoreFuture<'a, Result<(), StoreError>> {
        self.inner.clear_all()
    }
}

#[derive(Default, Clone)]
pub struct StaggeredBackend {
    pub inner: MemoryStorageBackend,
    pub completed: Rc<RefCell<Vec<String>>>,
}

impl StorageBackend for StaggeredBackend {
    type Store = StaggeredStore;

    fn is_supported(&self) -> bool {
        true
    }

    fn open(&self, namespace: &str) -> Result<Self::Store, StoreError> {
        Ok(StaggeredStore {
            inner: self.inner.open(namespace)?,
            issued: Cell::new(0),
            completed: self.completed.clone(),
        })
    }
}

/// Store whose every call fails.
pub struct FailingStore;

fn disk_full() -> StoreError {
    StoreError::Backend("disk full".to_string())
}

impl KeyValueStore for FailingStore {
    fn get<'a>(
        &'a self,
        _key: &'a str,
    ) -> StoreFuture<'a, Result<Option<StoredValue>, StoreError>> {
        Box::pin(async { Err(disk_full()) })
    }

    fn all<'a>(&'a self) -> StoreFuture<'a, Result<Vec<StoredEntry>, StoreError>> {
        Box::pin(async { Err(disk_full()) })
    }

    fn batch<'a>(
        &'a self,
        _entries: Vec<BatchEntry>,
    ) -> StoreFuture<'a, Result<Vec<String>, StoreError>> {
        Box::pin(async { Err(disk_full()) })
    }

    fn remove<'a>(&'a self, _key: &'a str) -> StoreFuture<'a, Result<(), StoreError>> {
        Box::pin(async { Err(disk_full()) })
    }

    fn clear_all<'a>(&'a self) -> StoreFuture<'a, Result<(), StoreError>> {
        Box::pin(async { Err(disk_full()) })
    }
}

#[derive(Default, Clone, Copy)]
pub struct FailingBackend;

impl StorageBackend for FailingBackend {
    type Store = FailingStore;

    fn is_supported(&self) -> bool {
        true
    }

    fn open(&self, _namespace: &str) -> Result<Self::Store, StoreError> {
        Ok(FailingStore)
    }
}

/// Backend that passes the environment probe but cannot open any namespace.
#[derive(Default, Clone, Copy)]
pub struct UnopenableBackend;

impl StorageBackend for UnopenableBackend {
    type Store = MemoryKeyValueStore;

    fn is_supported(&self) -> bool {
        true
    }

    fn open(&self, _namespace: &str) -> Result<Self::Store, StoreError> {
        Err(StoreError::Unavailable("storage quota revoked".to_string()))
    }
}

/// Memory backend that counts how often a namespace is opened.
#[derive(Default, Clone)]
pub struct CountingBackend {
    pub inner: MemoryStorageBackend,
    pub opens: Rc<Cell<usize>>,
}

impl StorageBackend for CountingBackend {
    type Store = MemoryKeyValueStore;

    fn is_supported(&self) -> bool {
        true
    }

    fn open(&self, namespace: &str) -> Result<Self::Store, StoreError> {
        self.opens.set(self.opens.get() + 1);
        self.inner.open(namespace)
    }
}

/// Backend laying namespaces out the way the browser store does, over in-memory items.
#[derive(Default, Clone)]
pub struct DomLayoutBackend {
    pub items: MemoryItemStorage,
}

impl StorageBackend for DomLayoutBackend {
    type Store = DomKeyValueStore<MemoryItemStorage>;

    fn is_supported(&self) -> bool {
        true
    }

    fn open(&self, namespace: &str) -> Result<Self::Store, StoreError> {
        Ok(DomKeyValueStore::new(namespace, self.items.clone()))
    }
}
