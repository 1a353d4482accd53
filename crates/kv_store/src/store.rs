//! Store and backend contracts.

use std::{future::Future, pin::Pin};

use crate::{BatchEntry, StoreError, StoredEntry, StoredValue};

/// Object-safe boxed future used by [`KeyValueStore`] async methods.
///
/// Completions are delivered on the caller's thread, so no `Send` bound is required.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Namespace-scoped asynchronous key/value store.
///
/// Every call resolves exactly once. Individual key operations are assumed to be serialized by
/// the implementation.
pub trait KeyValueStore {
    /// Loads the value stored under `key`.
    fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Result<Option<StoredValue>, StoreError>>;

    /// Loads every entry in the namespace, in the store's own iteration order.
    fn all<'a>(&'a self) -> StoreFuture<'a, Result<Vec<StoredEntry>, StoreError>>;

    /// Writes all `entries` and resolves to their keys in submission order.
    ///
    /// Keyless entries receive a store-assigned key.
    fn batch<'a>(
        &'a self,
        entries: Vec<BatchEntry>,
    ) -> StoreFuture<'a, Result<Vec<String>, StoreError>>;

    /// Removes the entry stored under `key`. Removing a missing key succeeds.
    fn remove<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Result<(), StoreError>>;

    /// Removes every entry in the namespace.
    fn clear_all<'a>(&'a self) -> StoreFuture<'a, Result<(), StoreError>>;
}

/// Host capability that opens namespace-scoped stores.
pub trait StorageBackend {
    /// Store type handed out for one namespace.
    type Store: KeyValueStore;

    /// Returns whether this backend can persist anything in the current environment.
    fn is_supported(&self) -> bool;

    /// Opens the store for `namespace`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be reached.
    fn open(&self, namespace: &str) -> Result<Self::Store, StoreError>;
}
