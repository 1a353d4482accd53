//! Synchronous string item storage in the shape of the DOM Storage API.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use kv_store::StoreError;

/// String key/value item storage, as exposed by `window.localStorage`.
pub trait ItemStorage {
    /// Reads the raw item stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying storage cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a raw item under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the write is rejected (for example, quota exceeded).
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the item stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying storage cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Item storage backed by the browser's `window.localStorage`.
pub struct BrowserItemStorage;

impl BrowserItemStorage {
    /// Returns whether `window.localStorage` is reachable.
    pub fn is_available(self) -> bool {
        crate::bridge::local_storage_available()
    }
}

impl ItemStorage for BrowserItemStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        crate::bridge::get_item(key).map_err(StoreError::Backend)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        crate::bridge::set_item(key, value).map_err(StoreError::Backend)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        crate::bridge::remove_item(key).map_err(StoreError::Backend)
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory item storage. Clones share the same items.
pub struct MemoryItemStorage {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryItemStorage {
    /// Returns every stored item key, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = self.inner.borrow().keys().cloned().collect::<Vec<_>>();
        keys.sort();
        keys
    }
}

impl ItemStorage for MemoryItemStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_item_storage_round_trip_and_delete() {
        let storage = MemoryItemStorage::default();
        storage.set_item("users.item.a", "{\"k\":1}").expect("set");
        assert_eq!(
            storage.get_item("users.item.a").expect("get"),
            Some("{\"k\":1}".to_string())
        );
        storage.remove_item("users.item.a").expect("remove");
        assert_eq!(storage.get_item("users.item.a").expect("get"), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn browser_item_storage_reports_backend_errors_off_wasm() {
        let storage = BrowserItemStorage;
        assert!(!storage.is_available());
        assert!(matches!(
            storage.get_item("users.index"),
            Err(StoreError::Backend(_))
        ));
        assert!(matches!(
            storage.set_item("users.item.a", "{}"),
            Err(StoreError::Backend(_))
        ));
    }
}
