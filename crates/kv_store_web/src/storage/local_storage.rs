//! `localStorage`-backed storage backend.

use kv_store::{StorageBackend, StoreError};

use crate::{BrowserItemStorage, DomKeyValueStore};

#[derive(Debug, Clone, Copy, Default)]
/// Browser backend storing each namespace in `window.localStorage`.
pub struct WebStorageBackend;

impl StorageBackend for WebStorageBackend {
    type Store = DomKeyValueStore<BrowserItemStorage>;

    fn is_supported(&self) -> bool {
        BrowserItemStorage.is_available()
    }

    fn open(&self, namespace: &str) -> Result<Self::Store, StoreError> {
        if !self.is_supported() {
            return Err(StoreError::Unavailable(
                "localStorage is not available in this environment".to_string(),
            ));
        }
        Ok(DomKeyValueStore::new(namespace, BrowserItemStorage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_web_backend_is_unsupported() {
        let backend = WebStorageBackend;
        assert!(!backend.is_supported());
        assert!(matches!(
            backend.open("users"),
            Err(StoreError::Unavailable(_))
        ));
    }
}
