//! Browser (`wasm32`) implementations of the [`kv_store`] contracts.
//!
//! Records are laid out in `window.localStorage` as one item per record plus a per-namespace key
//! index. Browser access goes through `bridge::interop`, which selects the `wasm32` or fallback
//! implementation at compile time.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time backend selection and adapters that erase the concrete backend.
pub mod adapters;
mod bridge;
pub mod storage;

pub use adapters::{
    selected_storage_strategy, storage_backend, storage_strategy_name, KeyValueStoreAdapter,
    StorageBackendAdapter, StorageStrategy,
};
pub use storage::dom::DomKeyValueStore;
pub use storage::item_storage::{BrowserItemStorage, ItemStorage, MemoryItemStorage};
pub use storage::local_storage::WebStorageBackend;
