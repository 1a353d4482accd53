//! Key/value store contracts and in-process adapters used by the local record proxy.
//!
//! A store is scoped to one namespace and offers asynchronous get-by-key, get-all, batch write,
//! remove, and clear operations. Concrete browser storage lives in `kv_store_web`; this crate
//! carries the contracts plus memory and no-op implementations for tests and unsupported targets.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod entry;
mod error;
mod memory;
mod noop;
mod store;

pub use entry::{generate_key, BatchEntry, StoredEntry, StoredValue};
pub use error::StoreError;
pub use memory::{MemoryKeyValueStore, MemoryStorageBackend};
pub use noop::{NoopKeyValueStore, NoopStorageBackend};
pub use store::{KeyValueStore, StorageBackend, StoreFuture};
