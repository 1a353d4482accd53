//! Local key/value persistence proxy for schema-described records.
//!
//! [`LocalKeyValueProxy`] translates create/read/update/destroy [`Operation`]s into calls
//! against a namespace-scoped [`kv_store::KeyValueStore`] and rebuilds [`Record`]s from the raw
//! values the store hands back.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use futures::executor::block_on;
//! use kv_proxy::{FieldDescriptor, LocalKeyValueProxy, ModelSchema, Operation, ProxyConfig};
//! use kv_store::MemoryStorageBackend;
//! use serde_json::json;
//!
//! let schema = Rc::new(
//!     ModelSchema::new("User")
//!         .with_id_property("key")
//!         .field(FieldDescriptor::plain("key"))
//!         .field(FieldDescriptor::plain("name")),
//! );
//! let proxy = LocalKeyValueProxy::new(
//!     &ProxyConfig::new("users"),
//!     schema.clone(),
//!     MemoryStorageBackend::default(),
//! )
//! .expect("proxy");
//!
//! let bob = schema.record_with([("name", json!("Bob"))]);
//! block_on(proxy.create(Operation::create(vec![bob]), |_| {})).expect("create");
//!
//! let read = block_on(proxy.read(Operation::read_all(), |_| {})).expect("read");
//! let result = read.result_set().expect("result set");
//! assert_eq!(result.total(), 1);
//! assert_eq!(result.records()[0].get("name"), Some(&json!("Bob")));
//! ```

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod config;
mod error;
mod join;
mod operation;
mod proxy;
mod record;
mod schema;

pub use config::{ProxyConfig, PROXY_TYPE};
pub use error::{OperationError, ProxyError};
pub use join::CompletionJoin;
pub use operation::{
    Filter, Operation, OperationAction, OperationStatus, ResultSet, SortDirection, Sorter,
};
pub use proxy::{LocalKeyValueProxy, ProxyFuture};
pub use record::Record;
pub use schema::{FieldDecoder, FieldDescriptor, FieldKind, ModelSchema};
