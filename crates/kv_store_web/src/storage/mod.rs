//! Storage implementations built on the DOM Storage item API.

pub mod dom;
pub mod item_storage;
pub mod local_storage;
