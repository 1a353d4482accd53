//! Routes localStorage calls to the target-specific implementation.

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

pub fn local_storage_available() -> bool {
    imp::local_storage_available()
}

pub fn get_item(key: &str) -> Result<Option<String>, String> {
    imp::get_item(key)
}

pub fn set_item(key: &str, value: &str) -> Result<(), String> {
    imp::set_item(key, value)
}

pub fn remove_item(key: &str) -> Result<(), String> {
    imp::remove_item(key)
}
