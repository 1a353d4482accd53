//! Browser capability bridge for `window.localStorage`.

mod interop;

pub(crate) fn local_storage_available() -> bool {
    interop::local_storage_available()
}

pub(crate) fn get_item(key: &str) -> Result<Option<String>, String> {
    interop::get_item(key)
}

pub(crate) fn set_item(key: &str, value: &str) -> Result<(), String> {
    interop::set_item(key, value)
}

pub(crate) fn remove_item(key: &str) -> Result<(), String> {
    interop::remove_item(key)
}
