fn unsupported() -> String {
    "Browser storage APIs are only available when compiled for wasm32".to_string()
}

pub fn local_storage_available() -> bool {
    false
}

pub fn get_item(_key: &str) -> Result<Option<String>, String> {
    Err(unsupported())
}

pub fn set_item(_key: &str, _value: &str) -> Result<(), String> {
    Err(unsupported())
}

pub fn remove_item(_key: &str) -> Result<(), String> {
    Err(unsupported())
}
