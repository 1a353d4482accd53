use wasm_bindgen::JsValue;
use web_sys::Storage;

fn js_failure(call: &str, err: JsValue) -> String {
    format!("localStorage {call} failed: {err:?}")
}

fn local_storage() -> Result<Storage, String> {
    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    window
        .local_storage()
        .map_err(|e| js_failure("access", e))?
        .ok_or_else(|| "localStorage unavailable".to_string())
}

pub fn local_storage_available() -> bool {
    local_storage().is_ok()
}

pub fn get_item(key: &str) -> Result<Option<String>, String> {
    local_storage()?
        .get_item(key)
        .map_err(|e| js_failure("get_item", e))
}

pub fn set_item(key: &str, value: &str) -> Result<(), String> {
    local_storage()?
        .set_item(key, value)
        .map_err(|e| js_failure("set_item", e))
}

pub fn remove_item(key: &str) -> Result<(), String> {
    local_storage()?
        .remove_item(key)
        .map_err(|e| js_failure("remove_item", e))
}
