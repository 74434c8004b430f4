use conference_map_shared::MapError;
use serde::Serialize;
use wasm_bindgen::JsValue;

/// Turn a thrown JS value into a host error.
pub fn js_err(err: JsValue) -> MapError {
    MapError::Host(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// Serialize a Rust value into a plain JS object by way of JSON.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, MapError> {
    let json = serde_json::to_string(value)?;
    js_sys::JSON::parse(&json).map_err(js_err)
}
