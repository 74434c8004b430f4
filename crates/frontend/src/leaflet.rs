//! Bindings to the parts of the Leaflet global `L` the conference map uses.
//!
//! Calls that Leaflet may reject are imported with `catch` so a thrown
//! exception comes back as `Err` instead of aborting the module.

use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    pub type Map;

    #[wasm_bindgen(js_namespace = L, js_name = map, catch)]
    pub fn map(container: &Element, options: &JsValue) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = setView, catch)]
    pub fn set_view(this: &Map, center: &JsValue, zoom: u8) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = invalidateSize)]
    pub fn invalidate_size(this: &Map) -> Map;

    #[derive(Debug, Clone)]
    pub type Layer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer, catch)]
    pub fn tile_layer(url_template: &str, options: &JsValue) -> Result<Layer, JsValue>;

    #[wasm_bindgen(js_namespace = L, js_name = circleMarker, catch)]
    pub fn circle_marker(at: &JsValue, options: &JsValue) -> Result<Layer, JsValue>;

    #[wasm_bindgen(method, js_name = addTo, catch)]
    pub fn add_to(this: &Layer, map: &Map) -> Result<Layer, JsValue>;

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &Layer, html: &str) -> Layer;
}

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    pub type Control;

    #[wasm_bindgen(js_namespace = L, js_name = control, catch)]
    pub fn control(options: &JsValue) -> Result<Control, JsValue>;

    #[wasm_bindgen(method, js_name = addTo, catch)]
    pub fn add_to(this: &Control, map: &Map) -> Result<Control, JsValue>;
}

/// Whether the Leaflet script has been loaded into the page.
pub fn is_loaded() -> bool {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("L"))
        .map(|l| l.is_object())
        .unwrap_or(false)
}
