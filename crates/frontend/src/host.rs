use std::time::Duration;

use conference_map_shared::config::{
    CircleMarkerOptions, ControlOptions, MapOptions, TileLayerOptions,
};
use conference_map_shared::render::MapHost;
use conference_map_shared::{LatLng, MapError};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, ResizeObserver};

use crate::interop::{js_err, to_js};
use crate::leaflet;

/// Timer delay in milliseconds, saturating at what `setTimeout` accepts here.
fn delay_millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

/// [`MapHost`] backed by the live DOM and the Leaflet global.
///
/// Closures handed to the browser are leaked on purpose: the map lives as
/// long as the page.
pub struct LeafletHost {
    document: Document,
}

impl LeafletHost {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn container(&self, container_id: &str) -> Result<Element, MapError> {
        self.document
            .get_element_by_id(container_id)
            .ok_or_else(|| MapError::Host(format!("#{container_id} disappeared")))
    }
}

impl MapHost for LeafletHost {
    type Map = leaflet::Map;

    fn has_container(&self, container_id: &str) -> bool {
        self.document.get_element_by_id(container_id).is_some()
    }

    fn has_mapping_library(&self) -> bool {
        leaflet::is_loaded()
    }

    fn container_attribute(&self, container_id: &str, name: &str) -> Option<String> {
        self.document
            .get_element_by_id(container_id)?
            .get_attribute(name)
    }

    fn set_container_attribute(
        &mut self,
        container_id: &str,
        name: &str,
        value: &str,
    ) -> Result<(), MapError> {
        self.container(container_id)?
            .set_attribute(name, value)
            .map_err(js_err)
    }

    fn inject_style(
        &mut self,
        container_id: &str,
        element_id: &str,
        css: &str,
    ) -> Result<(), MapError> {
        if self.document.get_element_by_id(element_id).is_some() {
            tracing::debug!(element_id, "style patch already present");
            return Ok(());
        }
        let style = self.document.create_element("style").map_err(js_err)?;
        style.set_id(element_id);
        style.set_attribute("type", "text/css").map_err(js_err)?;
        style.set_text_content(Some(css));
        self.container(container_id)?
            .append_child(&style)
            .map_err(js_err)?;
        Ok(())
    }

    fn create_map(
        &mut self,
        container_id: &str,
        options: &MapOptions,
        center: LatLng,
        zoom: u8,
    ) -> Result<leaflet::Map, MapError> {
        let container = self.container(container_id)?;
        let map = leaflet::map(&container, &to_js(options)?).map_err(js_err)?;
        map.set_view(&to_js(&center.as_array())?, zoom)
            .map_err(js_err)
    }

    fn add_tile_layer(
        &mut self,
        map: &leaflet::Map,
        url: &str,
        options: &TileLayerOptions,
    ) -> Result<(), MapError> {
        leaflet::tile_layer(url, &to_js(options)?)
            .and_then(|layer| layer.add_to(map))
            .map_err(js_err)?;
        Ok(())
    }

    fn watch_container_size(
        &mut self,
        map: &leaflet::Map,
        container_id: &str,
        fallback: Duration,
    ) -> Result<(), MapError> {
        let container = self.container(container_id)?;

        let resized = map.clone();
        let on_resize = Closure::<dyn FnMut(js_sys::Array, ResizeObserver)>::new(
            move |_entries: js_sys::Array, _observer: ResizeObserver| {
                resized.invalidate_size();
            },
        );

        match ResizeObserver::new(on_resize.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&container);
                on_resize.forget();
                tracing::debug!(container_id, "observing container size");
            }
            Err(_) => {
                let delayed = map.clone();
                Timeout::new(delay_millis(fallback), move || {
                    delayed.invalidate_size();
                })
                .forget();
                tracing::debug!(
                    container_id,
                    delay_ms = fallback.as_millis() as u64,
                    "ResizeObserver unavailable, using fixed delay"
                );
            }
        }
        Ok(())
    }

    fn add_circle_marker(
        &mut self,
        map: &leaflet::Map,
        at: LatLng,
        options: &CircleMarkerOptions,
        popup_html: &str,
    ) -> Result<(), MapError> {
        let marker = leaflet::circle_marker(&to_js(&at.as_array())?, &to_js(options)?)
            .and_then(|marker| marker.add_to(map))
            .map_err(js_err)?;
        marker.bind_popup(popup_html);
        Ok(())
    }

    fn add_legend(
        &mut self,
        map: &leaflet::Map,
        options: &ControlOptions,
        panel_css: &str,
        html: &str,
    ) -> Result<(), MapError> {
        let panel = self.document.create_element("div").map_err(js_err)?;
        panel.set_attribute("style", panel_css).map_err(js_err)?;
        panel.set_inner_html(html);

        let control = leaflet::control(&to_js(options)?).map_err(js_err)?;
        let on_add = Closure::<dyn FnMut(JsValue) -> JsValue>::new(move |_map: JsValue| {
            JsValue::from(panel.clone())
        });
        js_sys::Reflect::set(&control, &JsValue::from_str("onAdd"), on_add.as_ref())
            .map_err(js_err)?;
        on_add.forget();

        control.add_to(map).map_err(js_err)?;
        Ok(())
    }
}
