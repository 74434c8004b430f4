//! Conference travel map for a host page.
//!
//! On document-ready, draws the compiled-in conference list into
//! `#conference-map` using the page's Leaflet. Does nothing when the
//! container or Leaflet is missing.

mod host;
mod interop;
mod leaflet;
mod logging;

use conference_map_shared::catalog::CONFERENCES;
use conference_map_shared::config::MapConfig;
use conference_map_shared::render::render_conference_map;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document};

use host::LeafletHost;

#[wasm_bindgen(start)]
pub fn start() {
    logging::init();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    // The module usually finishes loading after parsing is done, so
    // DOMContentLoaded may already be behind us.
    if ready_now(&document.ready_state()) {
        draw(&document);
        return;
    }

    let ready_doc = document.clone();
    let on_ready = Closure::once_into_js(move || draw(&ready_doc));
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    if let Err(err) = document.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        on_ready.unchecked_ref(),
        &options,
    ) {
        tracing::warn!(error = ?err, "could not wait for DOMContentLoaded");
    }
}

/// Whether parsing is finished for a `document.readyState` value.
fn ready_now(state: &str) -> bool {
    state != "loading"
}

fn draw(document: &Document) {
    let mut host = LeafletHost::new(document.clone());
    if let Err(err) = render_conference_map(&mut host, &MapConfig::default(), CONFERENCES) {
        tracing::warn!(error = %err, "conference map setup failed");
    }
}
