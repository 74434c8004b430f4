/// Declarations that undo responsive-image and zoom-on-click rules from the
/// host page so tiles and markers keep their intrinsic geometry.
const IMAGE_RESET: &[&str] = &[
    "max-width: none !important;",
    "max-height: none !important;",
    "width: auto !important;",
    "height: auto !important;",
    "padding: 0 !important;",
    "margin: 0 !important;",
    "border-radius: 0 !important;",
    "box-shadow: none !important;",
    "border: none !important;",
    "transition: none !important;",
    "transform: none !important;",
    "opacity: 1 !important;",
    "position: absolute !important;",
];

const IMAGE_SELECTORS: &[&str] = &[
    "img.leaflet-tile",
    "img.leaflet-marker-icon",
    "img.leaflet-marker-shadow",
    "img",
];

/// Attribute telling click-to-zoom scripts to leave the container alone.
pub const NO_ZOOM_ATTR: (&str, &str) = ("data-no-zoom", "true");

/// Set on the container once the map is built; a second run sees it and stops.
pub const READY_ATTR: (&str, &str) = ("data-conference-map", "ready");

/// Id of the injected `<style>` element for a given container.
pub fn style_element_id(container_id: &str) -> String {
    format!("{container_id}-style")
}

/// Image reset rules scoped to one map container.
pub fn style_patch(container_id: &str) -> String {
    let selectors = IMAGE_SELECTORS
        .iter()
        .map(|sel| format!("#{container_id}.leaflet-container {sel}"))
        .collect::<Vec<_>>()
        .join(",\n");

    let mut css = selectors;
    css.push_str(" {\n");
    for decl in IMAGE_RESET {
        css.push_str("  ");
        css.push_str(decl);
        css.push('\n');
    }
    css.push('}');
    css
}
