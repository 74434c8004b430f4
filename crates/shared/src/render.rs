use std::time::Duration;

use crate::config::{CircleMarkerOptions, ControlOptions, MapConfig, MapOptions, TileLayerOptions};
use crate::error::MapError;
use crate::legend::{legend_html, legend_rows, LEGEND_PANEL_CSS};
use crate::models::{ConferenceRecord, LatLng};
use crate::period::color_for_year;
use crate::popup::popup_html;
use crate::style::{style_element_id, style_patch, NO_ZOOM_ATTR, READY_ATTR};

/// The page and mapping library the conference map is drawn into.
///
/// The browser implementation talks to the DOM and Leaflet; tests use a
/// recording fake.
pub trait MapHost {
    /// Handle to a created map instance.
    type Map;

    fn has_container(&self, container_id: &str) -> bool;

    fn has_mapping_library(&self) -> bool;

    fn container_attribute(&self, container_id: &str, name: &str) -> Option<String>;

    fn set_container_attribute(
        &mut self,
        container_id: &str,
        name: &str,
        value: &str,
    ) -> Result<(), MapError>;

    /// Attach a `<style>` element with the given id inside the container.
    fn inject_style(
        &mut self,
        container_id: &str,
        element_id: &str,
        css: &str,
    ) -> Result<(), MapError>;

    fn create_map(
        &mut self,
        container_id: &str,
        options: &MapOptions,
        center: LatLng,
        zoom: u8,
    ) -> Result<Self::Map, MapError>;

    fn add_tile_layer(
        &mut self,
        map: &Self::Map,
        url: &str,
        options: &TileLayerOptions,
    ) -> Result<(), MapError>;

    /// Recompute the map size whenever the container is resized. Hosts that
    /// cannot observe resizes recompute once after `fallback`.
    fn watch_container_size(
        &mut self,
        map: &Self::Map,
        container_id: &str,
        fallback: Duration,
    ) -> Result<(), MapError>;

    fn add_circle_marker(
        &mut self,
        map: &Self::Map,
        at: LatLng,
        options: &CircleMarkerOptions,
        popup_html: &str,
    ) -> Result<(), MapError>;

    fn add_legend(
        &mut self,
        map: &Self::Map,
        options: &ControlOptions,
        panel_css: &str,
        html: &str,
    ) -> Result<(), MapError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingContainer,
    MissingMappingLibrary,
    AlreadyRendered,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingContainer => write!(f, "map container not found"),
            SkipReason::MissingMappingLibrary => write!(f, "mapping library not loaded"),
            SkipReason::AlreadyRendered => write!(f, "map already rendered"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderReport {
    pub markers: usize,
    pub legend_rows: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Rendered(RenderReport),
    Skipped(SkipReason),
}

/// Returns why rendering must not start, or `None` when everything is in place.
pub fn check_prerequisites<H: MapHost>(host: &H, config: &MapConfig) -> Option<SkipReason> {
    if !host.has_container(&config.container_id) {
        return Some(SkipReason::MissingContainer);
    }
    if !host.has_mapping_library() {
        return Some(SkipReason::MissingMappingLibrary);
    }
    let (name, value) = READY_ATTR;
    if host.container_attribute(&config.container_id, name).as_deref() == Some(value) {
        return Some(SkipReason::AlreadyRendered);
    }
    None
}

/// Draw the conference map: style patch, map with tiles, one marker per
/// record in order, then the legend.
///
/// Missing prerequisites are not errors; nothing is touched and
/// [`Outcome::Skipped`] is returned.
pub fn render_conference_map<H: MapHost>(
    host: &mut H,
    config: &MapConfig,
    records: &[ConferenceRecord],
) -> Result<Outcome, MapError> {
    if let Some(reason) = check_prerequisites(host, config) {
        tracing::debug!(%reason, container = %config.container_id, "skipping conference map");
        return Ok(Outcome::Skipped(reason));
    }

    let id = config.container_id.as_str();

    // Claimed before anything else so a failed run is never retried on the same element.
    host.set_container_attribute(id, READY_ATTR.0, READY_ATTR.1)?;

    host.inject_style(id, &style_element_id(id), &style_patch(id))?;
    host.set_container_attribute(id, NO_ZOOM_ATTR.0, NO_ZOOM_ATTR.1)?;

    let map = host.create_map(id, &config.map, config.center, config.zoom)?;
    host.add_tile_layer(&map, &config.tile_url, &config.tiles)?;
    host.watch_container_size(&map, id, config.resize_fallback_delay)?;
    tracing::debug!(container = id, zoom = config.zoom, "map created");

    for rec in records {
        let options = config.marker.with_fill(color_for_year(rec.year));
        host.add_circle_marker(&map, rec.position(), &options, &popup_html(rec))?;
    }

    host.add_legend(&map, &config.legend, LEGEND_PANEL_CSS, &legend_html())?;

    let report = RenderReport {
        markers: records.len(),
        legend_rows: legend_rows().len(),
    };
    tracing::info!(
        markers = report.markers,
        legend_rows = report.legend_rows,
        "conference map rendered"
    );
    Ok(Outcome::Rendered(report))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::catalog::CONFERENCES;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        SetAttribute(String, String),
        InjectStyle { element_id: String, css: String },
        CreateMap { center: LatLng, zoom: u8, scroll_wheel_zoom: bool },
        TileLayer { url: String, max_zoom: u8 },
        WatchSize(Duration),
        Marker { at: LatLng, fill: String, popup: String },
        Legend { html: String },
    }

    struct FakeHost {
        container: bool,
        library: bool,
        attributes: HashMap<String, String>,
        calls: Vec<Call>,
        fail_on_marker: Option<usize>,
    }

    impl FakeHost {
        fn new(container: bool, library: bool) -> Self {
            Self {
                container,
                library,
                attributes: HashMap::new(),
                calls: Vec::new(),
                fail_on_marker: None,
            }
        }

        fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.iter().filter(|c| pred(c)).count()
        }

        fn markers(&self) -> Vec<&Call> {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::Marker { .. }))
                .collect()
        }
    }

    impl MapHost for FakeHost {
        type Map = ();

        fn has_container(&self, _: &str) -> bool {
            self.container
        }

        fn has_mapping_library(&self) -> bool {
            self.library
        }

        fn container_attribute(&self, _: &str, name: &str) -> Option<String> {
            self.attributes.get(name).cloned()
        }

        fn set_container_attribute(
            &mut self,
            _: &str,
            name: &str,
            value: &str,
        ) -> Result<(), MapError> {
            self.attributes.insert(name.to_string(), value.to_string());
            self.calls
                .push(Call::SetAttribute(name.to_string(), value.to_string()));
            Ok(())
        }

        fn inject_style(&mut self, _: &str, element_id: &str, css: &str) -> Result<(), MapError> {
            self.calls.push(Call::InjectStyle {
                element_id: element_id.to_string(),
                css: css.to_string(),
            });
            Ok(())
        }

        fn create_map(
            &mut self,
            _: &str,
            options: &MapOptions,
            center: LatLng,
            zoom: u8,
        ) -> Result<(), MapError> {
            self.calls.push(Call::CreateMap {
                center,
                zoom,
                scroll_wheel_zoom: options.scroll_wheel_zoom,
            });
            Ok(())
        }

        fn add_tile_layer(
            &mut self,
            _: &(),
            url: &str,
            options: &TileLayerOptions,
        ) -> Result<(), MapError> {
            self.calls.push(Call::TileLayer {
                url: url.to_string(),
                max_zoom: options.max_zoom,
            });
            Ok(())
        }

        fn watch_container_size(
            &mut self,
            _: &(),
            _: &str,
            fallback: Duration,
        ) -> Result<(), MapError> {
            self.calls.push(Call::WatchSize(fallback));
            Ok(())
        }

        fn add_circle_marker(
            &mut self,
            _: &(),
            at: LatLng,
            options: &CircleMarkerOptions,
            popup_html: &str,
        ) -> Result<(), MapError> {
            if self.fail_on_marker == Some(self.markers().len()) {
                return Err(MapError::Host("circleMarker threw".to_string()));
            }
            self.calls.push(Call::Marker {
                at,
                fill: options.fill_color.clone(),
                popup: popup_html.to_string(),
            });
            Ok(())
        }

        fn add_legend(
            &mut self,
            _: &(),
            _: &ControlOptions,
            _: &str,
            html: &str,
        ) -> Result<(), MapError> {
            self.calls.push(Call::Legend {
                html: html.to_string(),
            });
            Ok(())
        }
    }

    fn render(host: &mut FakeHost) -> Outcome {
        render_conference_map(host, &MapConfig::default(), CONFERENCES).unwrap()
    }

    #[test]
    fn test_missing_container_is_noop() {
        let mut host = FakeHost::new(false, true);
        assert_eq!(
            render(&mut host),
            Outcome::Skipped(SkipReason::MissingContainer)
        );
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_missing_library_is_noop() {
        let mut host = FakeHost::new(true, false);
        assert_eq!(
            render(&mut host),
            Outcome::Skipped(SkipReason::MissingMappingLibrary)
        );
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_one_marker_per_record_at_declared_coordinate() {
        let mut host = FakeHost::new(true, true);
        let outcome = render(&mut host);
        assert_eq!(
            outcome,
            Outcome::Rendered(RenderReport {
                markers: CONFERENCES.len(),
                legend_rows: 5,
            })
        );

        let markers = host.markers();
        assert_eq!(markers.len(), CONFERENCES.len());
        for (call, rec) in markers.iter().zip(CONFERENCES) {
            let Call::Marker { at, fill, popup } = call else {
                unreachable!()
            };
            assert_eq!(*at, LatLng::new(rec.latitude, rec.longitude));
            assert_eq!(fill, color_for_year(rec.year));
            assert!(popup.contains(rec.title));
        }
    }

    #[test]
    fn test_setup_order() {
        let mut host = FakeHost::new(true, true);
        render(&mut host);

        let kind = |c: &Call| match c {
            Call::SetAttribute(..) => "attr",
            Call::InjectStyle { .. } => "style",
            Call::CreateMap { .. } => "map",
            Call::TileLayer { .. } => "tiles",
            Call::WatchSize(_) => "watch",
            Call::Marker { .. } => "marker",
            Call::Legend { .. } => "legend",
        };
        let mut kinds: Vec<&str> = host.calls.iter().map(kind).collect();
        kinds.dedup();
        assert_eq!(
            kinds,
            ["attr", "style", "attr", "map", "tiles", "watch", "marker", "legend"]
        );
    }

    #[test]
    fn test_map_view_and_tiles() {
        let mut host = FakeHost::new(true, true);
        render(&mut host);

        assert!(host.calls.contains(&Call::CreateMap {
            center: LatLng::new(20.0, 0.0),
            zoom: 2,
            scroll_wheel_zoom: false,
        }));
        assert!(host.calls.contains(&Call::TileLayer {
            url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            max_zoom: 18,
        }));
        assert!(host
            .calls
            .contains(&Call::WatchSize(Duration::from_millis(500))));
    }

    #[test]
    fn test_single_style_and_no_zoom_attribute() {
        let mut host = FakeHost::new(true, true);
        render(&mut host);

        assert_eq!(
            host.count(|c| matches!(c, Call::InjectStyle { .. })),
            1
        );
        let Some(Call::InjectStyle { element_id, css }) = host
            .calls
            .iter()
            .find(|c| matches!(c, Call::InjectStyle { .. }))
        else {
            unreachable!()
        };
        assert_eq!(element_id, "conference-map-style");
        assert!(css.starts_with("#conference-map.leaflet-container"));
        assert_eq!(
            host.attributes.get("data-no-zoom").map(String::as_str),
            Some("true")
        );
    }

    #[test]
    fn test_legend_is_static() {
        let mut host = FakeHost::new(true, true);
        let only_recent: Vec<ConferenceRecord> = CONFERENCES
            .iter()
            .filter(|r| r.year >= 2025)
            .copied()
            .collect();
        render_conference_map(&mut host, &MapConfig::default(), &only_recent).unwrap();

        let legends: Vec<&Call> = host
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Legend { .. }))
            .collect();
        assert_eq!(legends.len(), 1);
        assert_eq!(legends[0], &Call::Legend { html: legend_html() });
        assert_eq!(legend_html().matches("<i style=").count(), 5);
    }

    #[test]
    fn test_2025_marker_matches_legend_swatch() {
        let mut host = FakeHost::new(true, true);
        render(&mut host);

        let swatch = legend_rows()
            .iter()
            .find(|b| b.label == "2025\u{2013}2026")
            .unwrap()
            .color;
        let idx = CONFERENCES.iter().position(|r| r.year == 2025).unwrap();
        let marker = host.markers()[idx];
        let Call::Marker { fill, .. } = marker else {
            unreachable!()
        };
        assert_eq!(fill, swatch);
    }

    #[test]
    fn test_second_run_is_noop() {
        let mut host = FakeHost::new(true, true);
        render(&mut host);
        let after_first = host.calls.len();

        assert_eq!(
            render(&mut host),
            Outcome::Skipped(SkipReason::AlreadyRendered)
        );
        assert_eq!(host.calls.len(), after_first);
        assert_eq!(
            host.count(|c| matches!(c, Call::CreateMap { .. })),
            1
        );
    }

    #[test]
    fn test_host_error_propagates_and_blocks_retry() {
        let mut host = FakeHost::new(true, true);
        host.fail_on_marker = Some(3);
        let err = render_conference_map(&mut host, &MapConfig::default(), CONFERENCES)
            .unwrap_err();
        assert!(matches!(err, MapError::Host(_)));
        assert_eq!(host.markers().len(), 3);
        assert_eq!(host.count(|c| matches!(c, Call::Legend { .. })), 0);

        host.fail_on_marker = None;
        assert_eq!(
            render(&mut host),
            Outcome::Skipped(SkipReason::AlreadyRendered)
        );
    }

    #[test]
    fn test_records_sharing_a_coordinate_are_not_merged() {
        let mut host = FakeHost::new(true, true);
        let rec = CONFERENCES[0];
        render_conference_map(&mut host, &MapConfig::default(), &[rec, rec]).unwrap();
        assert_eq!(host.markers().len(), 2);
    }
}
