use std::time::Duration;

use serde::Serialize;

use crate::models::LatLng;

pub const CONTAINER_ID: &str = "conference-map";

pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Used only when the browser cannot observe container resizes.
pub const RESIZE_FALLBACK_DELAY: Duration = Duration::from_millis(500);

/// `L.map` options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub scroll_wheel_zoom: bool,
}

/// `L.tileLayer` options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayerOptions {
    pub attribution: String,
    pub max_zoom: u8,
}

/// `L.circleMarker` path options. `fill_color` is filled in per record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleMarkerOptions {
    pub radius: f64,
    pub fill_color: String,
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl CircleMarkerOptions {
    pub fn with_fill(&self, fill_color: &str) -> Self {
        Self {
            fill_color: fill_color.to_string(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// `L.control` options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlOptions {
    pub position: ControlPosition,
}

/// Every tunable of the conference map. All values are compiled in.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub container_id: String,
    pub center: LatLng,
    pub zoom: u8,
    pub map: MapOptions,
    pub tile_url: String,
    pub tiles: TileLayerOptions,
    pub marker: CircleMarkerOptions,
    pub legend: ControlOptions,
    pub resize_fallback_delay: Duration,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container_id: CONTAINER_ID.to_string(),
            center: LatLng::new(20.0, 0.0),
            zoom: 2,
            map: MapOptions {
                scroll_wheel_zoom: false,
            },
            tile_url: TILE_URL.to_string(),
            tiles: TileLayerOptions {
                attribution: TILE_ATTRIBUTION.to_string(),
                max_zoom: 18,
            },
            marker: CircleMarkerOptions {
                radius: 8.0,
                fill_color: String::new(),
                color: "#fff".to_string(),
                weight: 2.0,
                opacity: 1.0,
                fill_opacity: 0.85,
            },
            legend: ControlOptions {
                position: ControlPosition::BottomRight,
            },
            resize_fallback_delay: RESIZE_FALLBACK_DELAY,
        }
    }
}
