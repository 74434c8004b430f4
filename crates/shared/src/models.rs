/// Geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Leaflet accepts `[lat, lng]` pairs wherever a position is expected.
    pub fn as_array(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

/// One talk or panel appearance plotted on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConferenceRecord {
    pub name: &'static str,
    pub location: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub year: i32,
    pub title: &'static str,
}

impl ConferenceRecord {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

impl std::fmt::Display for ConferenceRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.location, self.year)
    }
}
