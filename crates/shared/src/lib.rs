pub mod catalog;
pub mod config;
pub mod error;
pub mod legend;
pub mod models;
pub mod period;
pub mod popup;
pub mod render;
pub mod style;

pub use error::MapError;
pub use models::{ConferenceRecord, LatLng};
