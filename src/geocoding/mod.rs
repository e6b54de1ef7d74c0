//! Place name lookup.
//!
//! The fare math never depends on this module: geocoded coordinates are
//! only used to center the map on the page and to resolve `/map_points`.

mod display;
mod nominatim;

pub use display::{DisplayLocator, DEFAULT_DISPLAY_COORDINATE};
pub use nominatim::NominatimGeocoder;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::coordinate::Coordinate;

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("geocoding connection failed: {0}")]
    ConnectionFailed(String),
    #[error("geocoding request failed: {0}")]
    RequestFailed(String),
    #[error("geocoding parse error: {0}")]
    ParseError(String),
    #[error("place not found: {0}")]
    AddressNotFound(String),
    #[error("geocoding request timed out")]
    Timeout,
    #[error("geocoder misconfigured: {0}")]
    InvalidConfig(String),
}

impl GeocodingError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GeocodingError::AddressNotFound(_))
    }
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, place: &str) -> Result<Coordinate, GeocodingError>;
}
