use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::Geocoder;
use crate::models::coordinate::Coordinate;

/// Davao City, used until the geocoder answers.
pub const DEFAULT_DISPLAY_COORDINATE: Coordinate = Coordinate::fixed(7.0731, 125.6128);

/// Map center for the HTML pages.
///
/// The first successful lookup is kept for the life of the process. Failures
/// fall back to a fixed coordinate and are retried on the next request.
pub struct DisplayLocator {
    geocoder: Arc<dyn Geocoder>,
    place: String,
    fallback: Coordinate,
    resolved: RwLock<Option<Coordinate>>,
}

impl DisplayLocator {
    pub fn new(geocoder: Arc<dyn Geocoder>, place: impl Into<String>, fallback: Coordinate) -> Self {
        Self {
            geocoder,
            place: place.into(),
            fallback,
            resolved: RwLock::new(None),
        }
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    pub async fn coordinate(&self) -> Coordinate {
        if let Some(coordinate) = *self.resolved.read().await {
            return coordinate;
        }

        match self.geocoder.geocode(&self.place).await {
            Ok(coordinate) => {
                debug!(place = %self.place, "Caching display coordinate");
                *self.resolved.write().await = Some(coordinate);
                coordinate
            }
            Err(e) => {
                warn!(place = %self.place, "Geocoding failed, using fallback coordinate: {}", e);
                self.fallback
            }
        }
    }
}
