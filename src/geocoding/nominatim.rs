use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{Geocoder, GeocodingError};
use crate::models::coordinate::Coordinate;

/// Nominatim (OpenStreetMap) search client. No retries; one result per query.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    search_url: Url,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, GeocodingError> {
        let search_url = search_url(base_url)?;

        // Nominatim's usage policy requires an identifying user agent
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| GeocodingError::InvalidConfig(format!("cannot build http client: {e}")))?;

        Ok(Self { client, search_url })
    }
}

/// `{base_url}/search`, keeping any path prefix the base carries.
fn search_url(base_url: &str) -> Result<Url, GeocodingError> {
    let mut base: Url = base_url
        .parse()
        .map_err(|e| GeocodingError::InvalidConfig(format!("{base_url} is not a valid url: {e}")))?;
    // join() replaces the last segment unless the path ends in a slash
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("search")
        .map_err(|e| GeocodingError::InvalidConfig(format!("error joining url: {e}")))
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, place: &str) -> Result<Coordinate, GeocodingError> {
        let place = place.trim();
        if place.is_empty() {
            return Err(GeocodingError::AddressNotFound("place must not be empty".to_string()));
        }

        let response = self
            .client
            .get(self.search_url.clone())
            .query(&[("q", place), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {}", response.status())));
        }

        let results: Vec<SearchResult> = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let first = results
            .first()
            .ok_or_else(|| GeocodingError::AddressNotFound(place.to_string()))?;
        let coordinate = first.coordinate()?;

        debug!(%place, lat = coordinate.lat, lon = coordinate.lon, "Geocoded place");
        Ok(coordinate)
    }
}

/// Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

impl SearchResult {
    fn coordinate(&self) -> Result<Coordinate, GeocodingError> {
        let lat = self
            .lat
            .parse()
            .map_err(|_| GeocodingError::ParseError(format!("invalid latitude {:?}", self.lat)))?;
        let lon = self
            .lon
            .parse()
            .map_err(|_| GeocodingError::ParseError(format!("invalid longitude {:?}", self.lon)))?;
        Coordinate::new(lat, lon).map_err(|e| GeocodingError::ParseError(e.to_string()))
    }
}
