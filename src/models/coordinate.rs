use geo::{Distance as _, Geodesic, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const METERS_PER_KILOMETER: f64 = 1_000.0;
const METERS_PER_MILE: f64 = 1_609.344;

#[derive(Debug, Error, PartialEq)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

/// A point on the WGS-84 ellipsoid, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::Latitude(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::Longitude(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Only for literals known to be in range.
    pub const fn fixed(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Geodesic distance to `other`.
    pub fn distance_to(&self, other: &Coordinate) -> Distance {
        // geo points are (x = longitude, y = latitude)
        let meters = Geodesic::distance(
            Point::new(self.lon, self.lat),
            Point::new(other.lon, other.lat),
        );
        Distance::from_meters(meters)
    }

    pub fn as_pair(&self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    pub kilometers: f64,
    pub miles: f64,
}

impl Distance {
    pub fn from_meters(meters: f64) -> Self {
        Self {
            kilometers: meters / METERS_PER_KILOMETER,
            miles: meters / METERS_PER_MILE,
        }
    }
}

/// The two points the page and `/distance` measure by default.
pub mod example_route {
    use super::Coordinate;

    pub const POINT_A: Coordinate = Coordinate::fixed(51.7519, -1.2578);
    pub const POINT_B: Coordinate = Coordinate::fixed(50.8429, -0.1313);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(Coordinate::new(90.5, 0.0), Err(CoordinateError::Latitude(90.5)));
        assert_eq!(Coordinate::new(0.0, -181.0), Err(CoordinateError::Longitude(-181.0)));
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = example_route::POINT_A;
        let d = p.distance_to(&p);
        assert!(d.kilometers.abs() < 1e-9);
        assert!(d.miles.abs() < 1e-9);
    }

    #[test]
    fn example_route_distance() {
        let d = example_route::POINT_A.distance_to(&example_route::POINT_B);
        // Oxford to Brighton, roughly 128 km
        assert!(d.kilometers > 120.0 && d.kilometers < 135.0, "{}", d.kilometers);
        assert!((d.kilometers / d.miles - 1.609344).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = example_route::POINT_A;
        let b = example_route::POINT_B;
        assert!((a.distance_to(&b).kilometers - b.distance_to(&a).kilometers).abs() < 1e-6);
    }
}
