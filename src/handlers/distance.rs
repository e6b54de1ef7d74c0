use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geocoding::GeocodingError;
use crate::models::coordinate::example_route::{POINT_A, POINT_B};
use crate::models::coordinate::Coordinate;
use crate::models::error::AppError;

use super::router::AppState;

/// Either all four values or none; none measures the example route.
#[derive(Debug, Default, Deserialize)]
pub struct DistanceQuery {
    pub from_lat: Option<f64>,
    pub from_lon: Option<f64>,
    pub to_lat: Option<f64>,
    pub to_lon: Option<f64>,
}

impl DistanceQuery {
    fn endpoints(&self) -> Result<(Coordinate, Coordinate), AppError> {
        match (self.from_lat, self.from_lon, self.to_lat, self.to_lon) {
            (None, None, None, None) => Ok((POINT_A, POINT_B)),
            (Some(from_lat), Some(from_lon), Some(to_lat), Some(to_lon)) => Ok((
                Coordinate::new(from_lat, from_lon)?,
                Coordinate::new(to_lat, to_lon)?,
            )),
            _ => Err(AppError::BadQuery(
                "from_lat, from_lon, to_lat and to_lon must be given together".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResponse {
    /// Miles.
    pub distance: f64,
}

pub async fn get_distance(
    Query(query): Query<DistanceQuery>,
) -> Result<Json<DistanceResponse>, AppError> {
    let (from, to) = query.endpoints()?;
    let distance = from.distance_to(&to);
    debug!(miles = distance.miles, "Measured distance");
    Ok(Json(DistanceResponse { distance: distance.miles }))
}

#[derive(Debug, Deserialize)]
pub struct MapPointsRequest {
    pub location1: String,
    pub location2: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MapPointsResponse {
    pub coords: [[f64; 2]; 2],
    pub distance_km: f64,
}

pub async fn map_points(
    State(state): State<AppState>,
    Json(request): Json<MapPointsRequest>,
) -> Result<Json<MapPointsResponse>, AppError> {
    let (first, second) = tokio::join!(
        state.geocoder.geocode(&request.location1),
        state.geocoder.geocode(&request.location2),
    );
    let first = first.map_err(locate_error)?;
    let second = second.map_err(locate_error)?;

    Ok(Json(MapPointsResponse {
        coords: [first.as_pair(), second.as_pair()],
        distance_km: first.distance_to(&second).kilometers,
    }))
}

fn locate_error(e: GeocodingError) -> AppError {
    if e.is_not_found() {
        AppError::LocationsNotFound
    } else {
        AppError::Geocoding(e)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;

    use crate::handlers::router::test_support::*;
    use crate::models::coordinate::example_route::{POINT_A, POINT_B};

    #[tokio::test]
    async fn example_route_in_miles() {
        let expected = POINT_A.distance_to(&POINT_B).miles;

        let first = body_json(send(app(), get("/distance")).await).await;
        let second = body_json(send(app(), get("/distance")).await).await;

        assert_eq!(first["distance"].as_f64(), Some(expected));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn custom_endpoints() {
        let response = send(
            app(),
            get("/distance?from_lat=10&from_lon=20&to_lat=10&to_lon=20"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let miles = body_json(response).await["distance"].as_f64().unwrap();
        assert!(miles.abs() < 1e-9);
    }

    #[tokio::test]
    async fn partial_endpoints_are_rejected() {
        let response = send(app(), get("/distance?from_lat=10")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["status"], "fail");
    }

    #[tokio::test]
    async fn out_of_range_endpoints_are_rejected() {
        let response = send(
            app(),
            get("/distance?from_lat=95&from_lon=20&to_lat=10&to_lon=20"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn map_points_resolves_both() {
        let request = json_post(
            "/map_points",
            json!({ "location1": "Davao City", "location2": "Cebu City" }),
        );
        let response = send(app(), request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["coords"], json!([[7.0644, 125.6078], [10.3157, 123.8854]]));
        assert!(body["distance_km"].as_f64().unwrap() > 300.0);
    }

    #[tokio::test]
    async fn map_points_unknown_place() {
        let request = json_post(
            "/map_points",
            json!({ "location1": "Davao City", "location2": "Atlantis" }),
        );
        let response = send(app(), request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            "Unable to find one or both locations."
        );
    }

    #[tokio::test]
    async fn map_points_provider_down() {
        let request = json_post(
            "/map_points",
            json!({ "location1": "Davao City", "location2": "Cebu City" }),
        );
        let response = send(app_with(Arc::new(OfflineGeocoder)), request).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
