use std::path::Path;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tera::Tera;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::geocoding::{DisplayLocator, Geocoder};
use crate::models::coordinate::Coordinate;

use super::{distance, fare, page};

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

#[derive(Clone)]
pub struct AppState {
    pub geocoder: Arc<dyn Geocoder>,
    pub locator: Arc<DisplayLocator>,
    pub templates: Arc<Tera>,
}

impl AppState {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        display_place: &str,
        fallback: Coordinate,
    ) -> Result<Self, tera::Error> {
        let mut templates = Tera::default();
        templates.add_raw_template(page::INDEX, INDEX_TEMPLATE)?;

        Ok(Self {
            locator: Arc::new(DisplayLocator::new(geocoder.clone(), display_place, fallback)),
            geocoder,
            templates: Arc::new(templates),
        })
    }
}

pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(page::render_page).post(page::submit_page))
        .route("/map", get(page::map))
        .route("/distance", get(distance::get_distance))
        .route("/map_points", post(distance::map_points))
        .route("/calculate_fare", post(fare::calculate_fare))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        // logging so we can see whats going on
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}


#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::test_support::*;

    #[tokio::test]
    async fn serves_static_assets() {
        let response = send(app(), get("/static/style.css")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("#fare"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = send(app(), get("/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn fare_endpoint_is_post_only() {
        let response = send(app(), get("/calculate_fare")).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
