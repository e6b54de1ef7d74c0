use axum::extract::State;
use axum::response::Html;
use axum::Form;
use serde::{Deserialize, Serialize};
use tera::Context;
use tracing::debug;

use crate::models::coordinate::example_route::{POINT_A, POINT_B};
use crate::models::error::AppError;
use crate::models::fare::{discount_requested, FareRequest};

use super::router::AppState;

pub const INDEX: &str = "index.html";

#[derive(Debug, Default, Deserialize)]
pub struct PageForm {
    pub discount: Option<String>,
}

#[derive(Debug, Serialize)]
struct PageView {
    place: String,
    coords: [f64; 2],
    distance: Option<f64>,
    point_a: Option<[f64; 2]>,
    point_b: Option<[f64; 2]>,
    fare: Option<String>,
}

impl PageView {
    async fn new(state: &AppState) -> Self {
        let coords = state.locator.coordinate().await;
        Self {
            place: state.locator.place().to_string(),
            coords: coords.as_pair(),
            distance: None,
            point_a: None,
            point_b: None,
            fare: None,
        }
    }

    fn with_example_route(mut self) -> Self {
        self.distance = Some(POINT_A.distance_to(&POINT_B).kilometers);
        self.point_a = Some(POINT_A.as_pair());
        self.point_b = Some(POINT_B.as_pair());
        self
    }

    fn render(&self, state: &AppState) -> Result<Html<String>, AppError> {
        let context = Context::from_serialize(self)?;
        Ok(Html(state.templates.render(INDEX, &context)?))
    }
}

pub async fn render_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    PageView::new(&state).await.with_example_route().render(&state)
}

pub async fn submit_page(
    State(state): State<AppState>,
    form: Option<Form<PageForm>>,
) -> Result<Html<String>, AppError> {
    // a POST without a form body means no discount
    let form = form.map(|Form(form)| form).unwrap_or_default();
    let mut view = PageView::new(&state).await.with_example_route();

    // a zero distance shows the page without a fare
    if let Some(distance) = view.distance.filter(|d| *d != 0.0) {
        let quote = FareRequest::new(distance, discount_requested(form.discount.as_deref()))?.quote();
        debug!(distance, fare = quote.fare, "Quoted example route");
        view.fare = Some(quote.to_string());
    }

    view.render(&state)
}

pub async fn map(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    PageView::new(&state).await.render(&state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};

    use crate::handlers::router::test_support::*;
    use crate::models::coordinate::example_route::{POINT_A, POINT_B};
    use crate::models::fare::{discounted_fare, regular_fare};

    #[tokio::test]
    async fn get_shows_route_without_fare() {
        let response = send(app(), get("/")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("data-lat=\"7.0644\""));
        assert!(body.contains("Distance:"));
        assert!(!body.contains("id=\"fare\""));
    }

    #[tokio::test]
    async fn post_without_discount_quotes_regular_fare() {
        let km = POINT_A.distance_to(&POINT_B).kilometers;
        let response = send(app(), form_post("/", "")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains(&format!("Your fare is: ₱{}", regular_fare(km))));
    }

    #[tokio::test]
    async fn post_without_form_body_quotes_regular_fare() {
        let km = POINT_A.distance_to(&POINT_B).kilometers;
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = send(app(), request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains(&format!("Your fare is: ₱{}", regular_fare(km))));
    }

    #[tokio::test]
    async fn post_with_discount_quotes_discounted_fare() {
        let km = POINT_A.distance_to(&POINT_B).kilometers;
        let response = send(app(), form_post("/", "discount=on")).await;

        let body = body_string(response).await;
        assert!(body.contains(&format!("Your fare is: ₱{}", discounted_fare(km))));
    }

    #[tokio::test]
    async fn map_shows_coordinates_only() {
        let response = send(app(), get("/map")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("Davao City (7.0644, 125.6078)"));
        assert!(!body.contains("Distance:"));
    }

    #[tokio::test]
    async fn geocoder_outage_uses_fallback() {
        let response = send(app_with(Arc::new(OfflineGeocoder)), get("/map")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("data-lat=\"0.5\""));
    }
}
