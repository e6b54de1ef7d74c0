use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::geocoding::GeocodingError;
use crate::models::coordinate::CoordinateError;
use crate::models::fare::FareError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

impl ErrorResponse {
    pub fn fail(message: String) -> Self {
        Self { status: "fail", message }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Fare(#[from] FareError),
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
    #[error("{0}")]
    BadQuery(String),
    #[error("Unable to find one or both locations.")]
    LocationsNotFound,
    #[error(transparent)]
    Geocoding(#[from] GeocodingError),
    #[error("failed to render page: {0}")]
    Render(#[from] tera::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Fare(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Coordinate(_) | AppError::BadQuery(_) | AppError::LocationsNotFound => {
                StatusCode::BAD_REQUEST
            }
            AppError::Geocoding(_) => StatusCode::BAD_GATEWAY,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("Rejected request: {}", self);
        }
        (status, Json(ErrorResponse::fail(self.to_string()))).into_response()
    }
}
