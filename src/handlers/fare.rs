use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::error::AppError;
use crate::models::fare::FareRequest;

#[derive(Debug, Default, Deserialize)]
pub struct FareForm {
    pub distance: Option<String>,
    pub discount: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FareResponse {
    pub fare: String,
}

pub async fn calculate_fare(Form(form): Form<FareForm>) -> Result<Json<FareResponse>, AppError> {
    let request = FareRequest::parse(form.distance.as_deref(), form.discount.as_deref())?;
    let quote = request.quote();
    debug!(
        distance = request.distance(),
        discount = request.apply_discount(),
        fare = quote.fare,
        "Calculated fare"
    );

    Ok(Json(FareResponse {
        fare: format!("Your fare is: {quote}"),
    }))
}
