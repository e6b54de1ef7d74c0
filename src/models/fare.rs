//! Fare computation.
//!
//! A ride costs a flat base fare up to [`BASE_DISTANCE_KM`], plus a per-kilometer
//! rate beyond it. The discounted fare takes 20% off and drops the fractional part.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use thiserror::Error;

pub const BASE_FARE: f64 = 15.0;
pub const BASE_DISTANCE_KM: f64 = 4.0;
pub const RATE_PER_KM: f64 = 2.0;
pub const DISCOUNT_MULTIPLIER: f64 = 0.8;
pub const CURRENCY: char = '₱';

#[derive(Debug, Error, PartialEq)]
pub enum FareError {
    #[error("distance is required")]
    MissingDistance,
    #[error("distance {0:?} is not a number")]
    InvalidDistance(String),
    #[error("distance must not be negative, got {0}")]
    NegativeDistance(f64),
    #[error("distance {0} is too large to quote")]
    DistanceTooLarge(f64),
}

/// Largest distance whose regular fare is still finite.
pub fn max_distance() -> f64 {
    (f64::MAX - BASE_FARE) / RATE_PER_KM
}

pub fn regular_fare(distance: f64) -> f64 {
    if distance <= BASE_DISTANCE_KM {
        BASE_FARE
    } else {
        BASE_FARE + (distance - BASE_DISTANCE_KM) * RATE_PER_KM
    }
}

/// Truncates toward zero, never rounds: 21.6 becomes 21.
pub fn discounted_fare(distance: f64) -> f64 {
    (regular_fare(distance) * DISCOUNT_MULTIPLIER).trunc()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareRequest {
    distance: f64,
    apply_discount: bool,
}

impl FareRequest {
    pub fn new(distance: f64, apply_discount: bool) -> Result<Self, FareError> {
        if !distance.is_finite() {
            return Err(FareError::InvalidDistance(distance.to_string()));
        }
        if distance < 0.0 {
            return Err(FareError::NegativeDistance(distance));
        }
        if distance > max_distance() {
            return Err(FareError::DistanceTooLarge(distance));
        }
        Ok(Self { distance, apply_discount })
    }

    /// Validates raw form values. The discount applies only for the checkbox value `"on"`.
    pub fn parse(distance: Option<&str>, discount: Option<&str>) -> Result<Self, FareError> {
        let raw = distance
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or(FareError::MissingDistance)?;
        let distance = raw
            .parse::<f64>()
            .map_err(|_| FareError::InvalidDistance(raw.to_string()))?;
        Self::new(distance, discount_requested(discount))
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn apply_discount(&self) -> bool {
        self.apply_discount
    }

    pub fn quote(&self) -> FareResult {
        let fare = if self.apply_discount {
            discounted_fare(self.distance)
        } else {
            regular_fare(self.distance)
        };
        FareResult { fare, currency: CURRENCY }
    }
}

pub fn discount_requested(discount: Option<&str>) -> bool {
    discount == Some("on")
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FareResult {
    pub fare: f64,
    pub currency: char,
}

impl Display for FareResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.currency, self.fare)
    }
}
