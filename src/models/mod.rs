pub mod coordinate;
pub mod error;
pub mod fare;
