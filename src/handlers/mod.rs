pub mod distance;
pub mod fare;
pub mod page;
pub mod router;
