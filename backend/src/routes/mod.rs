//! Route paths and the JSON shapes each route returns.
//!
//! Handlers in [`crate::http`] fetch data through the service layer and hand
//! it to the conversions defined here.

pub mod landing;
pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;

/// Prefix shared by every data route.
pub const API_PREFIX: &str = "/api/v1.0";
