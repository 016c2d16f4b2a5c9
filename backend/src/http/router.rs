//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::routes::{landing, precipitation, stations, temperature, tobs};

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Read-only public data: any origin may issue GETs.
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    Router::new()
        .route(landing::LANDING, get(handlers::welcome))
        .route("/health", get(handlers::health_check))
        .route(precipitation::PRECIPITATION, get(handlers::get_precipitation))
        .route(stations::STATIONS, get(handlers::get_stations))
        .route(tobs::TOBS, get(handlers::get_tobs))
        .route(temperature::START, get(handlers::get_temperature_from))
        .route(temperature::START_END, get(handlers::get_temperature_between))
        .fallback(handlers::not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
