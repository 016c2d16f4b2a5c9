//! HTTP handlers for the REST API.
//!
//! Each handler runs one service call against the injected repository and
//! shapes the result with the types in [`crate::routes`].

use axum::{
    extract::{Path, State},
    http::Uri,
    response::Html,
    Json,
};

use super::dto::HealthResponse;
use super::error::AppError;
use super::state::AppState;
use crate::api::DateRange;
use crate::db::services;
use crate::routes::{landing, precipitation, stations, temperature, tobs};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Landing & Health
// =============================================================================

/// GET /
///
/// List all available api routes.
pub async fn welcome() -> Html<String> {
    Html(landing::available_routes())
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1.0".to_string(),
        database: db_status,
    }))
}

/// Fallback for unmatched paths.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

// =============================================================================
// Data routes
// =============================================================================

/// GET /api/v1.0/precipitation
pub async fn get_precipitation(
    State(state): State<AppState>,
) -> HandlerResult<Vec<precipitation::DateValue>> {
    let rows = services::precipitation(state.repository.as_ref()).await?;
    Ok(Json(precipitation::to_date_values(rows)))
}

/// GET /api/v1.0/stations
pub async fn get_stations(
    State(state): State<AppState>,
) -> HandlerResult<Vec<stations::StationDto>> {
    let rows = services::list_stations(state.repository.as_ref()).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /api/v1.0/tobs
///
/// Temperature observations of the most active station over the last year
/// of data.
pub async fn get_tobs(State(state): State<AppState>) -> HandlerResult<Vec<tobs::TobsEntry>> {
    let window = services::tobs_last_year(state.repository.as_ref()).await?;
    tracing::debug!(
        station = %window.station,
        start = %window.start,
        end = %window.end,
        "tobs window"
    );
    Ok(Json(tobs::window_entries(window)))
}

/// GET /api/v1.0/start/{start}
pub async fn get_temperature_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> HandlerResult<Vec<temperature::TemperatureStat>> {
    summarize(&state, DateRange::from(start)).await
}

/// GET /api/v1.0/start/end/{start}/{end}
pub async fn get_temperature_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> HandlerResult<Vec<temperature::TemperatureStat>> {
    summarize(&state, DateRange::between(start, end)).await
}

async fn summarize(
    state: &AppState,
    range: DateRange,
) -> HandlerResult<Vec<temperature::TemperatureStat>> {
    let stats = services::temperature_summary(state.repository.as_ref(), &range).await?;
    Ok(Json(temperature::to_stat_list(&stats)))
}
