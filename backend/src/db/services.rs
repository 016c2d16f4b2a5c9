//! Service layer for the climate queries.
//!
//! Each function runs one logical query against any repository
//! implementation and applies the reshaping the HTTP routes rely on:
//! dropping null precipitation, computing the trailing-year window and
//! rounding the temperature average.

use chrono::{Days, NaiveDate};

use crate::api::{DateRange, Station, TemperatureStats, TobsWindow};
use crate::db::repository::{
    ErrorContext, MeasurementRepository, RepositoryError, RepositoryResult, StationRepository,
};

/// Date format of the `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the tobs window, counted back from the latest date.
pub const TOBS_WINDOW_DAYS: u64 = 365;

/// All `(date, precipitation)` pairs with a recorded value.
pub async fn precipitation<R>(repo: &R) -> RepositoryResult<Vec<(String, f64)>>
where
    R: MeasurementRepository + ?Sized,
{
    let rows: Vec<(String, f64)> = repo
        .fetch_precipitation()
        .await?
        .into_iter()
        .filter_map(|(date, prcp)| prcp.map(|p| (date, p)))
        .collect();

    log::info!("Total result {} rows", rows.len());
    Ok(rows)
}

/// Every station record.
pub async fn list_stations<R>(repo: &R) -> RepositoryResult<Vec<Station>>
where
    R: StationRepository + ?Sized,
{
    repo.fetch_stations().await
}

/// First date of the trailing window ending at `latest`, inclusive.
///
/// # Errors
/// Returns a validation error when `latest` is not a `YYYY-MM-DD` date.
pub fn trailing_year_start(latest: &str) -> RepositoryResult<String> {
    let context = || ErrorContext::new("trailing_year_start").with_entity("measurement");

    let date = NaiveDate::parse_from_str(latest, DATE_FORMAT).map_err(|e| {
        RepositoryError::validation_with_context(
            format!("latest date {:?} is not a calendar date: {}", latest, e),
            context(),
        )
    })?;

    date.checked_sub_days(Days::new(TOBS_WINDOW_DAYS))
        .map(|start| start.format(DATE_FORMAT).to_string())
        .ok_or_else(|| {
            RepositoryError::validation_with_context(
                format!("cannot step {} days back from {}", TOBS_WINDOW_DAYS, latest),
                context(),
            )
        })
}

/// Temperature observations of the most active station over the year
/// ending at the dataset's latest date.
///
/// # Errors
/// An empty measurement table is a configuration error: the dataset is
/// expected to be populated before the service starts.
pub async fn tobs_last_year<R>(repo: &R) -> RepositoryResult<TobsWindow>
where
    R: MeasurementRepository + ?Sized,
{
    let end = repo.latest_measurement_date().await?.ok_or_else(|| {
        RepositoryError::configuration_with_context(
            "measurement table is empty",
            ErrorContext::new("tobs_last_year").with_entity("measurement"),
        )
    })?;
    let start = trailing_year_start(&end)?;

    let active = repo.most_active_station().await?.ok_or_else(|| {
        RepositoryError::configuration_with_context(
            "no station has measurements",
            ErrorContext::new("tobs_last_year").with_entity("measurement"),
        )
    })?;
    log::debug!(
        "Most active station {} with {} rows",
        active.station,
        active.observations
    );

    let observations = repo
        .fetch_temperature_observations(&active.station, &start)
        .await?;

    log::info!("Total result {} rows", observations.len());
    Ok(TobsWindow {
        station: active.station,
        start,
        end,
        observations,
    })
}

/// Min/max/avg temperature over `range`, average rounded to a whole degree.
///
/// Null aggregates (no row in range) pass through unchanged.
pub async fn temperature_summary<R>(repo: &R, range: &DateRange) -> RepositoryResult<TemperatureStats>
where
    R: MeasurementRepository + ?Sized,
{
    let stats = repo.temperature_stats(range).await?;
    Ok(TemperatureStats {
        tavg: stats.tavg.map(round_half_even),
        ..stats
    })
}

/// Round to the nearest integer, ties to even.
pub fn round_half_even(value: f64) -> f64 {
    value.round_ties_even()
}

/// Check that the repository answers queries.
pub async fn health_check<R>(repo: &R) -> RepositoryResult<bool>
where
    R: MeasurementRepository + ?Sized,
{
    repo.health_check().await
}
