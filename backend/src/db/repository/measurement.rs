//! Measurement repository trait.
//!
//! Read operations over the `measurement` table: precipitation pairs, the
//! latest recorded date, station activity ranking and temperature
//! aggregates.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{DateRange, StationActivity, TemperatureStats};

/// Repository trait for measurement queries.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    /// Fetch every `(date, precipitation)` pair in storage order.
    ///
    /// Rows with no recorded precipitation are returned with `None`; callers
    /// decide whether to drop them.
    async fn fetch_precipitation(&self) -> RepositoryResult<Vec<(String, Option<f64>)>>;

    /// Most recent date present in the measurement table.
    ///
    /// # Returns
    /// * `Ok(None)` - The table is empty
    async fn latest_measurement_date(&self) -> RepositoryResult<Option<String>>;

    /// Station with the most measurement rows.
    ///
    /// When several stations share the highest count the winner is
    /// implementation-defined.
    ///
    /// # Returns
    /// * `Ok(None)` - The table is empty
    async fn most_active_station(&self) -> RepositoryResult<Option<StationActivity>>;

    /// Fetch `(date, tobs)` rows of one station with `date >= since`.
    async fn fetch_temperature_observations(
        &self,
        station: &str,
        since: &str,
    ) -> RepositoryResult<Vec<(String, f64)>>;

    /// Min, max and average observed temperature over a date range.
    ///
    /// Bounds are inclusive. An empty filtered set yields all-`None` stats
    /// rather than an error.
    async fn temperature_stats(&self, range: &DateRange) -> RepositoryResult<TemperatureStats>;

    /// Check that the backing store answers queries.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
