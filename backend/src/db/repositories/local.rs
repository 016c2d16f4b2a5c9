//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. Rows live in plain
//! vectors and every query mirrors what the SQL backend computes: dates are
//! compared as strings and aggregates skip nothing but out-of-range rows.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::{DateRange, Measurement, Station, StationActivity, TemperatureStats};
use crate::db::repository::*;

/// In-memory local repository.
///
/// # Example
/// ```
/// use climate_api::api::{Measurement, Station};
/// use climate_api::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// repo.insert_station(Station {
///     station: "USC00519281".to_string(),
///     name: "WAIHEE 837.5, HI US".to_string(),
///     latitude: 21.45167,
///     longitude: -157.84889,
///     elevation: 32.9,
/// });
/// repo.insert_measurement(Measurement::new("USC00519281", "2017-08-23", Some(0.5), 77.0));
/// assert_eq!(repo.measurement_count(), 1);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    stations: Vec<Station>,
    measurements: Vec<Measurement>,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            stations: Vec::new(),
            measurements: Vec::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository pre-populated with stations and measurements.
    pub fn with_data(stations: Vec<Station>, measurements: Vec<Measurement>) -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData {
                stations,
                measurements,
                is_healthy: true,
            })),
        }
    }

    /// Add a station record.
    pub fn insert_station(&self, station: Station) {
        self.data.write().stations.push(station);
    }

    /// Add a measurement row.
    pub fn insert_measurement(&self, measurement: Measurement) {
        self.data.write().measurements.push(measurement);
    }

    /// Number of stored measurement rows.
    pub fn measurement_count(&self) -> usize {
        self.data.read().measurements.len()
    }

    /// Simulate a lost connection so error paths can be exercised.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    fn ensure_healthy(&self, operation: &str) -> RepositoryResult<()> {
        if self.data.read().is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection_with_context(
                "local repository marked unhealthy",
                ErrorContext::new(operation),
            ))
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MeasurementRepository for LocalRepository {
    async fn fetch_precipitation(&self) -> RepositoryResult<Vec<(String, Option<f64>)>> {
        self.ensure_healthy("fetch_precipitation")?;
        let data = self.data.read();
        Ok(data
            .measurements
            .iter()
            .map(|m| (m.date.clone(), m.prcp))
            .collect())
    }

    async fn latest_measurement_date(&self) -> RepositoryResult<Option<String>> {
        self.ensure_healthy("latest_measurement_date")?;
        let data = self.data.read();
        Ok(data.measurements.iter().map(|m| m.date.clone()).max())
    }

    async fn most_active_station(&self) -> RepositoryResult<Option<StationActivity>> {
        self.ensure_healthy("most_active_station")?;
        let data = self.data.read();

        let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
        for m in &data.measurements {
            *counts.entry(m.station.as_str()).or_insert(0) += 1;
        }

        // Ascending key order plus a strict comparison keeps the lowest id on ties.
        let mut best: Option<(&str, i64)> = None;
        for (station, count) in counts {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((station, count));
            }
        }

        Ok(best.map(|(station, observations)| StationActivity {
            station: station.to_string(),
            observations,
        }))
    }

    async fn fetch_temperature_observations(
        &self,
        station: &str,
        since: &str,
    ) -> RepositoryResult<Vec<(String, f64)>> {
        self.ensure_healthy("fetch_temperature_observations")?;
        let data = self.data.read();
        Ok(data
            .measurements
            .iter()
            .filter(|m| m.station == station && m.date.as_str() >= since)
            .map(|m| (m.date.clone(), m.tobs))
            .collect())
    }

    async fn temperature_stats(&self, range: &DateRange) -> RepositoryResult<TemperatureStats> {
        self.ensure_healthy("temperature_stats")?;
        let data = self.data.read();

        let mut stats = TemperatureStats::default();
        let mut sum = 0.0;
        let mut count = 0usize;
        for m in data.measurements.iter().filter(|m| range.contains(&m.date)) {
            stats.tmin = Some(stats.tmin.map_or(m.tobs, |v| v.min(m.tobs)));
            stats.tmax = Some(stats.tmax.map_or(m.tobs, |v| v.max(m.tobs)));
            sum += m.tobs;
            count += 1;
        }
        if count > 0 {
            stats.tavg = Some(sum / count as f64);
        }

        Ok(stats)
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }
}

#[async_trait]
impl StationRepository for LocalRepository {
    async fn fetch_stations(&self) -> RepositoryResult<Vec<Station>> {
        self.ensure_healthy("fetch_stations")?;
        Ok(self.data.read().stations.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> LocalRepository {
        LocalRepository::with_data(
            vec![],
            vec![
                Measurement::new("B", "2017-08-21", Some(0.1), 70.0),
                Measurement::new("B", "2017-08-22", None, 74.0),
                Measurement::new("A", "2017-08-22", Some(0.0), 80.0),
                Measurement::new("A", "2017-08-23", Some(0.2), 78.0),
            ],
        )
    }

    #[tokio::test]
    async fn test_precipitation_keeps_nulls() {
        let rows = seeded().fetch_precipitation().await.unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1], ("2017-08-22".to_string(), None));
    }

    #[tokio::test]
    async fn test_latest_date() {
        let latest = seeded().latest_measurement_date().await.unwrap();
        assert_eq!(latest.as_deref(), Some("2017-08-23"));
        let empty = LocalRepository::new();
        assert!(empty.latest_measurement_date().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_most_active_tie_picks_lowest_id() {
        let active = seeded().most_active_station().await.unwrap().unwrap();
        assert_eq!(active.station, "A");
        assert_eq!(active.observations, 2);
    }

    #[tokio::test]
    async fn test_temperature_stats_bounded() {
        let repo = seeded();
        let stats = repo
            .temperature_stats(&DateRange::between("2017-08-22", "2017-08-22"))
            .await
            .unwrap();
        assert_eq!(stats.tmin, Some(74.0));
        assert_eq!(stats.tmax, Some(80.0));
        assert_eq!(stats.tavg, Some(77.0));
    }

    #[tokio::test]
    async fn test_temperature_stats_empty_range() {
        let stats = seeded()
            .temperature_stats(&DateRange::from("2018-01-01"))
            .await
            .unwrap();
        assert_eq!(stats, TemperatureStats::default());
    }

    #[tokio::test]
    async fn test_unhealthy_repository_errors() {
        let repo = seeded();
        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
        let err = repo.fetch_stations().await.unwrap_err();
        assert!(err.is_retryable());
    }
}
