//! SQLite repository implementation using Diesel.
//!
//! Reads the pre-populated `hawaii.sqlite` dataset. The schema is declared
//! explicitly in [`schema`] and is never created, migrated or written: every
//! pooled connection is switched to `query_only` when it is opened.
//!
//! ## Features
//!
//! - Connection pooling with r2d2, one checked-out connection per operation
//! - Automatic retry for transient failures
//! - Query counters for monitoring
//!
//! Configuration lives in [`SqliteConfig`](crate::db::SqliteConfig).

use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::dsl::max;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

use crate::api::{DateRange, Station, StationActivity, TemperatureStats};
use crate::db::repo_config::SqliteConfig;
use crate::db::repository::{
    ErrorContext, MeasurementRepository, RepositoryError, RepositoryResult, StationRepository,
};

mod models;
mod schema;

use models::*;
use schema::*;

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

const REQUIRED_TABLES: [&str; 2] = ["measurement", "station"];

const MOST_ACTIVE_SQL: &str = "SELECT station, COUNT(date) AS observations \
     FROM measurement GROUP BY station ORDER BY observations DESC LIMIT 1";

const STATS_FROM_SQL: &str = "SELECT MIN(tobs) AS tmin, MAX(tobs) AS tmax, AVG(tobs) AS tavg \
     FROM measurement WHERE date >= ?";

const STATS_BETWEEN_SQL: &str = "SELECT MIN(tobs) AS tmin, MAX(tobs) AS tmax, AVG(tobs) AS tavg \
     FROM measurement WHERE date >= ? AND date <= ?";

fn is_file_path(url: &str) -> bool {
    url != ":memory:" && !url.starts_with("file:")
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total successful queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
    /// Total retried operations
    pub retried_operations: u64,
}

/// Puts every new pooled connection into read-only mode.
#[derive(Debug, Clone, Copy)]
struct ReadOnlySession {
    busy_timeout_ms: u64,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ReadOnlySession {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA query_only = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout_ms
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Diesel-backed read-only repository for the SQLite dataset.
#[derive(Clone, Debug)]
pub struct SqliteRepository {
    pool: SqlitePool,
    config: SqliteConfig,
    // Metrics counters
    total_queries: Arc<AtomicU64>,
    failed_queries: Arc<AtomicU64>,
    retried_operations: Arc<AtomicU64>,
}

impl SqliteRepository {
    /// Open the pool and check that the expected tables exist.
    ///
    /// # Returns
    /// * `Ok(SqliteRepository)` on success
    /// * `Err(RepositoryError)` if the file is missing, the pool cannot be
    ///   built, or a required table is absent
    pub fn new(config: SqliteConfig) -> RepositoryResult<Self> {
        if is_file_path(&config.database_url) && !Path::new(&config.database_url).exists() {
            // Opening a missing path would silently create an empty database.
            return Err(RepositoryError::configuration_with_context(
                format!("database file not found: {}", config.database_url),
                ErrorContext::new("create_pool"),
            ));
        }

        let manager = ConnectionManager::<SqliteConnection>::new(config.database_url.clone());

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .test_on_check_out(true)
            .connection_customizer(Box::new(ReadOnlySession {
                busy_timeout_ms: config.busy_timeout_ms,
            }))
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_schema_check"),
                )
            })?;
            Self::verify_schema(&mut conn)?;
        }

        log::info!(
            "Opened SQLite dataset {} (pool size {})",
            config.database_url,
            config.max_pool_size
        );

        Ok(Self {
            pool,
            config,
            total_queries: Arc::new(AtomicU64::new(0)),
            failed_queries: Arc::new(AtomicU64::new(0)),
            retried_operations: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Fail fast when the file is not the expected dataset.
    fn verify_schema(conn: &mut SqliteConnection) -> RepositoryResult<()> {
        let present: Vec<String> = sql_query(
            "SELECT name FROM sqlite_master WHERE type = 'table' \
             AND name IN ('measurement', 'station')",
        )
        .load::<TableNameRow>(conn)
        .map_err(|e| RepositoryError::from(e).with_operation("verify_schema"))?
        .into_iter()
        .map(|row| row.name)
        .collect();

        let missing: Vec<&str> = REQUIRED_TABLES
            .iter()
            .copied()
            .filter(|table| !present.iter().any(|p| p == table))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(RepositoryError::configuration_with_context(
                format!("missing tables: {}", missing.join(", ")),
                ErrorContext::new("verify_schema"),
            ))
        }
    }

    /// Execute a database operation with automatic retry for transient failures.
    ///
    /// The connection is checked out for the duration of `f` only and goes
    /// back to the pool before the result is returned.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();
        let retried_operations = self.retried_operations.clone();

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    retried_operations.fetch_add(1, Ordering::Relaxed);
                    log::warn!(
                        "Retrying {} (attempt {}/{})",
                        operation,
                        attempt + 1,
                        max_retries + 1
                    );
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2; // Exponential backoff
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new(operation)
                                .with_details(format!("attempt={}", attempt + 1)),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(err);
                    }
                };

                total_queries.fetch_add(1, Ordering::Relaxed);
                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e.with_operation(operation));
                        continue;
                    }
                    Err(e) => {
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(e.with_operation(operation));
                    }
                }
            }

            failed_queries.fetch_add(1, Ordering::Relaxed);
            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    /// Get pool health statistics.
    pub fn pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
            retried_operations: self.retried_operations.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl MeasurementRepository for SqliteRepository {
    async fn fetch_precipitation(&self) -> RepositoryResult<Vec<(String, Option<f64>)>> {
        self.with_conn("fetch_precipitation", |conn| {
            measurement::table
                .select((measurement::date, measurement::prcp))
                .load::<(String, Option<f64>)>(conn)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn latest_measurement_date(&self) -> RepositoryResult<Option<String>> {
        self.with_conn("latest_measurement_date", |conn| {
            measurement::table
                .select(max(measurement::date))
                .get_result::<Option<String>>(conn)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn most_active_station(&self) -> RepositoryResult<Option<StationActivity>> {
        self.with_conn("most_active_station", |conn| {
            let rows = sql_query(MOST_ACTIVE_SQL)
                .load::<StationActivityRow>(conn)
                .map_err(RepositoryError::from)?;
            Ok(rows.into_iter().next().map(StationActivity::from))
        })
        .await
    }

    async fn fetch_temperature_observations(
        &self,
        station: &str,
        since: &str,
    ) -> RepositoryResult<Vec<(String, f64)>> {
        log::debug!("tobs query station={} since={}", station, since);
        let station = station.to_string();
        let since = since.to_string();
        self.with_conn("fetch_temperature_observations", move |conn| {
            measurement::table
                .filter(measurement::station_id.eq(station.as_str()))
                .filter(measurement::date.ge(since.as_str()))
                .select((measurement::date, measurement::tobs))
                .load::<(String, f64)>(conn)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn temperature_stats(&self, range: &DateRange) -> RepositoryResult<TemperatureStats> {
        log::debug!("temperature stats start={} end={:?}", range.start, range.end);
        let range = range.clone();
        self.with_conn("temperature_stats", move |conn| {
            let row = match &range.end {
                Some(end) => sql_query(STATS_BETWEEN_SQL)
                    .bind::<Text, _>(range.start.clone())
                    .bind::<Text, _>(end.clone())
                    .get_result::<TemperatureStatsRow>(conn),
                None => sql_query(STATS_FROM_SQL)
                    .bind::<Text, _>(range.start.clone())
                    .get_result::<TemperatureStatsRow>(conn),
            }
            .map_err(RepositoryError::from)?;
            Ok(TemperatureStats::from(row))
        })
        .await
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(RepositoryError::from)
        })
        .await
    }
}

#[async_trait]
impl StationRepository for SqliteRepository {
    async fn fetch_stations(&self) -> RepositoryResult<Vec<Station>> {
        self.with_conn("fetch_stations", |conn| {
            station::table
                .select(StationRow::as_select())
                .load::<StationRow>(conn)
                .map(|rows| rows.into_iter().map(Station::from).collect())
                .map_err(RepositoryError::from)
        })
        .await
    }
}
