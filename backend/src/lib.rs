//! # Climate API
//!
//! Read-only HTTP API over a weather-observation dataset: daily precipitation
//! and temperature readings keyed by station and date.
//!
//! ## Routes
//!
//! - `/` - plain listing of the routes below
//! - `/api/v1.0/precipitation` - `{date: prcp}` for every recorded reading
//! - `/api/v1.0/stations` - station metadata
//! - `/api/v1.0/tobs` - last year of temperatures at the most active station
//! - `/api/v1.0/start/{start}` - TMIN/TMAX/TAVG from `start` onward
//! - `/api/v1.0/start/end/{start}/{end}` - the same, bounded by `end`
//!
//! ## Architecture
//!
//! - [`api`]: Domain types
//! - [`db`]: Repository traits, SQLite and in-memory backends, service layer
//! - [`routes`]: Route paths and JSON response shapes
//! - [`http`]: Axum router and handlers

pub mod api;

pub mod db;

pub mod routes;

#[cfg(feature = "http-server")]
pub mod http;
