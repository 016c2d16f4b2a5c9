//! Database module for the weather-observation dataset.
//!
//! This module provides read-only access to measurements and stations via the
//! Repository pattern, so the SQLite dataset and the in-memory store are
//! interchangeable.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers (http/)                                  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Null filtering, trailing-year window, rounding       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/)                        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │                              │
//! ┌───▼───────────────┐   ┌──────────▼─────────┐
//! │ SqliteRepository  │   │  LocalRepository   │
//! │ (Diesel + r2d2)   │   │   (in-memory)      │
//! └───────────────────┘   └────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! ```ignore
//! use climate_api::db::{services, RepositoryFactory};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_env().await?;
//!     let stations = services::list_stations(repo.as_ref()).await?;
//!     Ok(())
//! }
//! ```
//!
//! There is no process-wide repository: the handle returned by the factory is
//! passed to whoever needs it.

#[cfg(not(any(feature = "sqlite-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

pub use services::{
    health_check, list_stations, precipitation, temperature_summary, tobs_last_year,
    trailing_year_start,
};

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repo_config::{RepositoryConfig, SqliteConfig};
pub use repositories::LocalRepository;
#[cfg(feature = "sqlite-repo")]
pub use repositories::{PoolStats, SqliteRepository};
pub use repository::{
    ErrorContext, FullRepository, MeasurementRepository, RepositoryError, RepositoryResult,
    StationRepository,
};
