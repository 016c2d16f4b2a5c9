//! Repository trait definitions for database operations.
//!
//! The data-access contract is split by entity:
//!
//! - [`error`]: Error types for repository operations
//! - [`measurement`]: Precipitation, temperature and activity queries
//! - [`station`]: Station metadata
//!
//! # Convenience Trait Bound
//!
//! Handlers and services that need every capability take a
//! [`FullRepository`]:
//!
//! ```ignore
//! async fn my_service<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<()> {
//!     let stations = repo.fetch_stations().await?;
//!     let latest = repo.latest_measurement_date().await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod measurement;
pub mod station;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use measurement::MeasurementRepository;
pub use station::StationRepository;

/// Composite trait bound for a complete repository implementation.
pub trait FullRepository: MeasurementRepository + StationRepository {}

// Blanket implementation: anything implementing both traits is a FullRepository
impl<T> FullRepository for T where T: MeasurementRepository + StationRepository {}
