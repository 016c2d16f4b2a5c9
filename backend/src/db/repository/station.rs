//! Station repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::Station;

/// Repository trait for station metadata.
#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Fetch every station record.
    async fn fetch_stations(&self) -> RepositoryResult<Vec<Station>>;
}
