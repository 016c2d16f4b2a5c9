//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration. The resulting handle is passed explicitly to the
//! HTTP layer; nothing here is stored globally.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
#[cfg(feature = "sqlite-repo")]
use super::repositories::SqliteRepository;
use super::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use super::SqliteConfig;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RepositoryType {
    /// Diesel-backed read-only SQLite dataset
    #[default]
    Sqlite,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("sqlite", "local").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from the `REPOSITORY_TYPE` environment variable.
    ///
    /// Unset means Sqlite, served from `DATABASE_URL` or the default dataset path.
    ///
    /// # Errors
    /// Returns a configuration error when the variable names no known backend.
    pub fn from_env() -> Result<Self, RepositoryError> {
        match std::env::var("REPOSITORY_TYPE") {
            Ok(val) => val.parse().map_err(|e: String| {
                RepositoryError::configuration_with_context(
                    e,
                    ErrorContext::new("repository_type_from_env")
                        .with_details("REPOSITORY_TYPE"),
                )
            }),
            Err(_) => Ok(Self::default()),
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use climate_api::db::{RepositoryFactory, RepositoryType, SqliteConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = SqliteConfig::with_url("Resources/hawaii.sqlite");
///     let _repo = RepositoryFactory::create(RepositoryType::Sqlite, Some(&config)).await?;
///
///     let local_repo = RepositoryFactory::create_local();
///     Ok(())
/// }
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `sqlite_config` - Optional database configuration (required for Sqlite)
    pub async fn create(
        repo_type: RepositoryType,
        sqlite_config: Option<&SqliteConfig>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Sqlite => {
                #[cfg(feature = "sqlite-repo")]
                {
                    let config = sqlite_config.ok_or_else(|| {
                        RepositoryError::configuration(
                            "Sqlite repository requires SqliteConfig",
                        )
                    })?;
                    let repo = Self::create_sqlite(config).await?;
                    Ok(repo as Arc<dyn FullRepository>)
                }
                #[cfg(not(feature = "sqlite-repo"))]
                {
                    let _ = sqlite_config;
                    Err(RepositoryError::configuration(
                        "Sqlite repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Open the SQLite dataset.
    ///
    /// Pool construction blocks on file I/O, so it runs on the blocking pool.
    #[cfg(feature = "sqlite-repo")]
    pub async fn create_sqlite(config: &SqliteConfig) -> RepositoryResult<Arc<SqliteRepository>> {
        let config = config.clone();
        let repo = tokio::task::spawn_blocking(move || SqliteRepository::new(config))
            .await
            .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))??;
        Ok(Arc::new(repo))
    }

    /// Create an empty in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create repository from environment configuration.
    pub async fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        RepositoryBuilder::new().from_env()?.build().await
    }

    /// Create repository from a TOML configuration file.
    pub async fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        RepositoryBuilder::new()
            .from_config_file(config_path)?
            .build()
            .await
    }

    /// Create repository from `repository.toml` in the standard locations.
    pub async fn from_default_config() -> RepositoryResult<Arc<dyn FullRepository>> {
        RepositoryBuilder::new()
            .from_default_config()?
            .build()
            .await
    }
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```ignore
/// use climate_api::db::{RepositoryBuilder, RepositoryType, SqliteConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let repo = RepositoryBuilder::new()
///         .repository_type(RepositoryType::Sqlite)
///         .sqlite_config(SqliteConfig::with_url("Resources/hawaii.sqlite"))
///         .build()
///         .await?;
///     Ok(())
/// }
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    sqlite_config: Option<SqliteConfig>,
}

impl RepositoryBuilder {
    /// Create a new repository builder with default settings.
    ///
    /// Defaults to Sqlite over the default dataset path.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::default(),
            sqlite_config: None,
        }
    }

    /// Set the repository type.
    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    /// Set the SQLite configuration.
    pub fn sqlite_config(mut self, config: SqliteConfig) -> Self {
        self.sqlite_config = Some(config);
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, RepositoryError> {
        self.repo_type = RepositoryType::from_env()?;

        if self.repo_type == RepositoryType::Sqlite {
            let config = SqliteConfig::from_env().map_err(RepositoryError::configuration)?;
            self.sqlite_config = Some(config);
        }

        Ok(self)
    }

    /// Load configuration from a TOML file.
    pub fn from_config_file<P: AsRef<Path>>(
        self,
        config_path: P,
    ) -> Result<Self, RepositoryError> {
        let repo_config = RepositoryConfig::from_file(config_path)?;
        self.apply(&repo_config)
    }

    /// Load configuration from the default location.
    pub fn from_default_config(self) -> Result<Self, RepositoryError> {
        let repo_config = RepositoryConfig::from_default_location()?;
        self.apply(&repo_config)
    }

    fn apply(mut self, repo_config: &RepositoryConfig) -> Result<Self, RepositoryError> {
        self.repo_type = repo_config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        self.sqlite_config = repo_config.to_sqlite_config()?;
        Ok(self)
    }

    /// Build the repository instance.
    ///
    /// A Sqlite build without explicit settings uses [`SqliteConfig::default`].
    pub async fn build(self) -> RepositoryResult<Arc<dyn FullRepository>> {
        let sqlite_config = match (self.repo_type, self.sqlite_config) {
            (RepositoryType::Sqlite, None) => Some(SqliteConfig::default()),
            (_, config) => config,
        };
        RepositoryFactory::create(self.repo_type, sqlite_config.as_ref()).await
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
