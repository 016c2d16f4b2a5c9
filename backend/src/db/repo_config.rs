//! Repository configuration.
//!
//! Configuration comes either from a `repository.toml` file or from the
//! environment. Both end up as a [`RepositoryType`] plus, for the SQLite
//! backend, a [`SqliteConfig`].
//!
//! ```toml
//! [repository]
//! type = "sqlite"
//!
//! [sqlite]
//! database_url = "Resources/hawaii.sqlite"
//! max_connections = 4
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::RepositoryError;

/// Location of the dataset when nothing else is configured.
pub const DEFAULT_DATABASE_URL: &str = "Resources/hawaii.sqlite";

/// Configuration for opening the SQLite dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteConfig {
    /// Path to the database file
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// How long a statement waits on a locked database, in milliseconds
    pub busy_timeout_ms: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_pool_size: default_max_connections(),
            connection_timeout_sec: default_connect_timeout(),
            busy_timeout_ms: default_busy_timeout_ms(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl SqliteConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL`: Path to the SQLite file (default: `Resources/hawaii.sqlite`).
    ///   A SQLAlchemy-style `sqlite:///` prefix is accepted.
    /// - `SQLITE_POOL_MAX`: Maximum pool size (default: 4)
    /// - `SQLITE_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
    /// - `SQLITE_BUSY_TIMEOUT_MS`: Lock wait per statement in milliseconds (default: 5000)
    /// - `SQLITE_MAX_RETRIES`: Maximum retry attempts (default: 3)
    /// - `SQLITE_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)
    ///
    /// # Errors
    /// Returns an error if `DATABASE_URL` is set but empty.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) if url.trim().is_empty() => {
                return Err("DATABASE_URL must not be empty".to_string())
            }
            Ok(url) => normalize_database_url(&url),
            Err(_) => defaults.database_url,
        };

        Ok(Self {
            database_url,
            max_pool_size: env_or("SQLITE_POOL_MAX", defaults.max_pool_size),
            connection_timeout_sec: env_or(
                "SQLITE_CONN_TIMEOUT_SEC",
                defaults.connection_timeout_sec,
            ),
            busy_timeout_ms: env_or("SQLITE_BUSY_TIMEOUT_MS", defaults.busy_timeout_ms),
            max_retries: env_or("SQLITE_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_or("SQLITE_RETRY_DELAY_MS", defaults.retry_delay_ms),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl AsRef<str>) -> Self {
        Self {
            database_url: normalize_database_url(database_url.as_ref()),
            ..Default::default()
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Strip a SQLAlchemy-style `sqlite:///` prefix, leaving a filesystem path.
pub fn normalize_database_url(url: &str) -> String {
    url.strip_prefix("sqlite:///")
        .unwrap_or(url)
        .to_string()
}

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub sqlite: SqliteSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// SQLite connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for SqliteSettings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            max_connections: default_max_connections(),
            connect_timeout: default_connect_timeout(),
            busy_timeout_ms: default_busy_timeout_ms(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_max_connections() -> u32 {
    4
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse repository configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Locate `repository.toml` in the standard places, if any.
    ///
    /// Searches:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn default_location() -> Option<PathBuf> {
        [
            PathBuf::from("repository.toml"),
            PathBuf::from("backend/repository.toml"),
            PathBuf::from("../repository.toml"),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// Load repository configuration from the default location.
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        match Self::default_location() {
            Some(path) => Self::from_file(&path),
            None => Err(RepositoryError::configuration(
                "No repository.toml found in standard locations",
            )),
        }
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    /// Convert to SqliteConfig if this is a SQLite configuration.
    pub fn to_sqlite_config(&self) -> Result<Option<SqliteConfig>, RepositoryError> {
        let repo_type = self.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        if repo_type != RepositoryType::Sqlite {
            return Ok(None);
        }

        if self.sqlite.database_url.trim().is_empty() {
            return Err(RepositoryError::configuration(
                "Sqlite repository requires 'sqlite.database_url' setting",
            ));
        }

        Ok(Some(SqliteConfig {
            database_url: normalize_database_url(&self.sqlite.database_url),
            max_pool_size: self.sqlite.max_connections,
            connection_timeout_sec: self.sqlite.connect_timeout,
            busy_timeout_ms: self.sqlite.busy_timeout_ms,
            max_retries: self.sqlite.max_retries,
            retry_delay_ms: self.sqlite.retry_delay_ms,
        }))
    }
}
