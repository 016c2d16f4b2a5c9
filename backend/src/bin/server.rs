//! Climate API HTTP Server Binary
//!
//! Opens the weather-observation repository, builds the router and serves it.
//!
//! # Usage
//!
//! ```bash
//! # Serve the SQLite dataset
//! DATABASE_URL=Resources/hawaii.sqlite cargo run --bin climate-server
//!
//! # Serve from a configuration file
//! CLIMATE_CONFIG=repository.toml cargo run --bin climate-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 127.0.0.1)
//! - `PORT`: Server port (default: 5000)
//! - `CLIMATE_CONFIG`: Path to a repository.toml file
//! - `REPOSITORY_TYPE`, `DATABASE_URL`, `SQLITE_*`: see `climate_api::db::SqliteConfig`
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use climate_api::db::{RepositoryConfig, RepositoryFactory};
use climate_api::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; `log` records from the library are forwarded too.
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting climate API server");

    let repository = if let Ok(path) = env::var("CLIMATE_CONFIG") {
        info!("Loading repository configuration from {}", path);
        RepositoryFactory::from_config_file(&path).await?
    } else if let Some(path) = RepositoryConfig::default_location() {
        info!("Loading repository configuration from {}", path.display());
        RepositoryFactory::from_config_file(&path).await?
    } else {
        RepositoryFactory::from_env().await?
    };
    info!("Repository initialized successfully");

    let app = create_router(AppState::new(repository));

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5000);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
