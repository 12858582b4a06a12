//! API server binary for the Jaffle Shop read API.
//!
//! # Startup Sequence
//!
//! 1. Load configuration (`jaffle-api.*` file and `JAFFLE_*` variables)
//! 2. Initialize structured logging (tracing)
//! 3. Open the `SQLite` connection pool
//! 4. Serve HTTP until `Ctrl-C`
//! 5. Close the pool

use std::sync::Arc;

use anyhow::Context;
use jaffle_api::{ApiConfig, AppState, ServerConfig, start_server};
use jaffle_db::DbPool;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the database, or the server fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration comes first so it can pick the log format.
    let config = ApiConfig::load().context("failed to load configuration")?;

    init_tracing(config.log_json);

    info!("jaffle-api starting");
    info!(
        host = config.host,
        port = config.port,
        api_prefix = config.api_prefix,
        default_page_size = config.default_page_size,
        database_path = config.database_path,
        "Configuration loaded"
    );

    let db = DbPool::connect(&config.sqlite_config())
        .await
        .with_context(|| format!("failed to open database {}", config.database_path))?;

    let server_config = ServerConfig::from(&config);
    let state = Arc::new(AppState::new(db.clone(), config));

    start_server(&server_config, state)
        .await
        .context("API server failed")?;

    db.close().await;
    info!("jaffle-api stopped");
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` controls filtering (default `info`).
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
