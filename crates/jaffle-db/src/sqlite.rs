//! Embedded `SQLite` connection pool.
//!
//! The shop database is a single `SQLite` file loaded by an external job.
//! The API opens it read-only by default and hands out one pooled
//! connection per request.
//!
//! Uses [`sqlx`] with runtime query construction (not compile-time checked)
//! to avoid requiring a database at build time.

use std::path::PathBuf;
use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};

use crate::error::DbError;

/// Default maximum number of connections in the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default pool acquire timeout in seconds.
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Configuration for the `SQLite` connection pool.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// How long a request waits for a free connection.
    pub acquire_timeout: Duration,
    /// Open the file read-only.
    pub read_only: bool,
}

impl SqliteConfig {
    /// Create a read-only configuration for the given database file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
            read_only: true,
        }
    }

    /// Set the maximum number of connections.
    #[must_use]
    pub const fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Set the acquire timeout.
    #[must_use]
    pub const fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Open the file read-only (`true`) or read-write (`false`).
    #[must_use]
    pub const fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }
}

/// Connection pool handle to the shop database.
///
/// Cheap to clone; all clones share the same underlying [`SqlitePool`].
#[derive(Clone, Debug)]
pub struct DbPool {
    pool: SqlitePool,
}

impl DbPool {
    /// Open the database file described by `config`.
    ///
    /// The file must already exist; it is never created.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the pool size is zero and
    /// [`DbError::Query`] if the file cannot be opened.
    pub async fn connect(config: &SqliteConfig) -> Result<Self, DbError> {
        if config.max_connections == 0 {
            return Err(DbError::Config(String::from(
                "max_connections must be at least 1",
            )));
        }

        let connect_options = SqliteConnectOptions::new()
            .filename(&config.path)
            .read_only(config.read_only)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(connect_options)
            .await?;

        tracing::info!(
            path = %config.path.display(),
            max_connections = config.max_connections,
            read_only = config.read_only,
            "Connected to SQLite"
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool, e.g. an in-memory database in tests.
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check out a connection for the duration of one request.
    ///
    /// The connection returns to the pool when the guard is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Query`] if no connection frees up before the
    /// acquire timeout.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, DbError> {
        Ok(self.pool.acquire().await?)
    }

    /// Close all connections in the pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("SQLite pool closed");
    }
}
