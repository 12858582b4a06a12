//! Configuration loading for the API server.
//!
//! Values are layered with the [`config`](::config) crate: field defaults, then an
//! optional config file (`jaffle-api.toml`, `.yaml`, ... or the stem named by
//! `JAFFLE_CONFIG`), then `JAFFLE_*` environment variables such as
//! `JAFFLE_PORT` or `JAFFLE_DATABASE_PATH`.

use std::time::Duration;

use ::config::builder::DefaultState;
use ::config::{ConfigBuilder, Environment, File};
use jaffle_db::SqliteConfig;
use serde::Deserialize;

/// Environment variable naming the config file stem.
pub const CONFIG_FILE_ENV: &str = "JAFFLE_CONFIG";

/// Config file stem used when `JAFFLE_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "jaffle-api";

/// Prefix of environment variable overrides.
const ENV_PREFIX: &str = "JAFFLE";

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load config: {0}")]
    Load(#[from] ::config::ConfigError),

    /// The loaded values are inconsistent.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path prefix of every route, also used in `Link` URLs.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Page size used when a request gives none.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// `SQLite` database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Connection pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds a request waits for a pooled connection.
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    /// Open the database read-only.
    #[serde(default = "default_read_only")]
    pub read_only: bool,

    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub log_json: bool,
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8080
}

fn default_api_prefix() -> String {
    String::from("/api/v1")
}

const fn default_page_size() -> u32 {
    100
}

fn default_database_path() -> String {
    String::from("jaffle_shop.db")
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_acquire_timeout_secs() -> u64 {
    5
}

const fn default_read_only() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_prefix: default_api_prefix(),
            default_page_size: default_page_size(),
            database_path: default_database_path(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
            read_only: default_read_only(),
            log_json: false,
        }
    }
}

impl ApiConfig {
    /// Load configuration from the file named by `JAFFLE_CONFIG` (or
    /// [`DEFAULT_CONFIG_FILE`]) and the environment.
    ///
    /// A missing config file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if a source is malformed and
    /// [`ConfigError::Invalid`] if the values fail [`ApiConfig::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_owned());
        Self::load_from(&file)
    }

    /// Load configuration from the given file stem and the environment.
    ///
    /// # Errors
    ///
    /// See [`ApiConfig::load`].
    pub fn load_from(file: &str) -> Result<Self, ConfigError> {
        let builder = ::config::Config::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the default page size is outside
    /// `1..=MAX_PAGE_SIZE`, the pool is empty, or the prefix is not a path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PAGE_SIZE).contains(&self.default_page_size) {
            return Err(ConfigError::Invalid(format!(
                "default_page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.default_page_size
            )));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid(String::from(
                "max_connections must be at least 1",
            )));
        }
        if !self.api_prefix.is_empty() && !self.api_prefix.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "api_prefix must start with '/', got {:?}",
                self.api_prefix
            )));
        }
        Ok(())
    }

    /// Route prefix without a trailing slash; empty means the root.
    pub fn route_prefix(&self) -> &str {
        self.api_prefix.trim_end_matches('/')
    }

    /// Pool settings for [`jaffle_db::DbPool::connect`].
    pub fn sqlite_config(&self) -> SqliteConfig {
        SqliteConfig::new(&self.database_path)
            .with_max_connections(self.max_connections)
            .with_acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .with_read_only(self.read_only)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use ::config::FileFormat;

    use super::*;

    fn from_toml(toml: &str) -> Result<ApiConfig, ConfigError> {
        ApiConfig::from_builder(
            ::config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    #[test]
    fn empty_source_yields_defaults() {
        let config = from_toml("").unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.api_prefix, "/api/v1");
        assert_eq!(config.default_page_size, 100);
    }

    #[test]
    fn file_values_override_defaults() {
        let config = from_toml(
            r#"
            port = 9000
            api_prefix = "/shop/"
            default_page_size = 25
            database_path = "/data/shop.db"
            read_only = false
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.route_prefix(), "/shop");
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.host, "0.0.0.0");

        let sqlite = config.sqlite_config();
        assert_eq!(sqlite.path.to_str(), Some("/data/shop.db"));
        assert!(!sqlite.read_only);
    }

    #[test]
    fn zero_default_page_size_is_rejected() {
        let result = from_toml("default_page_size = 0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn oversized_default_page_size_is_rejected() {
        let result = from_toml("default_page_size = 1001");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn relative_prefix_is_rejected() {
        let result = from_toml(r#"api_prefix = "api/v1""#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn root_prefix_trims_to_empty() {
        let config = from_toml(r#"api_prefix = "/""#).unwrap();
        assert_eq!(config.route_prefix(), "");
    }

    #[test]
    fn malformed_value_fails_to_load() {
        let result = from_toml(r#"port = "not a port""#);
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
