//! Shared application state for the API server.
//!
//! [`AppState`] carries the connection pool and the immutable
//! configuration. Handlers check out one connection per request from the
//! pool; there is no other shared mutable state.

use jaffle_db::{DbPool, PageRequest};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::handlers::PageParams;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Pool of connections to the shop database.
    pub db: DbPool,
    /// Loaded configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// Create application state from a pool and configuration.
    pub const fn new(db: DbPool, config: ApiConfig) -> Self {
        Self { db, config }
    }

    /// Resolve pagination parameters against the configured defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidQuery`] if `page` or `page_size` is out
    /// of range.
    pub fn page_request(&self, params: &PageParams) -> Result<PageRequest, ApiError> {
        params.validated()?;
        Ok(PageRequest::new(
            params.page.unwrap_or(1),
            params.page_size.unwrap_or(self.config.default_page_size),
        ))
    }

    /// Path of a collection under the API prefix, e.g. `/api/v1/orders`.
    pub fn collection_path(&self, table: &str) -> String {
        format!("{}/{table}", self.config.route_prefix())
    }
}
