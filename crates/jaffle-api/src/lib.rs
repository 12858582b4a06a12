//! Read-only HTTP API over the Jaffle Shop tables.
//!
//! This crate provides an Axum HTTP server exposing customers, orders,
//! items, products, stores and supplies as paged JSON collections plus
//! single-record lookups, and a row-count summary.
//!
//! # Architecture
//!
//! ```text
//! request --> handlers --> jaffle_db (pagination / lookup / enrichment)
//!                 |
//!                 +--> link::next_link --> `Link: <...>; rel="next"`
//! ```
//!
//! Handlers get the connection pool and configuration through
//! [`AppState`]; nothing is cached between requests.

pub mod config;
pub mod error;
pub mod handlers;
pub mod link;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use crate::config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
