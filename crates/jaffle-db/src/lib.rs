//! Data layer for the Jaffle Shop read API.
//!
//! The shop data lives in an embedded `SQLite` file that is produced
//! elsewhere; this crate only reads it. Every statement is built with
//! [`sqlx::QueryBuilder`], binding caller-supplied values as parameters.
//! Table and column names come exclusively from [`Resource`] constants.
//!
//! # Architecture
//!
//! ```text
//! Handler (one pooled connection per request)
//!     |
//!     +-- pagination::paginate ---> COUNT(*) + page SELECT
//!     |                                 |
//!     +-- query::fetch_by_key           +--> query (executor)
//!     |
//!     +-- orders::enrich_orders --> one items SELECT per order
//!     |
//!     +-- row_counts::row_counts --> single UNION ALL
//! ```
//!
//! # Modules
//!
//! - [`sqlite`] -- Connection pool and configuration
//! - [`resource`] -- Table metadata for the exposed row types
//! - [`query`] -- List and single-row execution
//! - [`pagination`] -- Offset pagination with optional filters
//! - [`orders`] -- Attaching line items to orders
//! - [`row_counts`] -- Row-count summary over all tables
//! - [`error`] -- Shared error types

pub mod error;
pub mod orders;
pub mod pagination;
pub mod query;
pub mod resource;
pub mod row_counts;
pub mod sqlite;

// Re-export primary types for convenience.
pub use error::DbError;
pub use orders::{enrich_order, enrich_orders, items_for_order};
pub use pagination::{Comparison, Filter, FilterValue, Page, PageRequest, paginate};
pub use query::{fetch_by_key, fetch_count, fetch_list, fetch_one};
pub use resource::{MONITORED_TABLES, Resource};
pub use row_counts::row_counts;
pub use sqlite::{DbPool, SqliteConfig};
