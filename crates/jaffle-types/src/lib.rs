//! Shared row types for the Jaffle Shop read API.
//!
//! Every struct here mirrors one table of the shop database and is decoded
//! straight from a `sqlx` result set via [`sqlx::FromRow`]. The API never
//! writes, so these types are plain read-only snapshots.
//!
//! # Modules
//!
//! - [`rows`] -- One struct per exposed table plus the row-count summary

pub mod rows;

// Re-export all public types at crate root for convenience.
pub use rows::{Customer, Item, Order, Product, RowCount, Store, Supply};
