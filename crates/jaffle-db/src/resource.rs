//! Table metadata for the exposed row types.
//!
//! SQL identifiers are never taken from a request. Each row type names its
//! table, key column and sort order here, and query construction splices
//! only these constants into statement text.

use jaffle_types::{Customer, Item, Order, Product, Store, Supply};
use sqlx::FromRow;
use sqlx::sqlite::SqliteRow;

/// A row type backed by one table.
pub trait Resource: for<'r> FromRow<'r, SqliteRow> + Send + Unpin {
    /// Table name.
    const TABLE: &'static str;
    /// Column matched by single-record lookups.
    const KEY: &'static str;
    /// `ORDER BY` expression giving a stable, total row order for paging.
    const SORT: &'static str = Self::KEY;
}

impl Resource for Customer {
    const TABLE: &'static str = "customers";
    const KEY: &'static str = "id";
}

impl Resource for Order {
    const TABLE: &'static str = "orders";
    const KEY: &'static str = "id";
}

impl Resource for Item {
    const TABLE: &'static str = "items";
    const KEY: &'static str = "id";
}

impl Resource for Product {
    const TABLE: &'static str = "products";
    const KEY: &'static str = "sku";
}

impl Resource for Store {
    const TABLE: &'static str = "stores";
    const KEY: &'static str = "id";
}

impl Resource for Supply {
    const TABLE: &'static str = "supplies";
    const KEY: &'static str = "id";
    // One supply id is shared by every product that uses it.
    const SORT: &'static str = "id, sku";
}

/// Tables covered by the row-count summary, in output order.
pub const MONITORED_TABLES: [&str; 6] = [
    Customer::TABLE,
    Order::TABLE,
    Item::TABLE,
    Product::TABLE,
    Store::TABLE,
    Supply::TABLE,
];
