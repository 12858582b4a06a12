//! Row structs for the shop tables.
//!
//! Column names match the database schema one to one, so each struct can
//! be decoded with `SELECT *`. Money columns are integer cents.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

/// A shop customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    /// Primary key.
    pub id: String,
    /// Display name.
    pub name: String,
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// A placed order.
///
/// `items` is not a column. It is empty after decoding and gets filled in
/// by order enrichment; it is always serialized, as `[]` when the order has
/// no line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    /// Primary key.
    pub id: String,
    /// The customer who placed the order.
    pub customer_id: String,
    /// When the order was placed.
    pub ordered_at: NaiveDateTime,
    /// The store the order was placed at.
    pub store_id: String,
    /// Sum of item prices, in cents.
    pub subtotal: i64,
    /// Tax charged, in cents.
    pub tax_paid: i64,
    /// `subtotal + tax_paid`, in cents.
    pub order_total: i64,
    /// Line items attached by enrichment.
    #[sqlx(skip)]
    #[serde(default)]
    pub items: Vec<Item>,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// A single line item of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    /// Primary key.
    pub id: String,
    /// The order this item belongs to.
    pub order_id: String,
    /// The product sold.
    pub sku: String,
    /// Units sold.
    pub quantity: i64,
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// A product on the menu, identified by its SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Stock keeping unit; the primary key.
    pub sku: String,
    /// Product name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Unit price, in cents.
    pub price: i64,
    /// Menu category (e.g. `jaffle`, `beverage`).
    pub category: String,
}

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// A physical store location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Store {
    /// Primary key.
    pub id: String,
    /// Store name, usually the city.
    pub name: String,
    /// When the store opened.
    pub opened_at: NaiveDateTime,
    /// Local sales tax rate as a fraction (e.g. `0.04`).
    pub tax_rate: f64,
}

// ---------------------------------------------------------------------------
// Supplies
// ---------------------------------------------------------------------------

/// A supply consumed when making a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Supply {
    /// Primary key. Not unique per supply name; one row per product using it.
    pub id: String,
    /// The product this supply is used for.
    pub sku: String,
    /// Supply name.
    pub name: String,
    /// Unit cost, in cents.
    pub cost: i64,
    /// Whether the supply spoils.
    pub is_perishable: bool,
}

// ---------------------------------------------------------------------------
// Row-count summary
// ---------------------------------------------------------------------------

/// Total row count of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RowCount {
    /// Table name.
    pub table_name: String,
    /// `COUNT(*)` of the table.
    pub row_count: i64,
}
