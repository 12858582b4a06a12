//! Attaching line items to orders.
//!
//! Items are fetched with one statement per order, sequentially on the
//! request's connection. Output keeps the input's length and order; each
//! order only gains its `items`.

use jaffle_types::{Item, Order};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::error::DbError;
use crate::query;
use crate::resource::Resource;

/// Fetch every item belonging to `order_id`.
///
/// # Errors
///
/// Returns [`DbError::Query`] if the statement fails.
pub async fn items_for_order(
    conn: &mut SqliteConnection,
    order_id: &str,
) -> Result<Vec<Item>, DbError> {
    let mut select = QueryBuilder::<Sqlite>::new("SELECT * FROM ");
    select
        .push(Item::TABLE)
        .push(" WHERE order_id = ")
        .push_bind(order_id.to_owned())
        .push(" ORDER BY ")
        .push(Item::SORT);
    query::fetch_list(conn, select).await
}

/// Attach items to every order in `orders`.
///
/// # Errors
///
/// Returns [`DbError::Query`] on the first failing lookup; no partially
/// enriched list is returned.
pub async fn enrich_orders(
    conn: &mut SqliteConnection,
    mut orders: Vec<Order>,
) -> Result<Vec<Order>, DbError> {
    for order in &mut orders {
        order.items = items_for_order(conn, &order.id).await?;
    }
    tracing::debug!(orders = orders.len(), "Enriched orders with items");
    Ok(orders)
}

/// Attach items to a single order.
///
/// # Errors
///
/// Returns [`DbError::Query`] if the lookup fails.
pub async fn enrich_order(conn: &mut SqliteConnection, mut order: Order) -> Result<Order, DbError> {
    order.items = items_for_order(conn, &order.id).await?;
    Ok(order)
}
