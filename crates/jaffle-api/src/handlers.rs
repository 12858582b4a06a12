//! REST endpoint handlers for the shop API.
//!
//! Each handler checks out one pooled connection for the whole request and
//! returns it when the handler finishes. Collection endpoints are paged;
//! when more rows follow, the response carries a `Link` header with
//! `rel="next"`, and otherwise no `Link` header at all.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/row-counts` | Row count of every table |
//! | `GET` | `/customers` | Page of customers |
//! | `GET` | `/customers/{customer_id}` | Single customer |
//! | `GET` | `/orders` | Page of orders with items (`start_date`, `end_date`) |
//! | `GET` | `/orders/{order_id}` | Single order with items |
//! | `GET` | `/items` | Page of order items |
//! | `GET` | `/items/{item_id}` | Single item |
//! | `GET` | `/products` | Page of products |
//! | `GET` | `/products/{sku}` | Single product |
//! | `GET` | `/stores` | Page of stores |
//! | `GET` | `/stores/{store_id}` | Single store |
//! | `GET` | `/supplies` | Page of supplies |
//! | `GET` | `/supplies/{supply_id}` | Single supply |

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, RawQuery, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use jaffle_db::{
    Comparison, Filter, FilterValue, Page, PageRequest, Resource, enrich_order, enrich_orders,
    fetch_by_key, paginate,
};
use jaffle_types::{Customer, Item, Order, Product, RowCount, Store, Supply};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::error::ApiError;
use crate::link::next_link;
use crate::state::AppState;

/// SQL expression the order date filters compare against.
const ORDER_DATE_EXPR: &str = "date(ordered_at)";

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// A blank query value (`start_date=`) is the same as leaving it out.
fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Pagination query parameters shared by every collection endpoint.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PageParams {
    /// 1-based page number (default 1).
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    /// Rows per page (default from configuration).
    #[validate(range(min = 1))]
    pub page_size: Option<u32>,
}

impl PageParams {
    /// Run the field validators.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidQuery`] describing every failed rule.
    pub fn validated(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::InvalidQuery(e.to_string()))
    }
}

/// Query parameters for `GET /orders`.
///
/// Must stay flat: numeric fields under `#[serde(flatten)]` do not
/// deserialize from query strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrdersQuery {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Rows per page.
    pub page_size: Option<u32>,
    /// Earliest order date, inclusive (`YYYY-MM-DD`).
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub start_date: Option<NaiveDate>,
    /// Latest order date, inclusive (`YYYY-MM-DD`).
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub end_date: Option<NaiveDate>,
}

impl OrdersQuery {
    /// The pagination part of the query.
    pub const fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// `WHERE` conditions for the date bounds; empty when neither is set.
    pub fn filter(&self) -> Filter {
        Filter::new()
            .and_opt(
                ORDER_DATE_EXPR,
                Comparison::Gte,
                self.start_date.map(FilterValue::Date),
            )
            .and_opt(
                ORDER_DATE_EXPR,
                Comparison::Lte,
                self.end_date.map(FilterValue::Date),
            )
    }
}

// ---------------------------------------------------------------------------
// Shared plumbing
// ---------------------------------------------------------------------------

/// Serialize a page of rows, adding `Link` when a next page exists.
fn paged_response<T: Serialize>(
    state: &AppState,
    table: &str,
    raw_query: Option<&str>,
    request: PageRequest,
    page: Page<T>,
) -> Result<Response, ApiError> {
    let link = if page.has_next {
        let next_page = request
            .page
            .checked_add(1)
            .ok_or_else(|| ApiError::InvalidQuery(String::from("page is out of range")))?;
        Some(next_link(
            &state.collection_path(table),
            raw_query,
            next_page,
        )?)
    } else {
        None
    };

    let mut response = Json(page.rows).into_response();
    if let Some(link) = link {
        let value = HeaderValue::from_str(&link)
            .map_err(|e| ApiError::Internal(format!("invalid Link header: {e}")))?;
        response.headers_mut().insert(header::LINK, value);
    }
    Ok(response)
}

/// List handler body for resources without filters or enrichment.
async fn list_resource<R: Resource + Serialize>(
    state: &AppState,
    params: &PageParams,
    raw_query: Option<&str>,
) -> Result<Response, ApiError> {
    let request = state.page_request(params)?;
    let mut conn = state.db.acquire().await?;
    let page = paginate::<R>(&mut conn, request, &Filter::new()).await?;
    paged_response(state, R::TABLE, raw_query, request, page)
}

/// Get-by-key handler body for resources without enrichment.
async fn get_resource<R: Resource>(state: &AppState, key: &str) -> Result<R, ApiError> {
    let mut conn = state.db.acquire().await?;
    Ok(fetch_by_key::<R>(&mut conn, key).await?)
}

// ---------------------------------------------------------------------------
// GET /row-counts
// ---------------------------------------------------------------------------

/// Return the row count of every monitored table.
pub async fn row_counts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RowCount>>, ApiError> {
    let mut conn = state.db.acquire().await?;
    let counts = jaffle_db::row_counts(&mut conn).await?;
    Ok(Json(counts))
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

/// Return a page of customers.
///
/// Pagination is controlled via `page` and `page_size`. If more results
/// are available the response includes a `Link` header with
/// `rel="next"` pointing at the next page.
pub async fn list_customers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
    RawQuery(raw_query): RawQuery,
) -> Result<Response, ApiError> {
    list_resource::<Customer>(&state, &params, raw_query.as_deref()).await
}

/// Return a single customer.
pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    get_resource::<Customer>(&state, &customer_id).await.map(Json)
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Return a page of orders, each with its line items.
///
/// `start_date` and `end_date` restrict the date part of `ordered_at`,
/// both bounds inclusive.
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OrdersQuery>,
    RawQuery(raw_query): RawQuery,
) -> Result<Response, ApiError> {
    let request = state.page_request(&query.page_params())?;
    let filter = query.filter();

    let mut conn = state.db.acquire().await?;
    let page = paginate::<Order>(&mut conn, request, &filter).await?;
    let rows = enrich_orders(&mut conn, page.rows).await?;

    paged_response(
        &state,
        Order::TABLE,
        raw_query.as_deref(),
        request,
        Page { rows, ..page },
    )
}

/// Return a single order with its line items.
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let mut conn = state.db.acquire().await?;
    let order = fetch_by_key::<Order>(&mut conn, &order_id).await?;
    let order = enrich_order(&mut conn, order).await?;
    Ok(Json(order))
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Return a page of order items.
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
    RawQuery(raw_query): RawQuery,
) -> Result<Response, ApiError> {
    list_resource::<Item>(&state, &params, raw_query.as_deref()).await
}

/// Return a single order item.
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    get_resource::<Item>(&state, &item_id).await.map(Json)
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Return a page of products.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
    RawQuery(raw_query): RawQuery,
) -> Result<Response, ApiError> {
    list_resource::<Product>(&state, &params, raw_query.as_deref()).await
}

/// Return a single product by SKU.
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(sku): Path<String>,
) -> Result<Json<Product>, ApiError> {
    get_resource::<Product>(&state, &sku).await.map(Json)
}

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// Return a page of stores.
pub async fn list_stores(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
    RawQuery(raw_query): RawQuery,
) -> Result<Response, ApiError> {
    list_resource::<Store>(&state, &params, raw_query.as_deref()).await
}

/// Return a single store.
pub async fn get_store(
    State(state): State<Arc<AppState>>,
    Path(store_id): Path<String>,
) -> Result<Json<Store>, ApiError> {
    get_resource::<Store>(&state, &store_id).await.map(Json)
}

// ---------------------------------------------------------------------------
// Supplies
// ---------------------------------------------------------------------------

/// Return a page of supplies.
pub async fn list_supplies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
    RawQuery(raw_query): RawQuery,
) -> Result<Response, ApiError> {
    list_resource::<Supply>(&state, &params, raw_query.as_deref()).await
}

/// Return a single supply.
///
/// Supply ids are shared across products; the first row by SKU wins.
pub async fn get_supply(
    State(state): State<Arc<AppState>>,
    Path(supply_id): Path<String>,
) -> Result<Json<Supply>, ApiError> {
    get_resource::<Supply>(&state, &supply_id).await.map(Json)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn page_params_accept_in_range_values() {
        let params = PageParams {
            page: Some(1),
            page_size: Some(1000),
        };
        assert!(params.validated().is_ok());
        assert!(PageParams::default().validated().is_ok());
    }

    #[test]
    fn page_params_reject_zero_page() {
        let params = PageParams {
            page: Some(0),
            page_size: None,
        };
        assert!(matches!(params.validated(), Err(ApiError::InvalidQuery(_))));
    }

    #[test]
    fn page_params_reject_zero_page_size() {
        let params = PageParams {
            page: None,
            page_size: Some(0),
        };
        assert!(matches!(params.validated(), Err(ApiError::InvalidQuery(_))));
    }

    #[test]
    fn page_params_accept_page_size_above_config_limit() {
        for page_size in [crate::config::MAX_PAGE_SIZE + 1, u32::MAX] {
            let params = PageParams {
                page: None,
                page_size: Some(page_size),
            };
            assert!(params.validated().is_ok(), "{page_size}");
        }
    }

    #[test]
    fn orders_query_without_dates_has_no_filter() {
        assert!(OrdersQuery::default().filter().is_empty());
    }

    #[test]
    fn orders_query_with_dates_builds_filter() {
        let query = OrdersQuery {
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1),
            ..OrdersQuery::default()
        };
        assert!(!query.filter().is_empty());
    }

    #[test]
    fn orders_query_blank_dates_are_absent() {
        let query: OrdersQuery =
            serde_urlencoded::from_str("start_date=&end_date=2022-12-31&page=2").unwrap();
        assert_eq!(query.start_date, None);
        assert_eq!(query.end_date, NaiveDate::from_ymd_opt(2022, 12, 31));
        assert_eq!(query.page, Some(2));
    }

    #[test]
    fn orders_query_rejects_malformed_dates() {
        let result = serde_urlencoded::from_str::<OrdersQuery>("start_date=January");
        assert!(result.is_err());
    }
}
