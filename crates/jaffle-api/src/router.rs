//! Axum router construction for the shop API.
//!
//! Assembles all routes into a single [`Router`] mounted under the
//! configured prefix, with CORS and request tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the API server.
///
/// Every route below is mounted under `state.config.api_prefix`
/// (default `/api/v1`):
/// - `GET /row-counts`
/// - `GET /customers`, `GET /customers/{customer_id}`
/// - `GET /orders`, `GET /orders/{order_id}`
/// - `GET /items`, `GET /items/{item_id}`
/// - `GET /products`, `GET /products/{sku}`
/// - `GET /stores`, `GET /stores/{store_id}`
/// - `GET /supplies`, `GET /supplies/{supply_id}`
///
/// CORS allows any origin; the API is read-only and unauthenticated.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([axum::http::header::LINK]);

    let api = Router::new()
        .route("/row-counts", get(handlers::row_counts))
        .route("/customers", get(handlers::list_customers))
        .route("/customers/{customer_id}", get(handlers::get_customer))
        .route("/orders", get(handlers::list_orders))
        .route("/orders/{order_id}", get(handlers::get_order))
        .route("/items", get(handlers::list_items))
        .route("/items/{item_id}", get(handlers::get_item))
        .route("/products", get(handlers::list_products))
        .route("/products/{sku}", get(handlers::get_product))
        .route("/stores", get(handlers::list_stores))
        .route("/stores/{store_id}", get(handlers::get_store))
        .route("/supplies", get(handlers::list_supplies))
        .route("/supplies/{supply_id}", get(handlers::get_supply));

    // Axum cannot nest at the root, so an empty prefix merges instead.
    let prefix = state.config.route_prefix().to_owned();
    let router = if prefix.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(&prefix, api)
    };

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
