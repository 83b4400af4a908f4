//! Route definitions for the InventoryPro metrics API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/inventory", inventory_routes())
        .nest("/cashflow", cashflow_routes())
        .route("/orders/quote", post(handlers::quote_order))
        .route("/sales/summary", post(handlers::summarize_sales))
        .route("/transfers/validate", post(handlers::validate_transfer))
}

/// Stock status and movement routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/status", post(handlers::classify_items))
        .route("/summary", post(handlers::summarize_inventory))
        .route("/movements/apply", post(handlers::apply_movements))
}

/// Cashflow aggregation routes
fn cashflow_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", post(handlers::summarize_cashflow))
        .route("/categories", post(handlers::category_breakdown))
        .route("/search", post(handlers::search_transactions))
}
