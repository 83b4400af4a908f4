//! HTTP handlers for sales performance

use axum::{extract::Query, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    inventory_valuation, validate_inventory_item, validate_order_record, validate_product_sales,
    InventoryItem, OrderBook, OrderRecord, ProductSales, RejectedRecord, SalesSummary,
};

use crate::error::AppResult;
use crate::services::{screen, BatchQuery};

#[derive(Debug, Deserialize)]
pub struct SalesSummaryRequest {
    pub sales: Vec<ProductSales>,
    #[serde(default)]
    pub orders: Vec<OrderRecord>,
    /// Items to value at cost alongside the sales figures
    #[serde(default)]
    pub items: Vec<InventoryItem>,
}

#[derive(Debug, Serialize)]
pub struct SalesSummaryResponse {
    pub summary: SalesSummary,
    pub order_book: OrderBook,
    pub inventory_value: Decimal,
    /// Indexes refer to the sales array
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected_orders: Vec<RejectedRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected_items: Vec<RejectedRecord>,
}

/// Revenue, profit, margins and order book figures.
///
/// `?on_invalid` applies to each array on its own; rejections are reported
/// per array with indexes into that array.
pub async fn summarize_sales(
    Query(query): Query<BatchQuery>,
    Json(input): Json<SalesSummaryRequest>,
) -> AppResult<Json<SalesSummaryResponse>> {
    let (sales, rejected) = screen(input.sales, query.on_invalid, validate_product_sales)?;
    let (orders, rejected_orders) = screen(input.orders, query.on_invalid, validate_order_record)?;
    let (items, rejected_items) = screen(input.items, query.on_invalid, validate_inventory_item)?;

    let summary = SalesSummary::from_sales(&sales);
    tracing::debug!(
        products = summary.products.len(),
        revenue = %summary.total_revenue,
        "Summarized sales"
    );
    Ok(Json(SalesSummaryResponse {
        summary,
        order_book: OrderBook::from_orders(&orders),
        inventory_value: inventory_valuation(&items),
        rejected,
        rejected_orders,
        rejected_items,
    }))
}
