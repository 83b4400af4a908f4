//! HTTP handlers for order pricing

use axum::{
    extract::{Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    validate_line_item, DiscountPercent, OrderDraft, OrderLineItem, OrderTotals, RejectedRecord,
};

use crate::error::AppResult;
use crate::services::{screen, BatchQuery};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub items: Vec<OrderLineItem>,
    /// Raw form value; clamped into [0, 100]
    #[serde(default)]
    pub discount_percent: Decimal,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub items: Vec<OrderLineItem>,
    pub discount_percent: DiscountPercent,
    pub totals: OrderTotals,
    pub total_units: i64,
    pub average_unit_price: Decimal,
    pub currency: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedRecord>,
}

/// Price a set of line items with the configured tax rate and shipping fee
pub async fn quote_order(
    State(state): State<AppState>,
    Query(query): Query<BatchQuery>,
    Json(input): Json<QuoteRequest>,
) -> AppResult<Json<QuoteResponse>> {
    let (items, rejected) = screen(input.items, query.on_invalid, validate_line_item)?;
    let discount = DiscountPercent::clamped(input.discount_percent);
    let draft = OrderDraft::from_items(state.pricing, items, discount)?;
    let totals = draft.totals();

    tracing::debug!(
        lines = draft.items().len(),
        total = %totals.total,
        "Quoted order"
    );
    Ok(Json(QuoteResponse {
        items: draft.items().to_vec(),
        discount_percent: draft.discount(),
        totals,
        total_units: draft.total_units(),
        average_unit_price: draft.average_unit_price(),
        currency: state.config.currency.code.code().to_string(),
        rejected,
    }))
}
