//! WebAssembly module for InventoryPro
//!
//! Provides client-side computation for:
//! - Stock status and fill levels
//! - Cashflow summaries
//! - Order quotes
//! - Profit margins and list search

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::search::*;
pub use shared::types::*;
pub use shared::validation::*;
use shared::MetricsError;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::debug_1(&JsValue::from_str("inventorypro-wasm loaded"));
}

fn js_error(message: String) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(&message));
    js_sys::Error::new(&message).into()
}

fn metrics_error(err: MetricsError) -> JsValue {
    js_error(format!("{}: {}", err.code(), err))
}

fn parse<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| js_error(format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_error(format!("Serialization failed: {}", e)))
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn to_decimal(field: &str, value: f64) -> Result<Decimal, JsValue> {
    Decimal::try_from(value).map_err(|_| js_error(format!("{} is not a finite number", field)))
}

/// Stock status as shown on badges: out-of-stock, low-stock, overstock, normal
///
/// Throws on negative levels or a minimum above the maximum.
#[wasm_bindgen]
pub fn classify_stock(closing_stock: i32, min_stock: i32, max_stock: i32) -> Result<String, JsValue> {
    let (closing, min, max) = (closing_stock.into(), min_stock.into(), max_stock.into());
    validate_stock_levels(closing, min, max).map_err(metrics_error)?;
    Ok(classify_stock_status(closing, min, max).to_string())
}

/// Fill percentage for progress bars; throws on negative levels or a zero maximum
#[wasm_bindgen]
pub fn stock_fill_percent(closing_stock: i32, max_stock: i32) -> Result<f64, JsValue> {
    let (closing, max) = (closing_stock.into(), max_stock.into());
    validate_stock_levels(closing, 0, max).map_err(metrics_error)?;
    stock_fill_percentage(closing, max)
        .map(to_f64)
        .map_err(metrics_error)
}

/// Summarize a JSON array of transactions into a `CashflowSummary` JSON string
#[wasm_bindgen]
pub fn summarize_cashflow(transactions_json: &str) -> Result<String, JsValue> {
    let transactions: Vec<CashTransaction> = parse("transactions", transactions_json)?;
    validate_all(&transactions, validate_cash_transaction).map_err(metrics_error)?;
    to_json(&CashflowSummary::from_transactions(&transactions))
}

#[derive(Deserialize)]
struct QuoteInput {
    items: Vec<OrderLineItem>,
    #[serde(default)]
    discount_percent: Decimal,
    #[serde(default)]
    pricing: Option<PricingConfig>,
}

/// Price `{items, discount_percent, pricing?}` and return `OrderTotals` JSON
#[wasm_bindgen]
pub fn quote_order(order_json: &str) -> Result<String, JsValue> {
    let input: QuoteInput = parse("order", order_json)?;
    let pricing = match input.pricing {
        Some(p) => PricingConfig::new(p.tax_rate, p.shipping_fee).map_err(metrics_error)?,
        None => PricingConfig::default(),
    };
    let draft = OrderDraft::from_items(pricing, input.items, DiscountPercent::clamped(input.discount_percent))
        .map_err(metrics_error)?;
    to_json(&draft.totals())
}

/// Gross margin on a unit; throws on a zero price
#[wasm_bindgen]
pub fn profit_margin_percent(unit_price: f64, unit_cost: f64) -> Result<f64, JsValue> {
    let price = to_decimal("unit_price", unit_price)?;
    let cost = to_decimal("unit_cost", unit_cost)?;
    unit_profit_margin(price, cost).map(to_f64).map_err(metrics_error)
}

/// Search predicate for one record of the given kind
///
/// `kind` is one of inventory, transaction, order, customer, supplier, warehouse.
#[wasm_bindgen]
pub fn matches_search(query: &str, kind: &str, record_json: &str) -> Result<bool, JsValue> {
    let matched = match kind {
        "inventory" => matches_query(query, &parse::<InventoryItem>(kind, record_json)?),
        "transaction" => matches_query(query, &parse::<CashTransaction>(kind, record_json)?),
        "order" => matches_query(query, &parse::<OrderRecord>(kind, record_json)?),
        "customer" => matches_query(query, &parse::<Customer>(kind, record_json)?),
        "supplier" => matches_query(query, &parse::<Supplier>(kind, record_json)?),
        "warehouse" => matches_query(query, &parse::<Warehouse>(kind, record_json)?),
        other => return Err(js_error(format!("Unknown record kind: {}", other))),
    };
    Ok(matched)
}
