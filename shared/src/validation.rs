//! Boundary validation for records entering the metrics engine
//!
//! Records are checked once, as they arrive, so a malformed entry is rejected
//! before it reaches any aggregation. Whether a rejection aborts the whole
//! batch or just drops the record is the caller's call; see [`partition_valid`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, MetricsResult};
use crate::models::{
    CashTransaction, ChannelBalances, InventoryItem, OrderLineItem, OrderRecord, ProductSales,
    StockMovement, Supplier, Warehouse,
};

/// Largest money amount accepted on a record (one trillion).
///
/// With [`MAX_QUANTITY`] this keeps every sum and product the engine derives
/// inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Largest unit count accepted on a record
pub const MAX_QUANTITY: i64 = 1_000_000_000;

// ============================================================================
// Field checks
// ============================================================================

fn non_negative(field: &'static str, value: i64) -> MetricsResult<()> {
    if value < 0 {
        return Err(MetricsError::negative(field, value));
    }
    within_quantity(field, value)
}

/// Signed counters and deltas: magnitude at most [`MAX_QUANTITY`]
fn within_quantity(field: &'static str, value: i64) -> MetricsResult<()> {
    if value.unsigned_abs() > MAX_QUANTITY.unsigned_abs() {
        return Err(MetricsError::InvalidRange {
            field,
            message: format!("{} exceeds {} units", value, MAX_QUANTITY),
        });
    }
    Ok(())
}

fn non_negative_amount(field: &'static str, value: Decimal) -> MetricsResult<()> {
    if value < Decimal::ZERO {
        return Err(MetricsError::negative(field, value));
    }
    within_amount(field, value)
}

fn within_amount(field: &'static str, value: Decimal) -> MetricsResult<()> {
    if value.abs() > MAX_AMOUNT {
        return Err(MetricsError::InvalidRange {
            field,
            message: format!("{} exceeds {}", value, MAX_AMOUNT),
        });
    }
    Ok(())
}

// ============================================================================
// Inventory
// ============================================================================

/// Closing stock and thresholds as used by the stock-status rules
pub fn validate_stock_levels(closing_stock: i64, min_stock: i64, max_stock: i64) -> MetricsResult<()> {
    non_negative("closing_stock", closing_stock)?;
    non_negative("min_stock", min_stock)?;
    non_negative("max_stock", max_stock)?;
    if min_stock > max_stock {
        return Err(MetricsError::InvalidRange {
            field: "min_stock",
            message: format!("minimum {} exceeds maximum {}", min_stock, max_stock),
        });
    }
    Ok(())
}

/// Stock counters non-negative, thresholds ordered, prices non-negative
pub fn validate_inventory_item(item: &InventoryItem) -> MetricsResult<()> {
    validate_stock_levels(item.closing_stock, item.min_stock, item.max_stock)?;
    non_negative("beginning_stock", item.beginning_stock)?;
    non_negative("purchased_stock", item.purchased_stock)?;
    non_negative("sales_stock", item.sales_stock)?;
    within_quantity("adjustments", item.adjustments)?;
    within_quantity("transfers", item.transfers)?;
    non_negative_amount("unit_cost", item.unit_cost)?;
    non_negative_amount("unit_price", item.unit_price)?;
    Ok(())
}

/// Quantity sign matching the movement kind, magnitude within bounds
pub fn validate_stock_movement(movement: &StockMovement) -> MetricsResult<()> {
    within_quantity("quantity", movement.quantity)?;
    movement.validate_sign()
}

// ============================================================================
// Cashflow
// ============================================================================

/// Amount non-negative and category belonging to the transaction's direction
pub fn validate_cash_transaction(transaction: &CashTransaction) -> MetricsResult<()> {
    non_negative_amount("amount", transaction.amount)?;
    if !transaction.direction.allows_category(&transaction.category) {
        return Err(MetricsError::UnknownCategory {
            category: transaction.category.clone(),
            direction: transaction.direction.as_str().to_string(),
        });
    }
    Ok(())
}

/// Opening balances may be overdrawn but stay within [`MAX_AMOUNT`]
pub fn validate_channel_balances(balances: &ChannelBalances) -> MetricsResult<()> {
    within_amount("opening_balances.cash", balances.cash)?;
    within_amount("opening_balances.mobile_money", balances.mobile_money)?;
    within_amount("opening_balances.bank", balances.bank)
}

// ============================================================================
// Orders & sales
// ============================================================================

pub fn validate_line_item(item: &OrderLineItem) -> MetricsResult<()> {
    non_negative("quantity", item.quantity)?;
    if item.quantity < 1 {
        return Err(MetricsError::InvalidRange {
            field: "quantity",
            message: format!("{} must order at least 1 unit", item.product_name),
        });
    }
    non_negative_amount("unit_price", item.unit_price)
}

pub fn validate_order_record(order: &OrderRecord) -> MetricsResult<()> {
    non_negative("items", order.items)?;
    non_negative("quantity", order.quantity)?;
    non_negative_amount("total", order.total)
}

/// Quantity and revenue must be non-negative; profit may be a loss
pub fn validate_product_sales(sales: &ProductSales) -> MetricsResult<()> {
    non_negative("quantity", sales.quantity)?;
    non_negative_amount("revenue", sales.revenue)?;
    within_amount("profit", sales.profit)
}

// ============================================================================
// Warehouses & directory
// ============================================================================

pub fn validate_warehouse(warehouse: &Warehouse) -> MetricsResult<()> {
    non_negative("total_items", warehouse.total_items)?;
    non_negative("capacity", warehouse.capacity)?;
    non_negative_amount("total_value", warehouse.total_value)
}

/// Ratings are 0 to 5 stars
pub fn validate_supplier(supplier: &Supplier) -> MetricsResult<()> {
    if supplier.rating < Decimal::ZERO || supplier.rating > Decimal::from(5) {
        return Err(MetricsError::InvalidRange {
            field: "rating",
            message: format!("{} is outside [0, 5]", supplier.rating),
        });
    }
    non_negative_amount("total_value", supplier.total_value)
}

// ============================================================================
// Batch policy
// ============================================================================

/// A record dropped from a batch, with its position in the input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RejectedRecord {
    pub index: usize,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl RejectedRecord {
    pub fn new(index: usize, error: &MetricsError) -> Self {
        Self {
            index,
            code: error.code().to_string(),
            message: error.to_string(),
            field: error.field().map(str::to_string),
        }
    }
}

/// Split a batch into records that pass `validate` and rejections
pub fn partition_valid<T, F>(records: Vec<T>, validate: F) -> (Vec<T>, Vec<RejectedRecord>)
where
    F: Fn(&T) -> MetricsResult<()>,
{
    let mut valid = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();
    for (index, record) in records.into_iter().enumerate() {
        match validate(&record) {
            Ok(()) => valid.push(record),
            Err(e) => rejected.push(RejectedRecord::new(index, &e)),
        }
    }
    (valid, rejected)
}

/// Validate every record, failing on the first bad one
pub fn validate_all<T, F>(records: &[T], validate: F) -> MetricsResult<()>
where
    F: Fn(&T) -> MetricsResult<()>,
{
    records.iter().try_for_each(validate)
}
