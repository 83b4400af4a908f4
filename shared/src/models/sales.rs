//! Sales performance, profit margins and order book figures

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{InventoryItem, OrderRecord, OrderStatus, PaymentStatus};
use crate::error::{MetricsError, MetricsResult};
use crate::types::ratio_percent;

/// Sales figures for one product variant over a reporting period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSales {
    pub product: String,
    pub variant: String,
    pub quantity: i64,
    pub revenue: Decimal,
    pub profit: Decimal,
}

impl ProductSales {
    pub fn margin_percent(&self) -> Decimal {
        sales_profit_margin(self.profit, self.revenue)
    }
}

/// Gross margin on a unit: `(price - cost) / price × 100`
pub fn unit_profit_margin(unit_price: Decimal, unit_cost: Decimal) -> MetricsResult<Decimal> {
    if unit_price < Decimal::ZERO {
        return Err(MetricsError::negative("unit_price", unit_price));
    }
    if unit_cost < Decimal::ZERO {
        return Err(MetricsError::negative("unit_cost", unit_cost));
    }
    let profit = unit_price
        .checked_sub(unit_cost)
        .ok_or(MetricsError::Overflow { context: "unit profit" })?;
    ratio_percent(profit, unit_price, "unit_price is zero")
}

/// Realised margin: `profit / revenue × 100`, zero when nothing was sold
pub fn sales_profit_margin(profit: Decimal, revenue: Decimal) -> Decimal {
    ratio_percent(profit, revenue, "revenue is zero").unwrap_or(Decimal::ZERO)
}

/// Closing stock valued at cost across all items
pub fn inventory_valuation(items: &[InventoryItem]) -> Decimal {
    items.iter().map(InventoryItem::stock_value).sum()
}

/// Product's slice of total revenue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductShare {
    pub product: String,
    pub variant: String,
    pub revenue: Decimal,
    /// Zero when total revenue is zero
    pub share_percent: Decimal,
    pub margin_percent: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesSummary {
    pub total_revenue: Decimal,
    pub total_quantity: i64,
    pub total_profit: Decimal,
    pub margin_percent: Decimal,
    /// Revenue per unit sold, zero when no units were sold
    pub average_unit_revenue: Decimal,
    pub products: Vec<ProductShare>,
}

impl SalesSummary {
    pub fn from_sales(sales: &[ProductSales]) -> Self {
        let total_revenue: Decimal = sales.iter().map(|s| s.revenue).sum();
        let total_quantity: i64 = sales.iter().map(|s| s.quantity).sum();
        let total_profit: Decimal = sales.iter().map(|s| s.profit).sum();

        let average_unit_revenue = if total_quantity > 0 {
            total_revenue / Decimal::from(total_quantity)
        } else {
            Decimal::ZERO
        };

        let products = sales
            .iter()
            .map(|s| ProductShare {
                product: s.product.clone(),
                variant: s.variant.clone(),
                revenue: s.revenue,
                share_percent: ratio_percent(s.revenue, total_revenue, "total revenue is zero")
                    .unwrap_or(Decimal::ZERO),
                margin_percent: s.margin_percent(),
            })
            .collect();

        Self {
            total_revenue,
            total_quantity,
            total_profit,
            margin_percent: sales_profit_margin(total_profit, total_revenue),
            average_unit_revenue,
            products,
        }
    }
}

/// Headline figures on the orders list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderBook {
    pub total_orders: usize,
    pub total_value: Decimal,
    pub pending_orders: usize,
    pub overdue_payments: usize,
}

impl OrderBook {
    pub fn from_orders(orders: &[OrderRecord]) -> Self {
        Self {
            total_orders: orders.len(),
            total_value: orders.iter().map(|o| o.total).sum(),
            pending_orders: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
            overdue_payments: orders
                .iter()
                .filter(|o| o.payment_status == PaymentStatus::Overdue)
                .count(),
        }
    }
}
