//! Inventory models, stock-status classification and the movement ledger

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MetricsError, MetricsResult};
use crate::types::ratio_percent;

/// A stocked product variant in one warehouse
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    pub id: Uuid,
    pub product_name: String,
    pub variant: String,
    pub sku: String,
    pub warehouse: String,
    #[serde(default)]
    pub beginning_stock: i64,
    #[serde(default)]
    pub purchased_stock: i64,
    #[serde(default)]
    pub sales_stock: i64,
    /// Signed manual corrections
    #[serde(default)]
    pub adjustments: i64,
    /// Signed inter-warehouse transfers
    #[serde(default)]
    pub transfers: i64,
    pub closing_stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    pub unit_cost: Decimal,
    pub unit_price: Decimal,
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,
}

impl InventoryItem {
    /// "Groundnuts - TIRA"
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.product_name, self.variant)
    }

    pub fn status(&self) -> StockStatus {
        classify_stock_status(self.closing_stock, self.min_stock, self.max_stock)
    }

    pub fn fill_percentage(&self) -> MetricsResult<Decimal> {
        stock_fill_percentage(self.closing_stock, self.max_stock)
    }

    /// Closing stock valued at unit cost
    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.closing_stock) * self.unit_cost
    }

    /// Closing stock implied by the period counters
    pub fn expected_closing_stock(&self) -> MetricsResult<i64> {
        self.beginning_stock
            .checked_add(self.purchased_stock)
            .and_then(|n| n.checked_sub(self.sales_stock))
            .and_then(|n| n.checked_add(self.adjustments))
            .and_then(|n| n.checked_add(self.transfers))
            .ok_or(MetricsError::Overflow {
                context: "expected closing stock",
            })
    }

    pub fn is_reconciled(&self) -> bool {
        self.expected_closing_stock() == Ok(self.closing_stock)
    }

    /// Apply one ledger entry, returning the updated item.
    ///
    /// The receiver is left untouched so a rejected movement never leaves a
    /// half-applied item behind.
    pub fn apply_movement(&self, movement: &StockMovement) -> MetricsResult<InventoryItem> {
        if movement.item_id != self.id {
            return Err(MetricsError::MovementMismatch(format!(
                "movement {} targets item {}, not {}",
                movement.reference, movement.item_id, self.id
            )));
        }
        movement.validate_sign()?;

        let overflow = || MetricsError::Overflow {
            context: "stock counter",
        };
        let closing = self
            .closing_stock
            .checked_add(movement.quantity)
            .ok_or_else(overflow)?;
        if closing < 0 {
            return Err(MetricsError::InsufficientStock {
                requested: movement.quantity.checked_neg().ok_or_else(overflow)?,
                available: self.closing_stock,
            });
        }

        let mut next = self.clone();
        next.closing_stock = closing;
        let counter = match movement.kind {
            MovementKind::Purchase => &mut next.purchased_stock,
            MovementKind::Sale => &mut next.sales_stock,
            MovementKind::Adjustment => &mut next.adjustments,
            MovementKind::Transfer => &mut next.transfers,
        };
        // Sales are recorded as a positive count of units sold
        *counter = match movement.kind {
            MovementKind::Sale => counter.checked_sub(movement.quantity),
            _ => counter.checked_add(movement.quantity),
        }
        .ok_or_else(overflow)?;
        next.last_updated = Some(movement.date);
        Ok(next)
    }
}

/// Apply movements in ledger order
pub fn apply_movements<'a, I>(item: &InventoryItem, movements: I) -> MetricsResult<InventoryItem>
where
    I: IntoIterator<Item = &'a StockMovement>,
{
    movements
        .into_iter()
        .try_fold(item.clone(), |current, movement| current.apply_movement(movement))
}

/// Append-only stock ledger entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockMovement {
    pub id: Uuid,
    pub item_id: Uuid,
    pub kind: MovementKind,
    /// Signed delta applied to closing stock
    pub quantity: i64,
    pub date: NaiveDate,
    pub reference: String,
    pub warehouse: String,
}

impl StockMovement {
    /// Purchases add stock, sales remove it, the rest may go either way
    pub fn validate_sign(&self) -> MetricsResult<()> {
        let ok = match self.kind {
            MovementKind::Purchase => self.quantity > 0,
            MovementKind::Sale => self.quantity < 0,
            MovementKind::Adjustment | MovementKind::Transfer => self.quantity != 0,
        };
        if ok {
            Ok(())
        } else {
            Err(MetricsError::MovementMismatch(format!(
                "{} movement {} has invalid quantity {}",
                self.kind.as_str(),
                self.reference,
                self.quantity
            )))
        }
    }
}

/// Types of stock movements
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Purchase,
    Sale,
    Adjustment,
    Transfer,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Purchase => "purchase",
            MovementKind::Sale => "sale",
            MovementKind::Adjustment => "adjustment",
            MovementKind::Transfer => "transfer",
        }
    }
}

/// Stock level classification, re-evaluated on every read
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    Overstock,
    Normal,
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::OutOfStock => write!(f, "out-of-stock"),
            StockStatus::LowStock => write!(f, "low-stock"),
            StockStatus::Overstock => write!(f, "overstock"),
            StockStatus::Normal => write!(f, "normal"),
        }
    }
}

/// Classify a closing stock level against its thresholds.
///
/// Rules are checked in order: empty, at or below minimum, at or above
/// maximum, otherwise normal. An empty item is out of stock even when both
/// thresholds are zero.
pub fn classify_stock_status(closing_stock: i64, min_stock: i64, max_stock: i64) -> StockStatus {
    if closing_stock == 0 {
        StockStatus::OutOfStock
    } else if closing_stock <= min_stock {
        StockStatus::LowStock
    } else if closing_stock >= max_stock {
        StockStatus::Overstock
    } else {
        StockStatus::Normal
    }
}

/// Fill level for progress displays, clamped to `[0, 100]`
pub fn stock_fill_percentage(closing_stock: i64, max_stock: i64) -> MetricsResult<Decimal> {
    let percent = ratio_percent(
        Decimal::from(closing_stock),
        Decimal::from(max_stock),
        "max_stock is zero",
    )?;
    Ok(percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
}

/// Display variant of [`stock_fill_percentage`]: a zero maximum reads as 0%
pub fn stock_fill_percentage_or_zero(closing_stock: i64, max_stock: i64) -> Decimal {
    stock_fill_percentage(closing_stock, max_stock).unwrap_or(Decimal::ZERO)
}

/// Item flagged on the reorder panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockAlert {
    pub item_id: Uuid,
    pub display_name: String,
    pub status: StockStatus,
    pub closing_stock: i64,
    pub min_stock: i64,
}

/// Inventory dashboard figures
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventorySummary {
    pub item_count: usize,
    pub total_stock_value: Decimal,
    pub low_stock: Vec<Uuid>,
    pub out_of_stock: Vec<Uuid>,
    pub overstock: Vec<Uuid>,
    pub alerts: Vec<StockAlert>,
}

impl InventorySummary {
    pub fn from_items(items: &[InventoryItem]) -> Self {
        let mut summary = InventorySummary {
            item_count: items.len(),
            total_stock_value: Decimal::ZERO,
            low_stock: Vec::new(),
            out_of_stock: Vec::new(),
            overstock: Vec::new(),
            alerts: Vec::new(),
        };

        for item in items {
            summary.total_stock_value += item.stock_value();
            let status = item.status();
            match status {
                StockStatus::LowStock => summary.low_stock.push(item.id),
                StockStatus::OutOfStock => summary.out_of_stock.push(item.id),
                StockStatus::Overstock => summary.overstock.push(item.id),
                StockStatus::Normal => {}
            }
            if matches!(status, StockStatus::LowStock | StockStatus::OutOfStock) {
                summary.alerts.push(StockAlert {
                    item_id: item.id,
                    display_name: item.display_name(),
                    status,
                    closing_stock: item.closing_stock,
                    min_stock: item.min_stock,
                });
            }
        }

        summary
    }

    pub fn all_levels_normal(&self) -> bool {
        self.alerts.is_empty()
    }
}

/// Flat per-item row for report export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryReportRow {
    pub sku: String,
    pub product_name: String,
    pub variant: String,
    pub warehouse: String,
    pub closing_stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    pub status: StockStatus,
    pub fill_percentage: Decimal,
    pub stock_value: Decimal,
}

impl From<&InventoryItem> for InventoryReportRow {
    fn from(item: &InventoryItem) -> Self {
        Self {
            sku: item.sku.clone(),
            product_name: item.product_name.clone(),
            variant: item.variant.clone(),
            warehouse: item.warehouse.clone(),
            closing_stock: item.closing_stock,
            min_stock: item.min_stock,
            max_stock: item.max_stock,
            status: item.status(),
            fill_percentage: stock_fill_percentage_or_zero(item.closing_stock, item.max_stock),
            stock_value: item.stock_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(closing: i64, min: i64, max: i64) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            product_name: "Groundnuts".to_string(),
            variant: "TIRA".to_string(),
            sku: "GN-TIRA-001".to_string(),
            warehouse: "Kigali Main".to_string(),
            beginning_stock: closing,
            purchased_stock: 0,
            sales_stock: 0,
            adjustments: 0,
            transfers: 0,
            closing_stock: closing,
            min_stock: min,
            max_stock: max,
            unit_cost: Decimal::from(650),
            unit_price: Decimal::from(850),
            last_updated: None,
        }
    }

    fn movement(item_id: Uuid, kind: MovementKind, quantity: i64) -> StockMovement {
        StockMovement {
            id: Uuid::new_v4(),
            item_id,
            kind,
            quantity,
            date: NaiveDate::from_ymd_opt(2025, 9, 12).unwrap(),
            reference: "PO-2025-001".to_string(),
            warehouse: "Kigali Main".to_string(),
        }
    }

    #[test]
    fn test_out_of_stock_takes_precedence() {
        assert_eq!(classify_stock_status(0, 0, 0), StockStatus::OutOfStock);
        assert_eq!(classify_stock_status(0, 500, 2000), StockStatus::OutOfStock);
    }

    #[test]
    fn test_zero_min_means_normal_above_zero() {
        assert_eq!(classify_stock_status(1, 0, 10), StockStatus::Normal);
        assert_eq!(classify_stock_status(10, 0, 10), StockStatus::Overstock);
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(classify_stock_status(500, 500, 2000), StockStatus::LowStock);
        assert_eq!(classify_stock_status(501, 500, 2000), StockStatus::Normal);
        assert_eq!(classify_stock_status(2000, 500, 2000), StockStatus::Overstock);
    }

    #[test]
    fn test_fill_percentage_clamped() {
        assert_eq!(stock_fill_percentage(1250, 2000).unwrap(), Decimal::new(625, 1));
        assert_eq!(stock_fill_percentage(3000, 2000).unwrap(), Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_fill_percentage_zero_max() {
        assert!(matches!(
            stock_fill_percentage(10, 0),
            Err(MetricsError::DivisionByZero { .. })
        ));
        assert_eq!(stock_fill_percentage_or_zero(10, 0), Decimal::ZERO);
    }

    #[test]
    fn test_stock_value() {
        assert_eq!(item(1250, 500, 2000).stock_value(), Decimal::from(812_500));
    }

    #[test]
    fn test_apply_purchase_and_sale() {
        let base = item(100, 50, 500);
        let bought = base
            .apply_movement(&movement(base.id, MovementKind::Purchase, 40))
            .unwrap();
        assert_eq!(bought.closing_stock, 140);
        assert_eq!(bought.purchased_stock, 40);

        let sold = bought
            .apply_movement(&movement(base.id, MovementKind::Sale, -90))
            .unwrap();
        assert_eq!(sold.closing_stock, 50);
        assert_eq!(sold.sales_stock, 90);
        assert!(sold.is_reconciled());
    }

    #[test]
    fn test_apply_sale_beyond_stock_rejected() {
        let base = item(10, 5, 50);
        let err = base
            .apply_movement(&movement(base.id, MovementKind::Sale, -11))
            .unwrap_err();
        assert_eq!(
            err,
            MetricsError::InsufficientStock {
                requested: 11,
                available: 10
            }
        );
    }

    #[test]
    fn test_apply_movement_wrong_sign_or_item() {
        let base = item(10, 5, 50);
        assert!(base
            .apply_movement(&movement(base.id, MovementKind::Purchase, -1))
            .is_err());
        assert!(base
            .apply_movement(&movement(Uuid::new_v4(), MovementKind::Adjustment, 1))
            .is_err());
    }

    #[test]
    fn test_apply_movements_in_order() {
        let base = item(0, 5, 50);
        let ledger = vec![
            movement(base.id, MovementKind::Purchase, 30),
            movement(base.id, MovementKind::Transfer, -10),
            movement(base.id, MovementKind::Adjustment, -2),
        ];
        let result = apply_movements(&base, &ledger).unwrap();
        assert_eq!(result.closing_stock, 18);
        assert!(result.is_reconciled());
    }

    #[test]
    fn test_apply_movement_at_counter_limit() {
        let mut base = item(0, 5, 50);
        base.closing_stock = i64::MAX;
        let err = base
            .apply_movement(&movement(base.id, MovementKind::Purchase, 1))
            .unwrap_err();
        assert_eq!(err.code(), "ARITHMETIC_OVERFLOW");
        assert_eq!(base.closing_stock, i64::MAX);

        let mut drained = item(0, 5, 50);
        drained.sales_stock = i64::MAX;
        drained.closing_stock = 10;
        assert!(drained
            .apply_movement(&movement(drained.id, MovementKind::Sale, -1))
            .is_err());
    }

    #[test]
    fn test_expected_closing_stock_overflow() {
        let mut base = item(10, 5, 50);
        base.purchased_stock = i64::MAX;
        assert!(base.expected_closing_stock().is_err());
        assert!(!base.is_reconciled());
    }

    #[test]
    fn test_summary_partitions_items() {
        let items = vec![item(1250, 500, 2000), item(180, 500, 1500), item(0, 300, 900)];
        let summary = InventorySummary::from_items(&items);

        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.low_stock, vec![items[1].id]);
        assert_eq!(summary.out_of_stock, vec![items[2].id]);
        assert!(summary.overstock.is_empty());
        assert_eq!(summary.alerts.len(), 2);
        assert_eq!(summary.alerts[0].status, StockStatus::LowStock);
        assert!(!summary.all_levels_normal());
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&StockStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"out-of-stock\"");
    }
}
