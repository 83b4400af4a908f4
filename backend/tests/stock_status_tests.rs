//! Stock status tests
//!
//! Tests for stock classification including:
//! - Property 1: Empty stock is always out of stock
//! - Property 2: Low, overstock and normal partition non-zero stock
//! - Property 3: Fill percentage is monotonic and clamped

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    classify_stock_status, stock_fill_percentage, InventoryItem, InventorySummary, MetricsError,
    MovementKind, StockMovement, StockStatus,
};
use std::str::FromStr;
use uuid::Uuid;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn item(closing: i64, min: i64, max: i64) -> InventoryItem {
    InventoryItem {
        id: Uuid::new_v4(),
        product_name: "Groundnuts".to_string(),
        variant: "TIRA".to_string(),
        sku: "GN-TIRA-001".to_string(),
        warehouse: "Main Warehouse".to_string(),
        beginning_stock: closing,
        purchased_stock: 0,
        sales_stock: 0,
        adjustments: 0,
        transfers: 0,
        closing_stock: closing,
        min_stock: min,
        max_stock: max,
        unit_cost: dec("650"),
        unit_price: dec("850"),
        last_updated: None,
    }
}

fn movement(item: &InventoryItem, kind: MovementKind, quantity: i64) -> StockMovement {
    StockMovement {
        id: Uuid::new_v4(),
        item_id: item.id,
        kind,
        quantity,
        date: chrono::NaiveDate::from_ymd_opt(2025, 9, 12).unwrap(),
        reference: "MOV-001".to_string(),
        warehouse: item.warehouse.clone(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Dashboard scenario from the inventory screen
    #[test]
    fn test_scenario_statuses() {
        let items = [item(1250, 500, 2000), item(180, 500, 1500), item(0, 300, 900)];
        let statuses: Vec<StockStatus> = items.iter().map(InventoryItem::status).collect();
        assert_eq!(
            statuses,
            vec![StockStatus::Normal, StockStatus::LowStock, StockStatus::OutOfStock]
        );
    }

    /// All thresholds zero reads as out of stock
    #[test]
    fn test_all_zero_is_out_of_stock() {
        assert_eq!(classify_stock_status(0, 0, 0), StockStatus::OutOfStock);
    }

    /// Boundaries: at min is low, at max is overstock
    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(classify_stock_status(500, 500, 1500), StockStatus::LowStock);
        assert_eq!(classify_stock_status(501, 500, 1500), StockStatus::Normal);
        assert_eq!(classify_stock_status(1500, 500, 1500), StockStatus::Overstock);
    }

    /// Fill percentage on a zero maximum is an error
    #[test]
    fn test_fill_zero_max() {
        assert!(matches!(
            stock_fill_percentage(10, 0),
            Err(MetricsError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_fill_percentage_values() {
        assert_eq!(stock_fill_percentage(1250, 2000).unwrap(), dec("62.5"));
        assert_eq!(stock_fill_percentage(2500, 2000).unwrap(), dec("100"));
    }

    /// Summary buckets and alert panel
    #[test]
    fn test_summary_buckets() {
        let items = vec![item(1250, 500, 2000), item(180, 500, 1500), item(0, 300, 900), item(2100, 500, 2000)];
        let summary = InventorySummary::from_items(&items);

        assert_eq!(summary.item_count, 4);
        assert_eq!(summary.low_stock, vec![items[1].id]);
        assert_eq!(summary.out_of_stock, vec![items[2].id]);
        assert_eq!(summary.overstock, vec![items[3].id]);
        assert_eq!(summary.alerts.len(), 2);
        // (1250 + 180 + 0 + 2100) * 650
        assert_eq!(summary.total_stock_value, dec("2294500"));
        assert!(!summary.all_levels_normal());
    }

    /// A sale moves stock down and keeps the ledger reconciled
    #[test]
    fn test_sale_movement() {
        let start = item(180, 500, 1500);
        let sold = start.apply_movement(&movement(&start, MovementKind::Sale, -180)).unwrap();

        assert_eq!(sold.closing_stock, 0);
        assert_eq!(sold.sales_stock, 180);
        assert_eq!(sold.status(), StockStatus::OutOfStock);
        assert!(sold.is_reconciled());
    }

    /// Overselling is refused and the item is left untouched
    #[test]
    fn test_oversell_rejected() {
        let start = item(100, 50, 500);
        let result = start.apply_movement(&movement(&start, MovementKind::Sale, -101));
        assert!(matches!(
            result,
            Err(MetricsError::InsufficientStock { requested: 101, available: 100 })
        ));
        assert_eq!(start.closing_stock, 100);
    }

    /// Movement signs follow their kind
    #[test]
    fn test_movement_sign_rules() {
        let start = item(100, 50, 500);
        assert!(start.apply_movement(&movement(&start, MovementKind::Purchase, -5)).is_err());
        assert!(start.apply_movement(&movement(&start, MovementKind::Sale, 5)).is_err());
        assert!(start.apply_movement(&movement(&start, MovementKind::Adjustment, 0)).is_err());
        assert!(start.apply_movement(&movement(&start, MovementKind::Adjustment, -3)).is_ok());
    }

    /// Movements for another item are refused
    #[test]
    fn test_movement_for_other_item() {
        let a = item(100, 50, 500);
        let b = item(100, 50, 500);
        assert!(matches!(
            a.apply_movement(&movement(&b, MovementKind::Purchase, 10)),
            Err(MetricsError::MovementMismatch(_))
        ));
    }

    /// Ledger order is preserved and the result reconciles
    #[test]
    fn test_apply_movements_in_order() {
        let start = item(100, 50, 500);
        let ledger = vec![
            movement(&start, MovementKind::Purchase, 400),
            movement(&start, MovementKind::Sale, -250),
            movement(&start, MovementKind::Transfer, -50),
            movement(&start, MovementKind::Adjustment, -5),
        ];
        let end = shared::apply_movements(&start, &ledger).unwrap();
        assert_eq!(end.closing_stock, 195);
        assert_eq!(end.transfers, -50);
        assert!(end.is_reconciled());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        /// Property 1: Empty stock is out of stock whatever the thresholds
        #[test]
        fn prop_zero_stock_out_of_stock(min in 0i64..10_000, max in 0i64..10_000) {
            prop_assert_eq!(classify_stock_status(0, min, max), StockStatus::OutOfStock);
        }

        /// Property 2: Exactly one of low, overstock, normal for non-zero stock
        #[test]
        fn prop_non_zero_partition(
            stock in 1i64..20_000,
            min in 0i64..10_000,
            span in 0i64..10_000,
        ) {
            let max = min + span;
            let status = classify_stock_status(stock, min, max);
            let low = stock <= min;
            let over = !low && stock >= max;
            let expected = if low {
                StockStatus::LowStock
            } else if over {
                StockStatus::Overstock
            } else {
                StockStatus::Normal
            };
            prop_assert_eq!(status, expected);
            prop_assert_ne!(status, StockStatus::OutOfStock);
        }

        /// Property 3: Fill percentage is monotonic in stock and stays in [0, 100]
        #[test]
        fn prop_fill_monotonic_and_clamped(
            stock in 0i64..50_000,
            extra in 0i64..50_000,
            max in 1i64..20_000,
        ) {
            let lower = stock_fill_percentage(stock, max).unwrap();
            let higher = stock_fill_percentage(stock + extra, max).unwrap();
            prop_assert!(lower <= higher);
            prop_assert!(lower >= Decimal::ZERO && higher <= Decimal::ONE_HUNDRED);
        }

        /// Purchases followed by sales reconcile
        #[test]
        fn prop_ledger_reconciles(purchases in prop::collection::vec(1i64..500, 0..10)) {
            let start = item(0, 0, 10_000);
            let mut ledger: Vec<StockMovement> = purchases
                .iter()
                .map(|q| movement(&start, MovementKind::Purchase, *q))
                .collect();
            let total: i64 = purchases.iter().sum();
            if total > 0 {
                ledger.push(movement(&start, MovementKind::Sale, -total));
            }
            let end = shared::apply_movements(&start, &ledger).unwrap();
            prop_assert_eq!(end.closing_stock, 0);
            prop_assert!(end.is_reconciled());
        }
    }
}
