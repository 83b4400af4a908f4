//! Sales and margin tests
//!
//! Tests for profit figures including:
//! - Property 12: Unit margin never exceeds 100%
//! - Property 13: Product shares sum to 100%

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    inventory_valuation, sales_profit_margin, unit_profit_margin, MetricsError, NetworkStats,
    OrderBook, OrderRecord, OrderStatus, PaymentStatus, ProductSales, SalesSummary, Warehouse,
    WarehouseStatus,
};
use std::str::FromStr;
use uuid::Uuid;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn sales(variant: &str, quantity: i64, revenue: &str, profit: &str) -> ProductSales {
    ProductSales {
        product: "Groundnuts".to_string(),
        variant: variant.to_string(),
        quantity,
        revenue: dec(revenue),
        profit: dec(profit),
    }
}

fn order(total: &str, status: OrderStatus, payment_status: PaymentStatus) -> OrderRecord {
    OrderRecord {
        id: Uuid::new_v4(),
        order_number: "ORD-2025-001".to_string(),
        customer: "Acme Trading Ltd".to_string(),
        customer_email: "orders@acmetrading.com".to_string(),
        items: 2,
        quantity: 150,
        total: dec(total),
        status,
        payment_status,
        order_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Unit margin from price and cost
    #[test]
    fn test_unit_margin() {
        assert_eq!(unit_profit_margin(dec("1000"), dec("750")).unwrap(), dec("25"));
        assert_eq!(unit_profit_margin(dec("1000"), dec("1250")).unwrap(), dec("-25"));
    }

    /// Zero price has no defined margin
    #[test]
    fn test_unit_margin_zero_price() {
        assert!(matches!(
            unit_profit_margin(Decimal::ZERO, dec("100")),
            Err(MetricsError::DivisionByZero { .. })
        ));
    }

    /// Realised margin reads as zero without revenue
    #[test]
    fn test_sales_margin() {
        assert_eq!(sales_profit_margin(dec("68000"), dec("272000")), dec("25"));
        assert_eq!(sales_profit_margin(dec("5"), Decimal::ZERO), Decimal::ZERO);
    }

    /// Summary over the product performance table
    #[test]
    fn test_sales_summary() {
        let summary = SalesSummary::from_sales(&[
            sales("TIRA", 340, "272000", "68000"),
            sales("WHITE", 160, "128000", "32000"),
        ]);
        assert_eq!(summary.total_revenue, dec("400000"));
        assert_eq!(summary.total_profit, dec("100000"));
        assert_eq!(summary.margin_percent, dec("25"));
        assert_eq!(summary.average_unit_revenue, dec("800"));
        assert_eq!(summary.products[0].share_percent, dec("68"));
        assert_eq!(summary.products[1].share_percent, dec("32"));
    }

    /// Order book headline counts
    #[test]
    fn test_order_book() {
        let book = OrderBook::from_orders(&[
            order("526500", OrderStatus::Pending, PaymentStatus::Pending),
            order("120000", OrderStatus::Delivered, PaymentStatus::Overdue),
            order("80000", OrderStatus::Shipped, PaymentStatus::Paid),
        ]);
        assert_eq!(book.total_orders, 3);
        assert_eq!(book.total_value, dec("726500"));
        assert_eq!(book.pending_orders, 1);
        assert_eq!(book.overdue_payments, 1);
    }

    /// Empty inputs give zeroed figures
    #[test]
    fn test_empty_inputs() {
        assert_eq!(OrderBook::from_orders(&[]).total_value, Decimal::ZERO);
        assert_eq!(inventory_valuation(&[]), Decimal::ZERO);
    }

    /// Network utilization across warehouses
    #[test]
    fn test_network_stats() {
        let warehouse = |items: i64, capacity: i64| Warehouse {
            id: Uuid::new_v4(),
            name: "Main Warehouse".to_string(),
            location: "Kigali".to_string(),
            manager: "Eric Niyonzima".to_string(),
            total_items: items,
            capacity,
            total_value: dec("1000000"),
            status: WarehouseStatus::Active,
        };
        let stats = NetworkStats::from_warehouses(&[warehouse(3_000, 5_000), warehouse(1_000, 5_000)]);
        assert_eq!(stats.utilization_percent, dec("40"));
        assert_eq!(stats.total_value, dec("2000000"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        /// Property 12: Margin is at most 100% for non-negative cost
        #[test]
        fn prop_unit_margin_upper_bound(price in 1u32..1_000_000, cost in 0u32..1_000_000) {
            let margin = unit_profit_margin(Decimal::from(price), Decimal::from(cost)).unwrap();
            prop_assert!(margin <= Decimal::ONE_HUNDRED);
            prop_assert_eq!(margin >= Decimal::ZERO, cost <= price);
        }

        /// Property 13: Shares of positive revenue add up to 100%
        #[test]
        fn prop_shares_sum_to_hundred(revenues in prop::collection::vec(1u32..1_000_000, 1..10)) {
            let data: Vec<ProductSales> = revenues
                .iter()
                .map(|r| ProductSales {
                    product: "Product".to_string(),
                    variant: "A".to_string(),
                    quantity: 1,
                    revenue: Decimal::from(*r),
                    profit: Decimal::ZERO,
                })
                .collect();
            let summary = SalesSummary::from_sales(&data);
            let total: Decimal = summary.products.iter().map(|p| p.share_percent).sum();
            prop_assert!((total - Decimal::ONE_HUNDRED).abs() < dec("0.0001"));
        }
    }
}
