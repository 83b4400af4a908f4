//! Customers and suppliers

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: CustomerStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Active,
    Premium,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub status: SupplierStatus,
    /// 0 to 5 stars
    pub rating: Decimal,
    pub total_value: Decimal,
    #[serde(default)]
    pub last_order_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SupplierStatus {
    Active,
    Inactive,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplierStats {
    pub total_suppliers: usize,
    pub active_suppliers: usize,
    /// Whole percent of suppliers that are active
    pub activation_rate: Decimal,
    pub total_value: Decimal,
    pub average_rating: Decimal,
}

impl SupplierStats {
    pub fn from_suppliers(suppliers: &[Supplier]) -> Self {
        let total = suppliers.len();
        let active = suppliers
            .iter()
            .filter(|s| s.status == SupplierStatus::Active)
            .count();

        let (activation_rate, average_rating) = if total == 0 {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            let count = Decimal::from(total as u64);
            let rate = Decimal::from(active as u64) / count * Decimal::ONE_HUNDRED;
            let rating_sum: Decimal = suppliers.iter().map(|s| s.rating).sum();
            (
                rate.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
                rating_sum / count,
            )
        };

        Self {
            total_suppliers: total,
            active_suppliers: active,
            activation_rate,
            total_value: suppliers.iter().map(|s| s.total_value).sum(),
            average_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplier(status: SupplierStatus, rating: i64) -> Supplier {
        Supplier {
            id: Uuid::new_v4(),
            name: "Muhanga Farmers Cooperative".to_string(),
            contact_person: "Jean Habimana".to_string(),
            email: "coop@muhanga.rw".to_string(),
            phone: "+250788000000".to_string(),
            country: "Rwanda".to_string(),
            status,
            rating: Decimal::from(rating),
            total_value: Decimal::from(100_000),
            last_order_date: None,
        }
    }

    #[test]
    fn test_supplier_stats() {
        let stats = SupplierStats::from_suppliers(&[
            supplier(SupplierStatus::Active, 5),
            supplier(SupplierStatus::Active, 4),
            supplier(SupplierStatus::Pending, 3),
        ]);
        assert_eq!(stats.active_suppliers, 2);
        assert_eq!(stats.activation_rate, Decimal::from(67));
        assert_eq!(stats.average_rating, Decimal::from(4));
        assert_eq!(stats.total_value, Decimal::from(300_000));
    }

    #[test]
    fn test_empty_supplier_stats() {
        let stats = SupplierStats::from_suppliers(&[]);
        assert_eq!(stats.activation_rate, Decimal::ZERO);
        assert_eq!(stats.average_rating, Decimal::ZERO);
    }
}
