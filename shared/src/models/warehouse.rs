//! Warehouses, utilization and stock transfers between them

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{MovementKind, StockMovement};
use crate::error::{MetricsError, MetricsResult};
use crate::types::ratio_percent;
use crate::validation::MAX_QUANTITY;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Warehouse {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub manager: String,
    pub total_items: i64,
    pub capacity: i64,
    pub total_value: Decimal,
    pub status: WarehouseStatus,
}

impl Warehouse {
    pub fn utilization(&self) -> MetricsResult<Decimal> {
        warehouse_utilization(self.total_items, self.capacity)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WarehouseStatus {
    Active,
    Inactive,
    Maintenance,
}

/// Whole-percent utilization, rounded half away from zero
pub fn warehouse_utilization(total_items: i64, capacity: i64) -> MetricsResult<Decimal> {
    let percent = ratio_percent(
        Decimal::from(total_items),
        Decimal::from(capacity),
        "capacity is zero",
    )?;
    Ok(percent.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

/// Figures across the whole warehouse network
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkStats {
    pub warehouse_count: usize,
    pub active_count: usize,
    pub total_capacity: i64,
    pub total_items: i64,
    pub total_value: Decimal,
    /// Zero when the network has no capacity
    pub utilization_percent: Decimal,
}

impl NetworkStats {
    pub fn from_warehouses(warehouses: &[Warehouse]) -> Self {
        let total_capacity: i64 = warehouses.iter().map(|w| w.capacity).sum();
        let total_items: i64 = warehouses.iter().map(|w| w.total_items).sum();
        Self {
            warehouse_count: warehouses.len(),
            active_count: warehouses
                .iter()
                .filter(|w| w.status == WarehouseStatus::Active)
                .count(),
            total_capacity,
            total_items,
            total_value: warehouses.iter().map(|w| w.total_value).sum(),
            utilization_percent: warehouse_utilization(total_items, total_capacity)
                .unwrap_or(Decimal::ZERO),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferLine {
    pub item_id: Uuid,
    pub product: String,
    pub available_stock: i64,
    pub quantity: i64,
}

/// Stock moving from one warehouse to another
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockTransfer {
    pub from_warehouse: String,
    pub to_warehouse: String,
    #[serde(default)]
    pub lines: Vec<TransferLine>,
}

impl StockTransfer {
    pub fn new(from_warehouse: impl Into<String>, to_warehouse: impl Into<String>) -> MetricsResult<Self> {
        let transfer = Self {
            from_warehouse: from_warehouse.into(),
            to_warehouse: to_warehouse.into(),
            lines: Vec::new(),
        };
        transfer.check_route()?;
        Ok(transfer)
    }

    /// Add a product at quantity 1
    pub fn add_line(&mut self, item_id: Uuid, product: impl Into<String>, available_stock: i64) -> MetricsResult<()> {
        if self.lines.iter().any(|l| l.item_id == item_id) {
            return Err(MetricsError::DuplicateLineItem(item_id));
        }
        self.lines.push(TransferLine {
            item_id,
            product: product.into(),
            available_stock,
            quantity: 1,
        });
        Ok(())
    }

    /// Quantities below 1 are raised to 1
    pub fn update_quantity(&mut self, item_id: Uuid, quantity: i64) -> MetricsResult<()> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.item_id == item_id)
            .ok_or(MetricsError::LineItemNotFound(item_id))?;
        line.quantity = quantity.max(1);
        Ok(())
    }

    pub fn remove_line(&mut self, item_id: Uuid) -> MetricsResult<TransferLine> {
        let index = self
            .lines
            .iter()
            .position(|l| l.item_id == item_id)
            .ok_or(MetricsError::LineItemNotFound(item_id))?;
        Ok(self.lines.remove(index))
    }

    pub fn total_units(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Full check before submission
    pub fn validate(&self) -> MetricsResult<()> {
        self.check_route()?;
        for (i, line) in self.lines.iter().enumerate() {
            if line.quantity < 1 {
                return Err(MetricsError::negative("quantity", line.quantity));
            }
            if line.quantity > MAX_QUANTITY {
                return Err(MetricsError::InvalidRange {
                    field: "quantity",
                    message: format!("{} exceeds {} units", line.quantity, MAX_QUANTITY),
                });
            }
            if line.quantity > line.available_stock {
                return Err(MetricsError::InsufficientStock {
                    requested: line.quantity,
                    available: line.available_stock,
                });
            }
            if self.lines[..i].iter().any(|l| l.item_id == line.item_id) {
                return Err(MetricsError::DuplicateLineItem(line.item_id));
            }
        }
        Ok(())
    }

    /// Ledger entries drawing each line out of the source warehouse
    pub fn outbound_movements(&self, date: NaiveDate, reference: &str) -> MetricsResult<Vec<StockMovement>> {
        self.validate()?;
        Ok(self
            .lines
            .iter()
            .map(|line| StockMovement {
                id: Uuid::new_v4(),
                item_id: line.item_id,
                kind: MovementKind::Transfer,
                quantity: -line.quantity,
                date,
                reference: reference.to_string(),
                warehouse: self.from_warehouse.clone(),
            })
            .collect())
    }

    fn check_route(&self) -> MetricsResult<()> {
        if self.from_warehouse == self.to_warehouse {
            return Err(MetricsError::SameWarehouseTransfer(self.from_warehouse.clone()));
        }
        Ok(())
    }
}
