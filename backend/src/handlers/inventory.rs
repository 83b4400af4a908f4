//! HTTP handlers for stock status, inventory summary and stock movements

use axum::{
    extract::Query,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    validate_all, validate_inventory_item, validate_stock_movement, InventoryItem,
    InventorySummary, MetricsError, RejectedRecord, StockMovement, StockStatus,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::{csv_attachment, screen, BatchQuery, ExportFormat, OnInvalid, ReportingService};

#[derive(Debug, Serialize)]
pub struct ItemStatus {
    pub id: Uuid,
    pub sku: String,
    pub display_name: String,
    pub status: StockStatus,
    /// Zero when the item has no maximum
    pub fill_percentage: Decimal,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub items: Vec<ItemStatus>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: InventorySummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ApplyMovementsRequest {
    pub items: Vec<InventoryItem>,
    pub movements: Vec<StockMovement>,
}

#[derive(Debug, Serialize)]
pub struct ApplyMovementsResponse {
    pub items: Vec<InventoryItem>,
    pub applied: usize,
    /// Indexes refer to the movements array
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedRecord>,
}

/// Classify every item
pub async fn classify_items(
    Query(query): Query<BatchQuery>,
    Json(items): Json<Vec<InventoryItem>>,
) -> AppResult<Json<StatusResponse>> {
    let (items, rejected) = screen(items, query.on_invalid, validate_inventory_item)?;

    let items: Vec<ItemStatus> = items
        .iter()
        .map(|item| ItemStatus {
            id: item.id,
            sku: item.sku.clone(),
            display_name: item.display_name(),
            status: item.status(),
            fill_percentage: shared::stock_fill_percentage_or_zero(item.closing_stock, item.max_stock),
        })
        .collect();

    tracing::debug!(count = items.len(), "Classified inventory items");
    Ok(Json(StatusResponse { items, rejected }))
}

/// Dashboard summary, or the per-item report with `?format=csv`
pub async fn summarize_inventory(
    Query(query): Query<BatchQuery>,
    Json(items): Json<Vec<InventoryItem>>,
) -> AppResult<Response> {
    let format = query.export_format()?;
    let (items, rejected) = screen(items, query.on_invalid, validate_inventory_item)?;

    if format == ExportFormat::Csv {
        let csv = ReportingService::export_to_csv(&ReportingService::inventory_rows(&items))?;
        return Ok(csv_attachment("inventory_report.csv", csv, rejected.len()));
    }

    let summary = InventorySummary::from_items(&items);
    tracing::debug!(
        items = summary.item_count,
        alerts = summary.alerts.len(),
        "Summarized inventory"
    );
    Ok(Json(SummaryResponse { summary, rejected }).into_response())
}

/// Apply movements to their items in submission order.
///
/// `?on_invalid` governs the movements only. Items are the ledger the
/// movements post against, so any invalid item fails the request.
pub async fn apply_movements(
    Query(query): Query<BatchQuery>,
    Json(input): Json<ApplyMovementsRequest>,
) -> AppResult<Json<ApplyMovementsResponse>> {
    validate_all(&input.items, validate_inventory_item)?;
    let mut items = input.items;
    let mut applied = 0;
    let mut rejected = Vec::new();

    for (index, movement) in input.movements.iter().enumerate() {
        match validate_stock_movement(movement).and_then(|()| apply_one(&mut items, movement)) {
            Ok(()) => applied += 1,
            Err(err) if query.on_invalid == OnInvalid::Skip => {
                tracing::warn!(index, code = err.code(), "Skipping movement: {}", err);
                rejected.push(RejectedRecord::new(index, &err));
            }
            Err(err) => return Err(err.into()),
        }
    }

    tracing::debug!(applied, skipped = rejected.len(), "Applied stock movements");
    Ok(Json(ApplyMovementsResponse {
        items,
        applied,
        rejected,
    }))
}

fn apply_one(items: &mut [InventoryItem], movement: &StockMovement) -> Result<(), MetricsError> {
    let item = items
        .iter_mut()
        .find(|item| item.id == movement.item_id)
        .ok_or_else(|| MetricsError::MovementMismatch(format!("no item {} in request", movement.item_id)))?;
    *item = item.apply_movement(movement)?;
    Ok(())
}
