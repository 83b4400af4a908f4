//! HTTP handlers for warehouse transfers

use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{StockMovement, StockTransfer};

use crate::error::AppResult;

#[derive(Debug, Deserialize)]
pub struct ValidateTransferRequest {
    pub transfer: StockTransfer,
    pub date: NaiveDate,
    pub reference: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateTransferResponse {
    pub total_units: i64,
    /// Outbound ledger entries for the source warehouse
    pub movements: Vec<StockMovement>,
}

/// Check a transfer and return the movements it would post
pub async fn validate_transfer(
    Json(input): Json<ValidateTransferRequest>,
) -> AppResult<Json<ValidateTransferResponse>> {
    let movements = input
        .transfer
        .outbound_movements(input.date, &input.reference)?;

    tracing::debug!(
        from = %input.transfer.from_warehouse,
        to = %input.transfer.to_warehouse,
        lines = movements.len(),
        "Validated transfer"
    );
    Ok(Json(ValidateTransferResponse {
        total_units: input.transfer.total_units(),
        movements,
    }))
}
