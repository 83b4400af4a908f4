//! Flat report rows and CSV export

use axum::{
    http::{header, HeaderName},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{CashDirection, CashflowSummary, InventoryItem, InventoryReportRow};

use crate::error::{AppError, AppResult};

/// Count of records dropped under `?on_invalid=skip`, set on CSV exports
pub const REJECTED_COUNT_HEADER: HeaderName = HeaderName::from_static("x-rejected-count");

/// CSV download response; the body has no room for rejections, so their count
/// travels in [`REJECTED_COUNT_HEADER`]
pub fn csv_attachment(filename: &str, csv: String, rejected: usize) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
            (REJECTED_COUNT_HEADER, rejected.to_string()),
        ],
        csv,
    )
        .into_response()
}

/// One category line of the cashflow breakdown export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryReportRow {
    pub direction: CashDirection,
    pub category: String,
    pub amount: Decimal,
}

pub struct ReportingService;

impl ReportingService {
    pub fn inventory_rows(items: &[InventoryItem]) -> Vec<InventoryReportRow> {
        items.iter().map(InventoryReportRow::from).collect()
    }

    /// Inflow categories first, then outflow, each in first-seen order
    pub fn category_rows(summary: &CashflowSummary) -> Vec<CategoryReportRow> {
        let inflow = summary.inflow_by_category.iter().map(|c| CategoryReportRow {
            direction: CashDirection::Inflow,
            category: c.category.clone(),
            amount: c.amount,
        });
        let outflow = summary.outflow_by_category.iter().map(|c| CategoryReportRow {
            direction: CashDirection::Outflow,
            category: c.category.clone(),
            amount: c.amount,
        });
        inflow.chain(outflow).collect()
    }

    /// Export data to CSV format
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Export(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Export(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| AppError::Export(format!("UTF-8 conversion error: {}", e)))
    }
}
