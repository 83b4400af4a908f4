//! HTTP handlers for cashflow summaries, category breakdowns and search

use axum::{
    extract::Query,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{
    apply_filter, validate_cash_transaction, validate_channel_balances, CashTransaction,
    CashflowSummary, CategoryTotal, ChannelBalances, DateRange, RejectedRecord, TransactionFilter,
};

use crate::error::AppResult;
use crate::services::{csv_attachment, screen, BatchQuery, ExportFormat, ReportingService};

#[derive(Debug, Deserialize)]
pub struct CashflowSummaryRequest {
    pub transactions: Vec<CashTransaction>,
    /// Channel balances before the window; the summary reports window net only without them
    #[serde(default)]
    pub opening_balances: Option<ChannelBalances>,
    /// Restrict the summary to transactions dated inside this range
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

#[derive(Debug, Serialize)]
pub struct CashflowSummaryResponse {
    pub summary: CashflowSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Debug, Serialize)]
pub struct CategoryBreakdown {
    pub inflow: Vec<CategoryTotal>,
    pub outflow: Vec<CategoryTotal>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub filter: TransactionFilter,
    pub transactions: Vec<CashTransaction>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub total: usize,
    pub transactions: Vec<CashTransaction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedRecord>,
}

/// Totals, trend and channel balances
pub async fn summarize_cashflow(
    Query(query): Query<BatchQuery>,
    Json(input): Json<CashflowSummaryRequest>,
) -> AppResult<Json<CashflowSummaryResponse>> {
    if let Some(opening) = &input.opening_balances {
        validate_channel_balances(opening)?;
    }
    let (mut transactions, rejected) = screen(input.transactions, query.on_invalid, validate_cash_transaction)?;
    if let Some(range) = input.date_range {
        let range = DateRange::new(range.start, range.end)?;
        transactions.retain(|t| range.contains(t.date));
    }

    let mut summary = CashflowSummary::from_transactions(&transactions);
    if let Some(opening) = input.opening_balances {
        summary = summary.with_opening_balances(opening);
    }

    tracing::debug!(
        transactions = summary.transaction_count,
        net = %summary.net_cashflow,
        "Summarized cashflow"
    );
    Ok(Json(CashflowSummaryResponse { summary, rejected }))
}

/// Per-category totals, or a flat export with `?format=csv`
pub async fn category_breakdown(
    Query(query): Query<BatchQuery>,
    Json(transactions): Json<Vec<CashTransaction>>,
) -> AppResult<Response> {
    let format = query.export_format()?;
    let (transactions, rejected) = screen(transactions, query.on_invalid, validate_cash_transaction)?;
    let summary = CashflowSummary::from_transactions(&transactions);

    if format == ExportFormat::Csv {
        let csv = ReportingService::export_to_csv(&ReportingService::category_rows(&summary))?;
        return Ok(csv_attachment("cashflow_categories.csv", csv, rejected.len()));
    }

    Ok(Json(CategoryBreakdown {
        inflow: summary.inflow_by_category,
        outflow: summary.outflow_by_category,
        rejected,
    })
    .into_response())
}

/// Transactions matching a text query and categorical filters
pub async fn search_transactions(
    Query(query): Query<BatchQuery>,
    Json(input): Json<SearchRequest>,
) -> AppResult<Json<SearchResponse>> {
    if let Some(range) = input.filter.date_range {
        DateRange::new(range.start, range.end)?;
    }
    let (transactions, rejected) = screen(input.transactions, query.on_invalid, validate_cash_transaction)?;
    let matches: Vec<CashTransaction> = apply_filter(&transactions, &input.filter)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(matched = matches.len(), of = transactions.len(), "Searched transactions");
    Ok(Json(SearchResponse {
        total: matches.len(),
        transactions: matches,
        rejected,
    }))
}
