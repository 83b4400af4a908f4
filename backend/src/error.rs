//! Error handling for the InventoryPro metrics server
//!
//! Every failure leaves the server as `{"error": {"code", "message", "field"}}`
//! with a status that tells the client whether to fix its input.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::MetricsError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Domain errors
    #[error(transparent)]
    Metrics(#[from] MetricsError),

    // Request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    // Export errors
    #[error("Export error: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Metrics(err) => match err {
                MetricsError::InvalidRange { .. }
                | MetricsError::NegativeQuantity { .. }
                | MetricsError::UnknownCategory { .. }
                | MetricsError::DuplicateLineItem(_) => StatusCode::BAD_REQUEST,
                MetricsError::LineItemNotFound(_) => StatusCode::NOT_FOUND,
                MetricsError::DivisionByZero { .. }
                | MetricsError::InvalidStatusTransition { .. }
                | MetricsError::InsufficientStock { .. }
                | MetricsError::SameWarehouseTransfer(_)
                | MetricsError::MovementMismatch(_)
                | MetricsError::Overflow { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Export(_) | AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> ErrorDetail {
        match self {
            AppError::Metrics(err) => ErrorDetail {
                code: err.code().to_string(),
                message: err.to_string(),
                field: err.field().map(str::to_string),
            },
            AppError::BadRequest(msg) => ErrorDetail {
                code: "BAD_REQUEST".to_string(),
                message: msg.clone(),
                field: None,
            },
            AppError::Export(_) => ErrorDetail {
                code: "EXPORT_ERROR".to_string(),
                message: "Report export failed".to_string(),
                field: None,
            },
            AppError::Configuration(msg) => ErrorDetail {
                code: "CONFIGURATION_ERROR".to_string(),
                message: format!("Configuration error: {}", msg),
                field: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Client mistakes are warnings, everything else is ours
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        (status, Json(ErrorResponse { error: self.detail() })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
