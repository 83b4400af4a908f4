//! Error taxonomy for the derived metrics engine

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while validating records or computing derived values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    /// A bounded value or a pair of thresholds is out of order
    #[error("Invalid range for {field}: {message}")]
    InvalidRange { field: &'static str, message: String },

    /// A ratio was requested with a zero denominator
    #[error("Division by zero: {context}")]
    DivisionByZero { context: &'static str },

    /// A field that must be non-negative was observed as negative
    #[error("Negative value for {field}: {value}")]
    NegativeQuantity { field: &'static str, value: Decimal },

    #[error("Category '{category}' is not valid for {direction} transactions")]
    UnknownCategory { category: String, direction: String },

    #[error("Cannot move transaction from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Product {0} is already on this order")]
    DuplicateLineItem(Uuid),

    #[error("Line item for product {0} not found")]
    LineItemNotFound(Uuid),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i64, available: i64 },

    #[error("Source and destination warehouse are the same: {0}")]
    SameWarehouseTransfer(String),

    #[error("Movement does not apply: {0}")]
    MovementMismatch(String),

    /// A derived figure does not fit its numeric type
    #[error("Arithmetic overflow: {context}")]
    Overflow { context: &'static str },
}

impl MetricsError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            MetricsError::InvalidRange { .. } => "INVALID_RANGE",
            MetricsError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            MetricsError::NegativeQuantity { .. } => "NEGATIVE_QUANTITY",
            MetricsError::UnknownCategory { .. } => "UNKNOWN_CATEGORY",
            MetricsError::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            MetricsError::DuplicateLineItem(_) => "DUPLICATE_LINE_ITEM",
            MetricsError::LineItemNotFound(_) => "LINE_ITEM_NOT_FOUND",
            MetricsError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            MetricsError::SameWarehouseTransfer(_) => "SAME_WAREHOUSE_TRANSFER",
            MetricsError::MovementMismatch(_) => "MOVEMENT_MISMATCH",
            MetricsError::Overflow { .. } => "ARITHMETIC_OVERFLOW",
        }
    }

    /// Name of the offending field, when the error is tied to one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            MetricsError::InvalidRange { field, .. } => Some(field),
            MetricsError::NegativeQuantity { field, .. } => Some(field),
            MetricsError::UnknownCategory { .. } => Some("category"),
            _ => None,
        }
    }

    pub(crate) fn negative(field: &'static str, value: impl Into<Decimal>) -> Self {
        MetricsError::NegativeQuantity {
            field,
            value: value.into(),
        }
    }
}

pub type MetricsResult<T> = Result<T, MetricsError>;
