//! Request-level services shared by the metrics handlers

pub mod batch;
pub mod reporting;

pub use batch::{screen, BatchQuery, ExportFormat, OnInvalid};
pub use reporting::{csv_attachment, ReportingService, REJECTED_COUNT_HEADER};
