//! What to do with invalid records in a submitted batch

use serde::Deserialize;
use shared::{partition_valid, validate_all, MetricsResult, RejectedRecord};

use crate::error::{AppError, AppResult};

/// Policy for a batch containing records that fail validation
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OnInvalid {
    /// Fail the whole request on the first bad record
    #[default]
    Reject,
    /// Drop bad records and report them alongside the result
    Skip,
}

/// Query string accepted by collection endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchQuery {
    #[serde(default)]
    pub on_invalid: OnInvalid,
    /// "json" (default) or "csv" where an export exists
    pub format: Option<String>,
}

/// Response body format for endpoints with a report export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl BatchQuery {
    pub fn export_format(&self) -> AppResult<ExportFormat> {
        match self.format.as_deref() {
            None | Some("json") => Ok(ExportFormat::Json),
            Some("csv") => Ok(ExportFormat::Csv),
            Some(other) => Err(AppError::BadRequest(format!(
                "unsupported format '{}', expected json or csv",
                other
            ))),
        }
    }
}

/// Validate a batch under `policy`, returning the records to compute over
pub fn screen<T, F>(
    records: Vec<T>,
    policy: OnInvalid,
    validate: F,
) -> AppResult<(Vec<T>, Vec<RejectedRecord>)>
where
    F: Fn(&T) -> MetricsResult<()>,
{
    match policy {
        OnInvalid::Reject => {
            validate_all(&records, &validate)?;
            Ok((records, Vec::new()))
        }
        OnInvalid::Skip => {
            let (valid, rejected) = partition_valid(records, validate);
            for r in &rejected {
                tracing::warn!(index = r.index, code = %r.code, "Skipping invalid record: {}", r.message);
            }
            Ok((valid, rejected))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::MetricsError;

    fn non_negative(v: &i64) -> MetricsResult<()> {
        if *v < 0 {
            return Err(MetricsError::NegativeQuantity {
                field: "value",
                value: (*v).into(),
            });
        }
        Ok(())
    }

    #[test]
    fn test_reject_fails_whole_batch() {
        let result = screen(vec![1, -2, 3], OnInvalid::Reject, non_negative);
        assert!(matches!(result, Err(AppError::Metrics(MetricsError::NegativeQuantity { .. }))));
    }

    #[test]
    fn test_export_format() {
        let query = |format: Option<&str>| BatchQuery {
            on_invalid: OnInvalid::Reject,
            format: format.map(str::to_string),
        };
        assert_eq!(query(None).export_format().unwrap(), ExportFormat::Json);
        assert_eq!(query(Some("csv")).export_format().unwrap(), ExportFormat::Csv);
        assert!(matches!(
            query(Some("xlsx")).export_format(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_skip_reports_rejections() {
        let (valid, rejected) = screen(vec![1, -2, 3], OnInvalid::Skip, non_negative).unwrap();
        assert_eq!(valid, vec![1, 3]);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].index, 1);
    }
}
