//! Common types used across the platform

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, MetricsResult};

/// Currencies the dashboard formats amounts in (zero fractional digits)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Rwf,
    Ugx,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Rwf => "RWF",
            Currency::Ugx => "UGX",
        }
    }
}

/// Inclusive date range for filtering dated records
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> MetricsResult<Self> {
        if start > end {
            return Err(MetricsError::InvalidRange {
                field: "date_range",
                message: format!("start {} is after end {}", start, end),
            });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// `part / whole × 100`, failing on a zero denominator
pub(crate) fn ratio_percent(
    part: Decimal,
    whole: Decimal,
    context: &'static str,
) -> MetricsResult<Decimal> {
    if whole.is_zero() {
        return Err(MetricsError::DivisionByZero { context });
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(MetricsError::Overflow { context })
}
