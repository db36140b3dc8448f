//! Common types and numeric helpers used across the engine

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Smallest farm area used as a denominator for per-hectare rates
pub const MIN_AREA_DENOMINATOR: f64 = 1e-6;

/// Kilograms per metric ton
pub const KG_PER_TON: f64 = 1000.0;

/// Round to two decimal places (currency, tons, scores)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Divide by a farm area, flooring the denominator so a zero or negative
/// area never yields an infinite or NaN rate
pub fn per_area(value: f64, area_hectares: f64) -> f64 {
    value / area_hectares.max(MIN_AREA_DENOMINATOR)
}

/// A calendar month within a specific year
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthYear {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl MonthYear {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Roll forward `offset` months, wrapping December into January of the
    /// following year
    pub fn plus_months(&self, offset: u32) -> Self {
        let zero_based = self.month - 1 + offset;
        Self {
            year: self.year + (zero_based / 12) as i32,
            month: zero_based % 12 + 1,
        }
    }
}

impl std::fmt::Display for MonthYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}
