//! Database models for the Agri Advisor service
//!
//! Re-exports models from the shared crate and adds the NUMERIC column
//! conversions used by the services

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};

pub use shared::models::*;

/// NUMERIC column value as a float for the engine
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Engine float as a two-decimal NUMERIC value
pub fn to_decimal(value: f64) -> AppResult<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| AppError::Internal(format!("Cannot store non-finite value {}", value)))
}
