//! Validation utilities for farm observations
//!
//! The engine computes with whatever readings it receives. These checks are
//! for callers (HTTP layer, WASM form previews) to run before invoking it.

use crate::error::{EngineError, EngineResult};
use crate::models::ObservationInput;

// ============================================================================
// Reading ranges
// ============================================================================

/// Soil pH scale
pub const PH_RANGE: (f64, f64) = (0.0, 14.0);

/// Accepted air temperature, °C
pub const TEMPERATURE_RANGE: (f64, f64) = (-20.0, 60.0);

/// Nitrogen and phosphorus, kg/ha
pub const NITROGEN_RANGE: (f64, f64) = (0.0, 140.0);
pub const PHOSPHORUS_RANGE: (f64, f64) = (0.0, 140.0);

/// Potassium, kg/ha
pub const POTASSIUM_RANGE: (f64, f64) = (0.0, 200.0);

/// Largest accepted farm, hectares
pub const MAX_FARM_AREA: f64 = 10_000.0;

/// Relative humidity, %
pub const HUMIDITY_RANGE: (f64, f64) = (0.0, 100.0);

fn in_range(value: f64, (min, max): (f64, f64)) -> bool {
    value >= min && value <= max
}

/// Validate soil pH is on the 0-14 scale
pub fn validate_soil_ph(ph: f64) -> Result<(), &'static str> {
    if !in_range(ph, PH_RANGE) {
        return Err("Soil pH must be between 0 and 14");
    }
    Ok(())
}

pub fn validate_temperature(celsius: f64) -> Result<(), &'static str> {
    if !in_range(celsius, TEMPERATURE_RANGE) {
        return Err("Temperature must be between -20 and 60 °C");
    }
    Ok(())
}

pub fn validate_rainfall(mm: f64) -> Result<(), &'static str> {
    if !mm.is_finite() || mm < 0.0 {
        return Err("Rainfall cannot be negative");
    }
    Ok(())
}

/// Validate farm area is strictly positive and at most `MAX_FARM_AREA`
pub fn validate_farm_area(hectares: f64) -> Result<(), &'static str> {
    if !hectares.is_finite() || hectares <= 0.0 {
        return Err("Farm area must be greater than zero");
    }
    if hectares > MAX_FARM_AREA {
        return Err("Farm area cannot exceed 10000 hectares");
    }
    Ok(())
}

pub fn validate_region(region: &str) -> Result<(), &'static str> {
    if region.trim().is_empty() {
        return Err("Region is required");
    }
    Ok(())
}

/// Validate an optional nutrient or humidity reading against its range
pub fn validate_optional(value: Option<f64>, range: (f64, f64), message: &'static str) -> Result<(), &'static str> {
    match value {
        Some(v) if !in_range(v, range) => Err(message),
        _ => Ok(()),
    }
}

// ============================================================================
// Whole observation
// ============================================================================

/// Validate every reading of an observation, reporting the first bad field
pub fn validate_observation(observation: &ObservationInput) -> EngineResult<()> {
    let checks: [(&'static str, Result<(), &'static str>); 9] = [
        ("region", validate_region(&observation.region)),
        ("farm_area_hectares", validate_farm_area(observation.farm_area_hectares)),
        ("soil_ph", validate_soil_ph(observation.soil_ph)),
        ("temperature", validate_temperature(observation.temperature)),
        (
            "rainfall",
            observation.rainfall.map(validate_rainfall).unwrap_or(Ok(())),
        ),
        (
            "nitrogen",
            validate_optional(observation.nitrogen, NITROGEN_RANGE, "Nitrogen must be between 0 and 140 kg/ha"),
        ),
        (
            "phosphorus",
            validate_optional(
                observation.phosphorus,
                PHOSPHORUS_RANGE,
                "Phosphorus must be between 0 and 140 kg/ha",
            ),
        ),
        (
            "potassium",
            validate_optional(observation.potassium, POTASSIUM_RANGE, "Potassium must be between 0 and 200 kg/ha"),
        ),
        (
            "humidity",
            validate_optional(observation.humidity, HUMIDITY_RANGE, "Humidity must be between 0 and 100%"),
        ),
    ];

    for (field, result) in checks {
        if let Err(message) = result {
            return Err(EngineError::InvalidObservation { field, message });
        }
    }
    Ok(())
}
