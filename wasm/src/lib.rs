//! WebAssembly module for Agri Advisor
//!
//! Provides client-side computation for:
//! - Suitability scores while a farmer fills in the observation form
//! - Farm-size efficiency and yield/profit previews
//! - Offline observation validation
//! - Seasonal climate outlook for a crop category

use wasm_bindgen::prelude::*;

use shared::{
    climate_impacts, efficiency_factor, estimate, validate_observation, CropCategoryGroup,
    CropProfile, EngineError, GaussianDensity, ObservationInput, PiecewisePenalty,
    SuitabilityStrategy,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str("agri-advisor calculators loaded"));
}

fn parse_crop(crop_json: &str) -> Result<CropProfile, JsValue> {
    serde_json::from_str(crop_json).map_err(|e| JsValue::from_str(&format!("Invalid crop JSON: {}", e)))
}

fn readings(soil_ph: f64, temperature: f64, rainfall: Option<f64>) -> ObservationInput {
    let observation = ObservationInput::new("", 1.0, soil_ph, temperature, rainfall.unwrap_or_default());
    match rainfall {
        Some(_) => observation,
        None => observation.without_rainfall(),
    }
}

/// Piecewise suitability score (0-100) of a crop for the given readings
#[wasm_bindgen]
pub fn score_suitability(
    crop_json: &str,
    soil_ph: f64,
    temperature: f64,
    rainfall: Option<f64>,
) -> Result<f64, JsValue> {
    let crop = parse_crop(crop_json)?;
    Ok(PiecewisePenalty::default().score(&readings(soil_ph, temperature, rainfall), &crop))
}

/// Gaussian suitability factor (0-1] of a crop for the given readings
#[wasm_bindgen]
pub fn gaussian_suitability(
    crop_json: &str,
    soil_ph: f64,
    temperature: f64,
    rainfall: Option<f64>,
) -> Result<f64, JsValue> {
    let crop = parse_crop(crop_json)?;
    Ok(GaussianDensity::default().score(&readings(soil_ph, temperature, rainfall), &crop))
}

/// Whether a piecewise score clears the recommendation threshold
#[wasm_bindgen]
pub fn is_recommendable(score: f64) -> bool {
    PiecewisePenalty::is_recommendable(score)
}

/// Farm-size efficiency factor
#[wasm_bindgen]
pub fn farm_efficiency(farm_area_hectares: f64) -> f64 {
    efficiency_factor(farm_area_hectares)
}

/// Expected yield and profit as `{"expected_yield_tons", "expected_profit"}` JSON
#[wasm_bindgen]
pub fn estimate_yield(crop_json: &str, farm_area_hectares: f64, suitability_factor: f64) -> Result<String, JsValue> {
    let crop = parse_crop(crop_json)?;
    let estimate = estimate(&crop, farm_area_hectares, suitability_factor);
    serde_json::to_string(&estimate).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Validate an observation form; the error names the first bad field
#[wasm_bindgen]
pub fn check_observation(observation_json: &str) -> Result<(), JsValue> {
    let observation: ObservationInput = serde_json::from_str(observation_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid observation JSON: {}", e)))?;

    validate_observation(&observation).map_err(|e| match e {
        EngineError::InvalidObservation { field, message } => {
            JsValue::from_str(&format!("{}: {}", field, message))
        }
        other => JsValue::from_str(&other.to_string()),
    })
}

/// Six climate labels starting at `month` (1-12) as a JSON array
#[wasm_bindgen]
pub fn climate_outlook(category: &str, month: u32) -> String {
    let labels: Vec<&str> = climate_impacts(CropCategoryGroup::classify(category), month)
        .iter()
        .map(|impact| impact.as_str())
        .collect();
    serde_json::to_string(&labels).unwrap_or_else(|_| "[]".to_string())
}

/// Climate outlook starting at the browser's current month
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn climate_outlook_now(category: &str) -> String {
    let month = js_sys::Date::new_0().get_month() + 1;
    climate_outlook(category, month)
}
