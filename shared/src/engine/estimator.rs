//! Yield and profit estimation

use serde::{Deserialize, Serialize};

use crate::models::CropProfile;
use crate::types::{round2, KG_PER_TON};

/// Share of revenue kept as profit (35% assumed costs)
pub const PROFIT_MARGIN: f64 = 0.65;

/// Economies-of-scale multiplier by farm size tier.
///
/// A step function, not a curve: below 1 ha → 0.8, 1 ha up to 5 ha → 0.9,
/// 5 ha and above → 1.0.
pub fn efficiency_factor(farm_area_hectares: f64) -> f64 {
    if farm_area_hectares < 1.0 {
        0.8
    } else if farm_area_hectares < 5.0 {
        0.9
    } else {
        1.0
    }
}

/// Profit for a harvest sold at `price_per_kg`, two decimals
pub fn expected_profit(yield_tons: f64, price_per_kg: f64) -> f64 {
    round2(expected_revenue(yield_tons, price_per_kg) * PROFIT_MARGIN)
}

pub fn expected_revenue(yield_tons: f64, price_per_kg: f64) -> f64 {
    yield_tons * KG_PER_TON * price_per_kg
}

/// Expected harvest and profit for one crop on one farm
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct YieldEstimate {
    pub expected_yield_tons: f64,
    pub expected_profit: f64,
}

/// yield = base × suitability × efficiency × area; profit = revenue × 0.65
pub fn estimate(crop: &CropProfile, farm_area_hectares: f64, suitability_factor: f64) -> YieldEstimate {
    let expected_yield_tons = round2(
        crop.yield_per_hectare
            * suitability_factor
            * efficiency_factor(farm_area_hectares)
            * farm_area_hectares,
    );
    YieldEstimate {
        expected_yield_tons,
        expected_profit: expected_profit(expected_yield_tons, crop.market_price_per_kg),
    }
}

/// Ranking path: the raw 0-100 piecewise score is the multiplier, unscaled.
///
/// The resulting yields are on a ×100 scale relative to the prediction path.
/// Ranking order is unaffected; absolute figures need calibration before
/// being shown as tonnage.
pub fn estimate_for_ranking(crop: &CropProfile, farm_area_hectares: f64, piecewise_score: f64) -> YieldEstimate {
    estimate(crop, farm_area_hectares, piecewise_score)
}

/// Prediction path: the Gaussian factor in (0, 1] is the multiplier
pub fn estimate_for_prediction(crop: &CropProfile, farm_area_hectares: f64, gaussian_factor: f64) -> YieldEstimate {
    estimate(crop, farm_area_hectares, gaussian_factor)
}
