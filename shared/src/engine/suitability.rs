//! Suitability scoring strategies
//!
//! Two formulas are in use and are deliberately kept apart:
//!
//! - [`GaussianDensity`] feeds standalone yield prediction and the land
//!   allocation optimizer. It returns a continuous factor in (0, 1] that
//!   multiplies the base yield directly.
//! - [`PiecewisePenalty`] feeds the recommendation ranker. It returns a
//!   0-100 score with linear penalties outside each tolerance range, and
//!   candidates must clear [`MIN_RECOMMENDABLE_SCORE`].

use crate::models::{CropProfile, ObservationInput, ToleranceRange};
use crate::types::round2;

/// Factor weights: temperature, soil pH, rainfall
pub const TEMPERATURE_WEIGHT: f64 = 0.4;
pub const PH_WEIGHT: f64 = 0.3;
pub const RAINFALL_WEIGHT: f64 = 0.3;

/// Candidates must score strictly above this to be recommended
pub const MIN_RECOMMENDABLE_SCORE: f64 = 60.0;

/// Per-factor suitability before weighting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorScores {
    pub temperature: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl FactorScores {
    pub fn weighted(&self) -> f64 {
        self.temperature * TEMPERATURE_WEIGHT + self.ph * PH_WEIGHT + self.rainfall * RAINFALL_WEIGHT
    }
}

/// A way of measuring how well observed conditions fit a crop
pub trait SuitabilityStrategy {
    /// Short identifier for logs
    fn name(&self) -> &'static str;

    /// Unweighted per-factor suitability
    fn factors(&self, observation: &ObservationInput, crop: &CropProfile) -> FactorScores;

    /// Combined suitability on this strategy's own scale
    fn score(&self, observation: &ObservationInput, crop: &CropProfile) -> f64;
}

// ============================================================================
// Gaussian density
// ============================================================================

/// Gaussian fit around each tolerance range's midpoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianDensity {
    pub min_temperature_sigma: f64,
    pub min_ph_sigma: f64,
    pub min_rainfall_sigma: f64,
    /// Rainfall factor used when the observation carries no rainfall
    pub missing_rainfall_factor: f64,
}

impl Default for GaussianDensity {
    fn default() -> Self {
        Self {
            min_temperature_sigma: 1.0,
            min_ph_sigma: 0.3,
            min_rainfall_sigma: 5.0,
            missing_rainfall_factor: 0.8,
        }
    }
}

impl GaussianDensity {
    /// exp(-(x - center)² / 2σ²) with σ = half the range width, floored
    pub fn factor(value: f64, range: &ToleranceRange, min_sigma: f64) -> f64 {
        let sigma = range.half_width().max(min_sigma);
        let delta = value - range.midpoint();
        (-(delta * delta) / (2.0 * sigma * sigma)).exp()
    }
}

impl SuitabilityStrategy for GaussianDensity {
    fn name(&self) -> &'static str {
        "gaussian_density"
    }

    fn factors(&self, observation: &ObservationInput, crop: &CropProfile) -> FactorScores {
        FactorScores {
            temperature: Self::factor(
                observation.temperature,
                &crop.temperature,
                self.min_temperature_sigma,
            ),
            ph: Self::factor(observation.soil_ph, &crop.soil_ph, self.min_ph_sigma),
            rainfall: observation
                .rainfall
                .map(|r| Self::factor(r, &crop.rainfall, self.min_rainfall_sigma))
                .unwrap_or(self.missing_rainfall_factor),
        }
    }

    fn score(&self, observation: &ObservationInput, crop: &CropProfile) -> f64 {
        // weights sum to 1.0 only up to float error
        self.factors(observation, crop).weighted().min(1.0)
    }
}

// ============================================================================
// Piecewise-linear penalty
// ============================================================================

/// 100 inside each range, linear penalty by distance to the nearer bound outside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PiecewisePenalty {
    /// Points lost per °C outside the range
    pub temperature_rate: f64,
    /// Points lost per pH unit outside the range
    pub ph_rate: f64,
    /// Points lost per mm outside the range
    pub rainfall_rate: f64,
    /// Rainfall factor used when the observation carries no rainfall
    pub missing_rainfall_score: f64,
}

impl Default for PiecewisePenalty {
    fn default() -> Self {
        Self {
            temperature_rate: 5.0,
            ph_rate: 10.0,
            rainfall_rate: 0.1,
            missing_rainfall_score: 80.0,
        }
    }
}

impl PiecewisePenalty {
    pub fn factor(value: f64, range: &ToleranceRange, rate: f64) -> f64 {
        if range.contains(value) {
            100.0
        } else {
            (100.0 - range.distance_to_nearer_bound(value) * rate).max(0.0)
        }
    }

    pub fn is_recommendable(score: f64) -> bool {
        score > MIN_RECOMMENDABLE_SCORE
    }
}

impl SuitabilityStrategy for PiecewisePenalty {
    fn name(&self) -> &'static str {
        "piecewise_penalty"
    }

    fn factors(&self, observation: &ObservationInput, crop: &CropProfile) -> FactorScores {
        FactorScores {
            temperature: Self::factor(observation.temperature, &crop.temperature, self.temperature_rate),
            ph: Self::factor(observation.soil_ph, &crop.soil_ph, self.ph_rate),
            rainfall: observation
                .rainfall
                .map(|r| Self::factor(r, &crop.rainfall, self.rainfall_rate))
                .unwrap_or(self.missing_rainfall_score),
        }
    }

    fn score(&self, observation: &ObservationInput, crop: &CropProfile) -> f64 {
        round2(self.factors(observation, crop).weighted())
    }
}
