//! Recommendation, yield prediction and allocation results

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A crop that passed the suitability threshold, with its estimates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredCandidate {
    pub crop_id: Uuid,
    pub crop_name: String,
    /// Piecewise-penalty score, 0-100, two decimals
    pub suitability_score: f64,
    /// Tons, two decimals
    pub expected_yield: f64,
    /// Currency, two decimals
    pub expected_profit: f64,
}

/// Standalone yield prediction for one crop (Gaussian suitability path)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YieldPrediction {
    pub crop_id: Uuid,
    pub crop_name: String,
    /// Gaussian suitability factor in (0, 1]
    pub suitability_factor: f64,
    pub expected_yield_tons: f64,
    pub expected_profit: f64,
}

/// Area assigned to one crop in an allocation plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationEntry {
    pub crop_id: Uuid,
    pub crop_name: String,
    pub hectares: f64,
    pub expected_yield_tons: f64,
    pub expected_profit: f64,
}

/// Result of the land allocation optimizer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AllocationPlan {
    pub allocations: Vec<AllocationEntry>,
    pub total_expected_yield_tons: f64,
    pub total_expected_profit: f64,
}

impl AllocationPlan {
    pub fn allocated_hectares(&self) -> f64 {
        self.allocations.iter().map(|a| a.hectares).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }
}
