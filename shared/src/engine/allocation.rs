//! Greedy land allocation across predicted crops
//!
//! Candidates are ordered by profit density (profit per hectare) and the
//! remaining area is handed to each in turn. Because every pick takes all of
//! the remaining area, the first (densest) candidate always receives the
//! whole farm and the plan holds a single entry.

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AllocationEntry, AllocationPlan, YieldPrediction};
use crate::types::{per_area, round2};

/// Number of top predictions considered by default
pub const DEFAULT_TOP_K: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandAllocator {
    top_k: usize,
}

impl Default for LandAllocator {
    fn default() -> Self {
        Self { top_k: DEFAULT_TOP_K }
    }
}

impl LandAllocator {
    pub fn new(top_k: usize) -> EngineResult<Self> {
        if top_k == 0 {
            return Err(EngineError::InvalidTopK);
        }
        Ok(Self { top_k })
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Allocate `total_area_hectares` over the first `top_k` predictions.
    ///
    /// `predictions` must come from the same farm area: their aggregate
    /// yield and profit are divided by `total_area_hectares` to recover
    /// per-hectare rates.
    pub fn allocate(&self, predictions: &[YieldPrediction], total_area_hectares: f64) -> AllocationPlan {
        let candidates = &predictions[..predictions.len().min(self.top_k)];

        let mut order: Vec<(usize, f64)> = candidates
            .iter()
            .enumerate()
            .map(|(idx, c)| (idx, per_area(c.expected_profit, total_area_hectares)))
            .collect();
        order.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut remaining = total_area_hectares;
        let mut plan = AllocationPlan::default();
        let mut total_yield = 0.0;
        let mut total_profit = 0.0;

        for (idx, density) in order {
            if remaining <= 0.0 {
                break;
            }
            let candidate = &candidates[idx];
            let allocated = remaining;

            let yield_added = per_area(candidate.expected_yield_tons, total_area_hectares) * allocated;
            let profit_added = density * allocated;

            debug!(
                crop = %candidate.crop_name,
                hectares = allocated,
                profit_per_hectare = density,
                "Allocating area"
            );

            plan.allocations.push(AllocationEntry {
                crop_id: candidate.crop_id,
                crop_name: candidate.crop_name.clone(),
                hectares: round2(allocated),
                expected_yield_tons: round2(yield_added),
                expected_profit: round2(profit_added),
            });

            remaining = 0.0;
            total_yield += yield_added;
            total_profit += profit_added;
        }

        plan.total_expected_yield_tons = round2(total_yield);
        plan.total_expected_profit = round2(total_profit);
        plan
    }
}
