//! Yield prediction and land allocation over the region catalog

use serde::Deserialize;
use sqlx::PgPool;
use tracing::instrument;

use crate::error::AppResult;
use crate::models::{AllocationPlan, ObservationInput, YieldPrediction};
use crate::services::catalog::CatalogService;
use shared::{validate_observation, LandAllocator, YieldPredictor};

/// Planning service
#[derive(Clone)]
pub struct PlanningService {
    db: PgPool,
}

/// Input for an allocation plan
#[derive(Debug, Deserialize)]
pub struct AllocationInput {
    #[serde(flatten)]
    pub observation: ObservationInput,
    pub top_k: Option<usize>,
}

impl PlanningService {
    /// Create a new PlanningService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Gaussian-scored predictions for every crop grown in the region
    #[instrument(skip(self, observation), fields(region = %observation.region))]
    pub async fn predict_yields(&self, observation: &ObservationInput) -> AppResult<Vec<YieldPrediction>> {
        validate_observation(observation)?;

        let catalog = CatalogService::new(self.db.clone())
            .region_catalog(&observation.region)
            .await?;
        Ok(YieldPredictor::default().predict(&catalog, observation))
    }

    /// Allocation plan over the top predictions
    pub async fn allocate(&self, input: AllocationInput, default_top_k: usize) -> AppResult<AllocationPlan> {
        let allocator = LandAllocator::new(input.top_k.unwrap_or(default_top_k))?;
        let predictions = self.predict_yields(&input.observation).await?;
        Ok(allocator.allocate(&predictions, input.observation.farm_area_hectares))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_input_accepts_flat_observation() {
        let input: AllocationInput = serde_json::from_value(serde_json::json!({
            "region": "Punjab",
            "farm_area_hectares": 2.0,
            "soil_ph": 6.5,
            "temperature": 24.0,
            "rainfall": 90.0,
            "nitrogen": null,
            "phosphorus": null,
            "potassium": null,
            "humidity": null,
            "top_k": 3
        }))
        .unwrap();
        assert_eq!(input.top_k, Some(3));
        assert_eq!(input.observation.region, "Punjab");
    }

    #[test]
    fn test_top_k_defaults_when_missing() {
        let input: AllocationInput = serde_json::from_value(serde_json::json!({
            "region": "Punjab",
            "farm_area_hectares": 2.0,
            "soil_ph": 6.5,
            "temperature": 24.0,
            "rainfall": null,
            "nitrogen": null,
            "phosphorus": null,
            "potassium": null,
            "humidity": null
        }))
        .unwrap();
        assert!(input.top_k.is_none());
    }
}
