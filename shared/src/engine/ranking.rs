//! Recommendation ranking and standalone yield prediction

use tracing::debug;

use crate::catalog::CropCatalog;
use crate::engine::estimator::{estimate_for_prediction, estimate_for_ranking};
use crate::engine::suitability::{GaussianDensity, PiecewisePenalty, SuitabilityStrategy};
use crate::models::{ObservationInput, ScoredCandidate, YieldPrediction};

/// Number of recommendations shown to the farmer
pub const DISPLAY_LIMIT: usize = 5;

/// Ranks region-suitable crops by expected profit using the piecewise score
#[derive(Debug, Clone)]
pub struct RecommendationRanker {
    strategy: PiecewisePenalty,
    display_limit: usize,
}

impl Default for RecommendationRanker {
    fn default() -> Self {
        Self::new(PiecewisePenalty::default())
    }
}

impl RecommendationRanker {
    pub fn new(strategy: PiecewisePenalty) -> Self {
        Self {
            strategy,
            display_limit: DISPLAY_LIMIT,
        }
    }

    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = limit;
        self
    }

    pub fn display_limit(&self) -> usize {
        self.display_limit
    }

    /// Every recommendable candidate, most profitable first. Ties keep
    /// catalog order.
    pub fn rank<C: CropCatalog + ?Sized>(
        &self,
        catalog: &C,
        observation: &ObservationInput,
    ) -> Vec<ScoredCandidate> {
        let mut candidates: Vec<ScoredCandidate> = catalog
            .find_by_region(&observation.region)
            .into_iter()
            .filter_map(|crop| {
                let score = self.strategy.score(observation, crop);
                if !PiecewisePenalty::is_recommendable(score) {
                    debug!(crop = %crop.name, score, "Discarding crop below suitability threshold");
                    return None;
                }
                let estimate = estimate_for_ranking(crop, observation.farm_area_hectares, score);
                Some(ScoredCandidate {
                    crop_id: crop.id,
                    crop_name: crop.name.clone(),
                    suitability_score: score,
                    expected_yield: estimate.expected_yield_tons,
                    expected_profit: estimate.expected_profit,
                })
            })
            .collect();

        candidates.sort_by(|a, b| b.expected_profit.total_cmp(&a.expected_profit));
        debug!(
            region = %observation.region,
            count = candidates.len(),
            "Ranked recommendation candidates"
        );
        candidates
    }

    /// The first `display_limit` ranked candidates
    pub fn top<C: CropCatalog + ?Sized>(
        &self,
        catalog: &C,
        observation: &ObservationInput,
    ) -> Vec<ScoredCandidate> {
        let mut ranked = self.rank(catalog, observation);
        ranked.truncate(self.display_limit);
        ranked
    }
}

/// Predicts yield and profit for every region-suitable crop with the
/// Gaussian factor. No threshold is applied.
#[derive(Debug, Clone, Default)]
pub struct YieldPredictor {
    strategy: GaussianDensity,
}

impl YieldPredictor {
    pub fn new(strategy: GaussianDensity) -> Self {
        Self { strategy }
    }

    /// Predictions, most profitable first
    pub fn predict<C: CropCatalog + ?Sized>(
        &self,
        catalog: &C,
        observation: &ObservationInput,
    ) -> Vec<YieldPrediction> {
        let mut predictions: Vec<YieldPrediction> = catalog
            .find_by_region(&observation.region)
            .into_iter()
            .map(|crop| {
                let factor = self.strategy.score(observation, crop);
                let estimate = estimate_for_prediction(crop, observation.farm_area_hectares, factor);
                YieldPrediction {
                    crop_id: crop.id,
                    crop_name: crop.name.clone(),
                    suitability_factor: factor,
                    expected_yield_tons: estimate.expected_yield_tons,
                    expected_profit: estimate.expected_profit,
                }
            })
            .collect();

        predictions.sort_by(|a, b| b.expected_profit.total_cmp(&a.expected_profit));
        predictions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::models::{CropProfile, ToleranceRange};
    use uuid::Uuid;

    fn crop(name: &str, yield_per_hectare: f64, price: f64, temperature: (f64, f64)) -> CropProfile {
        CropProfile {
            id: Uuid::new_v4(),
            name: name.to_string(),
            scientific_name: None,
            category: "Vegetable".to_string(),
            season: "Rabi".to_string(),
            temperature: ToleranceRange::new(temperature.0, temperature.1),
            rainfall: ToleranceRange::new(40.0, 80.0),
            soil_ph: ToleranceRange::new(6.0, 7.0),
            growing_period_days: 90,
            suitable_regions: "Punjab, Haryana".to_string(),
            yield_per_hectare,
            market_price_per_kg: price,
        }
    }

    #[test]
    fn test_rank_discards_unsuitable_crops() {
        let catalog = InMemoryCatalog::new(vec![
            crop("Potato", 25.0, 15.0, (15.0, 25.0)),
            // 30 °C above range: temperature factor 0, total 60, not > 60
            crop("Ginger", 8.0, 80.0, (-20.0, -10.0)),
        ]);
        let obs = ObservationInput::new("Punjab", 2.0, 6.5, 20.0, 60.0);
        let ranked = RecommendationRanker::default().rank(&catalog, &obs);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].crop_name, "Potato");
        assert_eq!(ranked[0].suitability_score, 100.0);
    }

    #[test]
    fn test_rank_orders_by_profit_then_catalog_order() {
        let catalog = InMemoryCatalog::new(vec![
            crop("Spinach", 12.0, 30.0, (10.0, 24.0)),
            crop("Broccoli", 15.0, 40.0, (15.0, 25.0)),
            crop("Cabbage", 12.0, 30.0, (10.0, 24.0)),
        ]);
        let obs = ObservationInput::new("Haryana", 2.0, 6.5, 20.0, 60.0);
        let names: Vec<String> = RecommendationRanker::default()
            .rank(&catalog, &obs)
            .into_iter()
            .map(|c| c.crop_name)
            .collect();
        assert_eq!(names, vec!["Broccoli", "Spinach", "Cabbage"]);
    }

    #[test]
    fn test_top_truncates_to_display_limit() {
        let catalog: InMemoryCatalog = (0..8)
            .map(|i| crop(&format!("Crop {}", i), 10.0 + i as f64, 20.0, (15.0, 25.0)))
            .collect();
        let obs = ObservationInput::new("Punjab", 2.0, 6.5, 20.0, 60.0);
        let ranker = RecommendationRanker::default();
        assert_eq!(ranker.rank(&catalog, &obs).len(), 8);
        assert_eq!(ranker.top(&catalog, &obs).len(), DISPLAY_LIMIT);
        assert_eq!(ranker.top(&catalog, &obs)[0].crop_name, "Crop 7");
    }

    #[test]
    fn test_no_region_match_is_empty() {
        let catalog = InMemoryCatalog::new(vec![crop("Potato", 25.0, 15.0, (15.0, 25.0))]);
        let obs = ObservationInput::new("Goa", 2.0, 6.5, 20.0, 60.0);
        assert!(RecommendationRanker::default().rank(&catalog, &obs).is_empty());
        assert!(YieldPredictor::default().predict(&catalog, &obs).is_empty());
    }

    #[test]
    fn test_predict_keeps_poorly_suited_crops() {
        let catalog = InMemoryCatalog::new(vec![
            crop("Potato", 25.0, 15.0, (15.0, 25.0)),
            crop("Ginger", 8.0, 20.0, (-20.0, -10.0)),
        ]);
        let obs = ObservationInput::new("Punjab", 2.0, 6.5, 20.0, 60.0);
        let predictions = YieldPredictor::default().predict(&catalog, &obs);
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].crop_name, "Potato");
        // 25 × 1.0 × 0.9 × 2 = 45 t
        assert_eq!(predictions[0].expected_yield_tons, 45.0);
        assert!(predictions[1].suitability_factor < 1.0);
    }
}
