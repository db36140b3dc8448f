//! Forecast persistence interface
//!
//! Regenerating a crop's forecast replaces its stored points wholesale.
//! Implementations must make the delete and the insert one atomic step so
//! concurrent regenerations for the same crop never interleave.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use rand::Rng;
use uuid::Uuid;

use crate::engine::forecast::{ForecastContext, PriceForecaster};
use crate::models::{CropProfile, PriceForecastPoint};

pub trait ForecastStore {
    /// Drop every stored point for `crop_id`, then store `points`
    fn replace_forecasts(&self, crop_id: Uuid, points: Vec<PriceForecastPoint>);

    /// Stored points for `crop_id`, ordered by (year, month)
    fn forecasts_for(&self, crop_id: Uuid) -> Vec<PriceForecastPoint>;
}

/// Process-local store; one lock guards every crop's series
#[derive(Debug, Default)]
pub struct InMemoryForecastStore {
    series: Mutex<HashMap<Uuid, Vec<PriceForecastPoint>>>,
}

impl InMemoryForecastStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn series(&self) -> MutexGuard<'_, HashMap<Uuid, Vec<PriceForecastPoint>>> {
        self.series.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Total stored points across all crops
    pub fn len(&self) -> usize {
        self.series().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ForecastStore for InMemoryForecastStore {
    fn replace_forecasts(&self, crop_id: Uuid, mut points: Vec<PriceForecastPoint>) {
        points.sort_by_key(|p| (p.year, p.month));
        self.series().insert(crop_id, points);
    }

    fn forecasts_for(&self, crop_id: Uuid) -> Vec<PriceForecastPoint> {
        self.series().get(&crop_id).cloned().unwrap_or_default()
    }
}

/// Generate a fresh six-month forecast for `crop` and replace its stored series
pub fn regenerate_forecasts<S, R>(
    store: &S,
    forecaster: &mut PriceForecaster<R>,
    crop: &CropProfile,
    context: &ForecastContext,
) -> Vec<PriceForecastPoint>
where
    S: ForecastStore + ?Sized,
    R: Rng,
{
    let points = forecaster.forecast(crop, context);
    store.replace_forecasts(crop.id, points.clone());
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClimateImpact, MarketTrend};

    fn point(crop_id: Uuid, year: i32, month: u32) -> PriceForecastPoint {
        PriceForecastPoint {
            crop_id,
            month,
            year,
            forecasted_price: 20.0,
            price_change_percentage: 0.0,
            climate_impact: ClimateImpact::Neutral,
            market_trend: MarketTrend::Stable,
        }
    }

    #[test]
    fn test_replace_discards_previous_points() {
        let store = InMemoryForecastStore::new();
        let crop_id = Uuid::new_v4();
        store.replace_forecasts(crop_id, (1..=9).map(|m| point(crop_id, 2024, m)).collect());
        store.replace_forecasts(crop_id, vec![point(crop_id, 2025, 1)]);

        let stored = store.forecasts_for(crop_id);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].year, 2025);
    }

    #[test]
    fn test_replace_leaves_other_crops_untouched() {
        let store = InMemoryForecastStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        store.replace_forecasts(a, vec![point(a, 2024, 1)]);
        store.replace_forecasts(b, vec![point(b, 2024, 1), point(b, 2024, 2)]);
        store.replace_forecasts(a, vec![]);

        assert!(store.forecasts_for(a).is_empty());
        assert_eq!(store.forecasts_for(b).len(), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_points_are_ordered_by_year_then_month() {
        let store = InMemoryForecastStore::new();
        let id = Uuid::new_v4();
        store.replace_forecasts(id, vec![point(id, 2025, 2), point(id, 2024, 12), point(id, 2025, 1)]);
        let order: Vec<(i32, u32)> = store.forecasts_for(id).iter().map(|p| (p.year, p.month)).collect();
        assert_eq!(order, vec![(2024, 12), (2025, 1), (2025, 2)]);
    }
}
