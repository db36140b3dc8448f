//! Six-month crop price forecasting
//!
//! Each run combines three ingredients per month:
//!
//! 1. a seasonal climate-impact label, taken from a fixed six-slot pattern for
//!    the crop's category group and rotated by the starting month;
//! 2. a market-trend seed drawn from a Markov chain with momentum;
//! 3. a random price move: base fluctuation plus climate and market
//!    adjustments.
//!
//! The stored trend label is derived from the realized (rounded) percentage
//! change, so the label and the sign of the change always agree. The seed
//! trend only biases the size of the move.
//!
//! Randomness is injected so callers and tests can pin the sequence.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{ClimateImpact, CropCategoryGroup, CropProfile, MarketTrend, PriceForecastPoint};
use crate::types::{round2, MonthYear};

/// Months generated per forecast run
pub const FORECAST_HORIZON: usize = 6;

use ClimateImpact::{Negative, Neutral, Positive};

const GRAIN_PATTERN: [ClimateImpact; FORECAST_HORIZON] =
    [Neutral, Positive, Positive, Neutral, Negative, Negative];
const VEGETABLE_PATTERN: [ClimateImpact; FORECAST_HORIZON] =
    [Negative, Neutral, Positive, Positive, Neutral, Negative];
const FRUIT_PATTERN: [ClimateImpact; FORECAST_HORIZON] =
    [Positive, Positive, Neutral, Negative, Negative, Neutral];
const DEFAULT_PATTERN: [ClimateImpact; FORECAST_HORIZON] =
    [Neutral, Neutral, Positive, Positive, Neutral, Negative];

/// Initial trend weights, in [`MarketTrend::ALL`] order
const INITIAL_TREND_WEIGHTS: [f64; 3] = [0.4, 0.4, 0.2];

/// Base monthly fluctuation range
const BASE_FLUCTUATION: (f64, f64) = (-0.05, 0.08);
const POSITIVE_CLIMATE_ADJUSTMENT: (f64, f64) = (0.02, 0.05);
const NEGATIVE_CLIMATE_ADJUSTMENT: (f64, f64) = (-0.05, -0.02);
const RISING_MARKET_ADJUSTMENT: (f64, f64) = (0.03, 0.07);
const FALLING_MARKET_ADJUSTMENT: (f64, f64) = (-0.07, -0.03);

/// Conditions a forecast run starts from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastContext {
    /// First forecast month is the month containing this date
    pub start: NaiveDate,
    /// Carried for logging; the model does not consume it
    pub region: Option<String>,
    pub temperature: Option<f64>,
    pub rainfall: Option<f64>,
}

impl ForecastContext {
    pub fn starting(start: NaiveDate) -> Self {
        Self {
            start,
            region: None,
            temperature: None,
            rainfall: None,
        }
    }
}

/// Seasonal pattern for a category group
pub fn climate_pattern(group: CropCategoryGroup) -> [ClimateImpact; FORECAST_HORIZON] {
    match group {
        CropCategoryGroup::Grain => GRAIN_PATTERN,
        CropCategoryGroup::Vegetable => VEGETABLE_PATTERN,
        CropCategoryGroup::Fruit => FRUIT_PATTERN,
        CropCategoryGroup::Other => DEFAULT_PATTERN,
    }
}

/// Climate labels for six months starting at `current_month` (1-12)
pub fn climate_impacts(group: CropCategoryGroup, current_month: u32) -> [ClimateImpact; FORECAST_HORIZON] {
    let pattern = climate_pattern(group);
    let start = current_month as usize % FORECAST_HORIZON;
    std::array::from_fn(|i| pattern[(start + i) % FORECAST_HORIZON])
}

/// Next-month trend weights given this month's trend, in [`MarketTrend::ALL`] order
pub fn transition_weights(previous: MarketTrend) -> [f64; 3] {
    match previous {
        MarketTrend::Rising => [0.5, 0.3, 0.2],
        MarketTrend::Stable => [0.3, 0.4, 0.3],
        MarketTrend::Falling => [0.2, 0.3, 0.5],
    }
}

fn draw_trend<R: Rng + ?Sized>(rng: &mut R, weights: [f64; 3]) -> MarketTrend {
    let options: Vec<(MarketTrend, f64)> = MarketTrend::ALL.into_iter().zip(weights).collect();
    options
        .choose_weighted(rng, |(_, weight)| *weight)
        .map(|(trend, _)| *trend)
        .unwrap_or(MarketTrend::Stable)
}

/// Six seed trends: one initial draw, then five momentum-conditioned draws
pub fn market_trend_seeds<R: Rng + ?Sized>(rng: &mut R) -> [MarketTrend; FORECAST_HORIZON] {
    let mut trends = [MarketTrend::Stable; FORECAST_HORIZON];
    trends[0] = draw_trend(rng, INITIAL_TREND_WEIGHTS);
    for i in 1..FORECAST_HORIZON {
        trends[i] = draw_trend(rng, transition_weights(trends[i - 1]));
    }
    trends
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, (low, high): (f64, f64)) -> f64 {
    rng.gen_range(low..=high)
}

/// Realized price move for one month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceMove {
    /// Price per kg, two decimals, floored at zero
    pub price: f64,
    /// Percent change, two decimals
    pub change_percentage: f64,
    /// Derived from `change_percentage`
    pub trend: MarketTrend,
}

/// Price for month `index` (0-based) of a run
pub fn price_move<R: Rng + ?Sized>(
    rng: &mut R,
    base_price: f64,
    index: usize,
    climate: ClimateImpact,
    seed_trend: MarketTrend,
) -> PriceMove {
    let base_fluctuation = uniform(rng, BASE_FLUCTUATION);

    let climate_adjustment = match climate {
        ClimateImpact::Positive => uniform(rng, POSITIVE_CLIMATE_ADJUSTMENT),
        ClimateImpact::Negative => uniform(rng, NEGATIVE_CLIMATE_ADJUSTMENT),
        ClimateImpact::Neutral => 0.0,
    };

    let horizon_weight = index as f64 / FORECAST_HORIZON as f64;
    let market_adjustment = match seed_trend {
        MarketTrend::Rising => uniform(rng, RISING_MARKET_ADJUSTMENT) * horizon_weight,
        MarketTrend::Falling => uniform(rng, FALLING_MARKET_ADJUSTMENT) * horizon_weight,
        MarketTrend::Stable => 0.0,
    };

    let total_change = base_fluctuation + climate_adjustment + market_adjustment;
    let change_percentage = round2(total_change * 100.0);

    PriceMove {
        price: round2((base_price * (1.0 + total_change)).max(0.0)),
        change_percentage,
        trend: MarketTrend::from_change(change_percentage),
    }
}

/// Generates forecast runs from an injected random source
#[derive(Debug, Clone)]
pub struct PriceForecaster<R> {
    rng: R,
}

impl PriceForecaster<StdRng> {
    /// Reproducible forecaster
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> PriceForecaster<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Six monthly points for `crop`, starting at the context's month
    pub fn forecast(&mut self, crop: &CropProfile, context: &ForecastContext) -> Vec<PriceForecastPoint> {
        let start = MonthYear::of(context.start);
        let climate = climate_impacts(crop.category_group(), start.month);
        let seeds = market_trend_seeds(&mut self.rng);

        debug!(
            crop = %crop.name,
            group = %crop.category_group(),
            start = %start,
            region = context.region.as_deref().unwrap_or("-"),
            "Generating price forecast"
        );

        (0..FORECAST_HORIZON)
            .map(|i| {
                let target = start.plus_months(i as u32);
                let moved = price_move(&mut self.rng, crop.market_price_per_kg, i, climate[i], seeds[i]);
                PriceForecastPoint {
                    crop_id: crop.id,
                    month: target.month,
                    year: target.year,
                    forecasted_price: moved.price,
                    price_change_percentage: moved.change_percentage,
                    climate_impact: climate[i],
                    market_trend: moved.trend,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ToleranceRange;
    use uuid::Uuid;

    fn tomato() -> CropProfile {
        CropProfile {
            id: Uuid::new_v4(),
            name: "Tomato".to_string(),
            scientific_name: Some("Solanum lycopersicum".to_string()),
            category: "Vegetable".to_string(),
            season: "Rabi".to_string(),
            temperature: ToleranceRange::new(18.0, 30.0),
            rainfall: ToleranceRange::new(30.0, 70.0),
            soil_ph: ToleranceRange::new(6.0, 7.5),
            growing_period_days: 90,
            suitable_regions: "Karnataka, Maharashtra".to_string(),
            yield_per_hectare: 35.0,
            market_price_per_kg: 20.0,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_climate_rotation_by_month() {
        // month 8 -> start at slot 2
        let impacts = climate_impacts(CropCategoryGroup::Grain, 8);
        assert_eq!(impacts, [Positive, Neutral, Negative, Negative, Neutral, Positive]);

        // month 6 -> no rotation
        assert_eq!(climate_impacts(CropCategoryGroup::Fruit, 6), FRUIT_PATTERN);
    }

    #[test]
    fn test_forecast_months_roll_over_year_end() {
        let mut forecaster = PriceForecaster::seeded(7);
        let points = forecaster.forecast(&tomato(), &ForecastContext::starting(date(2024, 10, 15)));

        let months: Vec<(u32, i32)> = points.iter().map(|p| (p.month, p.year)).collect();
        assert_eq!(
            months,
            vec![(10, 2024), (11, 2024), (12, 2024), (1, 2025), (2, 2025), (3, 2025)]
        );
    }

    #[test]
    fn test_same_seed_same_forecast() {
        let crop = tomato();
        let ctx = ForecastContext::starting(date(2025, 3, 1));
        let a = PriceForecaster::seeded(42).forecast(&crop, &ctx);
        let b = PriceForecaster::seeded(42).forecast(&crop, &ctx);
        assert_eq!(a, b);
    }

    #[test]
    fn test_uniform_draws_include_both_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(uniform(&mut rng, (0.02, 0.02)), 0.02);
        for _ in 0..1000 {
            let x = uniform(&mut rng, (-0.05, 0.08));
            assert!((-0.05..=0.08).contains(&x));
        }
    }

    #[test]
    fn test_forecast_points_are_consistent_and_bounded() {
        let crop = tomato();
        let mut forecaster = PriceForecaster::seeded(1);
        for seed_month in 1..=12 {
            let ctx = ForecastContext::starting(date(2025, seed_month, 1));
            for point in forecaster.forecast(&crop, &ctx) {
                assert!(point.is_consistent(), "inconsistent point {:?}", point);
                // worst case -17% / best case +20%
                assert!(point.price_change_percentage >= -17.0);
                assert!(point.price_change_percentage <= 20.0);
                assert!(point.forecasted_price >= 0.0);
            }
        }
    }

    #[test]
    fn test_first_month_has_no_market_adjustment() {
        // index 0 weights the market term by 0/6, so only base + climate apply
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let moved = price_move(&mut rng, 10.0, 0, ClimateImpact::Neutral, MarketTrend::Rising);
            assert!(moved.change_percentage >= -5.0 && moved.change_percentage <= 8.0);
        }
    }

    #[test]
    fn test_trend_seeds_use_all_labels() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.extend(market_trend_seeds(&mut rng));
        }
        assert_eq!(seen.len(), 3);
    }
}
