//! Recommendation and forecasting engine

pub mod allocation;
pub mod estimator;
pub mod forecast;
pub mod ranking;
pub mod store;
pub mod suitability;

pub use allocation::{LandAllocator, DEFAULT_TOP_K};
pub use estimator::{
    efficiency_factor, estimate, estimate_for_prediction, estimate_for_ranking, expected_profit,
    expected_revenue, YieldEstimate, PROFIT_MARGIN,
};
pub use forecast::{
    climate_impacts, climate_pattern, market_trend_seeds, price_move, transition_weights,
    ForecastContext, PriceForecaster, PriceMove, FORECAST_HORIZON,
};
pub use ranking::{RecommendationRanker, YieldPredictor, DISPLAY_LIMIT};
pub use store::{regenerate_forecasts, ForecastStore, InMemoryForecastStore};
pub use suitability::{
    FactorScores, GaussianDensity, PiecewisePenalty, SuitabilityStrategy, MIN_RECOMMENDABLE_SCORE,
};
