//! Price forecast persistence
//!
//! Regeneration deletes a crop's stored forecasts and inserts the new run in
//! one transaction. A per-crop async lock serializes regenerations of the
//! same crop inside this process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{AppError, AppResult};
use crate::models::{to_decimal, to_f64, ClimateImpact, CropProfile, MarketTrend, PriceForecastPoint};
use shared::{ForecastContext, PriceForecaster};

/// Per-crop regeneration locks shared across requests
#[derive(Clone, Default)]
pub struct ForecastLocks {
    inner: Arc<Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>>,
}

impl ForecastLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock handle for `crop_id`, created on first use
    pub fn for_crop(&self, crop_id: Uuid) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(crop_id).or_default().clone()
    }
}

/// Forecaster for one request: seeded when the engine config fixes a seed
pub fn forecaster_for(config: &EngineConfig) -> PriceForecaster<StdRng> {
    match config.forecast_seed {
        Some(seed) => PriceForecaster::seeded(seed),
        None => PriceForecaster::from_entropy(),
    }
}

/// Forecast service over `crop_price_forecasts`
#[derive(Clone)]
pub struct ForecastService {
    db: PgPool,
    locks: ForecastLocks,
}

/// Forecast row as stored
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ForecastRow {
    pub crop_id: Uuid,
    pub month: i32,
    pub year: i32,
    pub forecasted_price: Decimal,
    pub price_change_percentage: Decimal,
    pub climate_impact: String,
    pub market_trend: String,
}

impl TryFrom<ForecastRow> for PriceForecastPoint {
    type Error = AppError;

    fn try_from(row: ForecastRow) -> Result<Self, Self::Error> {
        let climate_impact = ClimateImpact::parse(&row.climate_impact)
            .ok_or_else(|| AppError::Internal(format!("Unknown climate impact '{}'", row.climate_impact)))?;
        let market_trend = MarketTrend::parse(&row.market_trend)
            .ok_or_else(|| AppError::Internal(format!("Unknown market trend '{}'", row.market_trend)))?;
        let month = u32::try_from(row.month)
            .map_err(|_| AppError::Internal(format!("Invalid forecast month {}", row.month)))?;

        Ok(PriceForecastPoint {
            crop_id: row.crop_id,
            month,
            year: row.year,
            forecasted_price: to_f64(row.forecasted_price),
            price_change_percentage: to_f64(row.price_change_percentage),
            climate_impact,
            market_trend,
        })
    }
}

impl ForecastService {
    /// Create a new ForecastService instance
    pub fn new(db: PgPool, locks: ForecastLocks) -> Self {
        Self { db, locks }
    }

    /// Stored forecasts for a crop ordered by (year, month)
    pub async fn forecasts_for(&self, crop_id: Uuid) -> AppResult<Vec<PriceForecastPoint>> {
        let rows = sqlx::query_as::<_, ForecastRow>(
            r#"
            SELECT crop_id, month, year, forecasted_price, price_change_percentage,
                   climate_impact, market_trend
            FROM crop_price_forecasts
            WHERE crop_id = $1
            ORDER BY year ASC, month ASC
            LIMIT $2
            "#,
        )
        .bind(crop_id)
        .bind(shared::FORECAST_HORIZON as i64)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(PriceForecastPoint::try_from).collect()
    }

    /// Generate a new run for `crop` and replace its stored forecasts
    #[instrument(skip(self, crop, context, forecaster), fields(crop = %crop.name))]
    pub async fn regenerate(
        &self,
        crop: &CropProfile,
        context: &ForecastContext,
        forecaster: &mut PriceForecaster<StdRng>,
    ) -> AppResult<Vec<PriceForecastPoint>> {
        let lock = self.locks.for_crop(crop.id);
        let _guard = lock.lock().await;

        let points = forecaster.forecast(crop, context);
        self.replace(crop.id, &points).await?;

        debug!(points = points.len(), "Replaced stored forecasts");
        Ok(points)
    }

    async fn replace(&self, crop_id: Uuid, points: &[PriceForecastPoint]) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM crop_price_forecasts WHERE crop_id = $1")
            .bind(crop_id)
            .execute(&mut *tx)
            .await?;

        for point in points {
            sqlx::query(
                r#"
                INSERT INTO crop_price_forecasts (
                    crop_id, month, year, forecasted_price, price_change_percentage,
                    climate_impact, market_trend
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(crop_id)
            .bind(point.month as i32)
            .bind(point.year)
            .bind(to_decimal(point.forecasted_price)?)
            .bind(to_decimal(point.price_change_percentage)?)
            .bind(point.climate_impact.as_str())
            .bind(point.market_trend.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(climate: &str, trend: &str) -> ForecastRow {
        ForecastRow {
            crop_id: Uuid::new_v4(),
            month: 11,
            year: 2026,
            forecasted_price: Decimal::new(2614, 2),
            price_change_percentage: Decimal::new(457, 2),
            climate_impact: climate.to_string(),
            market_trend: trend.to_string(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let point = PriceForecastPoint::try_from(row("positive", "rising")).unwrap();
        assert_eq!(point.month, 11);
        assert_eq!(point.forecasted_price, 26.14);
        assert_eq!(point.climate_impact, ClimateImpact::Positive);
        assert!(point.is_consistent());
    }

    #[test]
    fn test_unknown_labels_rejected() {
        assert!(PriceForecastPoint::try_from(row("sunny", "rising")).is_err());
        assert!(PriceForecastPoint::try_from(row("neutral", "sideways")).is_err());
    }

    #[test]
    fn test_same_crop_shares_one_lock() {
        let locks = ForecastLocks::new();
        let crop_id = Uuid::new_v4();
        let a = locks.for_crop(crop_id);
        let b = locks.for_crop(crop_id);
        let other = locks.for_crop(Uuid::new_v4());
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &other));
    }

    #[test]
    fn test_lock_serializes_holders() {
        let locks = ForecastLocks::new();
        let crop_id = Uuid::new_v4();
        let lock = locks.for_crop(crop_id);

        tokio_test::block_on(async {
            let guard = lock.lock().await;
            assert!(locks.for_crop(crop_id).try_lock().is_err());
            drop(guard);
            assert!(locks.for_crop(crop_id).try_lock().is_ok());
        });
    }

    #[test]
    fn test_seeded_config_gives_repeatable_forecaster() {
        let config = EngineConfig {
            display_limit: 5,
            allocation_top_k: 5,
            forecast_seed: Some(7),
        };
        let crop = CropProfile {
            id: Uuid::new_v4(),
            name: "Rice".to_string(),
            scientific_name: None,
            category: "Cereal".to_string(),
            season: "Kharif".to_string(),
            temperature: crate::models::ToleranceRange::new(20.0, 35.0),
            rainfall: crate::models::ToleranceRange::new(100.0, 200.0),
            soil_ph: crate::models::ToleranceRange::new(5.5, 7.5),
            growing_period_days: 120,
            suitable_regions: "Punjab".to_string(),
            yield_per_hectare: 3.5,
            market_price_per_kg: 25.0,
        };
        let context = ForecastContext::starting(chrono::NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());

        let first = forecaster_for(&config).forecast(&crop, &context);
        let second = forecaster_for(&config).forecast(&crop, &context);
        assert_eq!(first, second);
    }
}
