//! Recommendation sessions: submit an observation, rank crops, persist the
//! result and refresh each recommended crop's price forecast

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{AppError, AppResult};
use crate::models::{to_decimal, to_f64, ObservationInput, PriceForecastPoint, ScoredCandidate};
use crate::services::catalog::CatalogService;
use crate::services::forecast::{forecaster_for, ForecastLocks, ForecastService};
use shared::{validate_observation, ForecastContext, RecommendationRanker};

/// Recommendation service
#[derive(Clone)]
pub struct RecommendationService {
    db: PgPool,
    locks: ForecastLocks,
}

/// Stored recommendation request
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RecommendationRecord {
    pub id: Uuid,
    pub region: String,
    pub farm_area_hectares: Decimal,
    pub soil_ph: Decimal,
    pub temperature: Decimal,
    pub rainfall: Option<Decimal>,
    pub nitrogen: Option<Decimal>,
    pub phosphorus: Option<Decimal>,
    pub potassium: Option<Decimal>,
    pub humidity: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// Recommended crop joined with its crop name
#[derive(Debug, Clone, sqlx::FromRow)]
struct RecommendedCropRow {
    crop_id: Uuid,
    crop_name: String,
    suitability_score: Decimal,
    expected_yield: Decimal,
    expected_profit: Decimal,
}

/// Response to a submitted observation
#[derive(Debug, Clone, Serialize)]
pub struct SubmittedRecommendation {
    pub id: Uuid,
    pub recommended_crops: Vec<ScoredCandidate>,
}

/// One recommended crop with its forecast
#[derive(Debug, Clone, Serialize)]
pub struct RecommendedCropView {
    #[serde(flatten)]
    pub candidate: ScoredCandidate,
    pub forecasts: Vec<PriceForecastPoint>,
}

/// Result view of a stored recommendation
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResult {
    pub recommendation: RecommendationRecord,
    pub recommended_crops: Vec<RecommendedCropView>,
}

fn optional_decimal(value: Option<f64>) -> AppResult<Option<Decimal>> {
    value.map(to_decimal).transpose()
}

impl RecommendationService {
    /// Create a new RecommendationService instance
    pub fn new(db: PgPool, locks: ForecastLocks) -> Self {
        Self { db, locks }
    }

    /// Validate, rank, persist and refresh forecasts for an observation
    #[instrument(skip(self, observation, engine), fields(region = %observation.region))]
    pub async fn submit(
        &self,
        observation: ObservationInput,
        engine: &EngineConfig,
    ) -> AppResult<SubmittedRecommendation> {
        validate_observation(&observation)?;

        let catalog = CatalogService::new(self.db.clone())
            .region_catalog(&observation.region)
            .await?;
        let ranker = RecommendationRanker::default().with_display_limit(engine.display_limit);
        let recommended = ranker.top(&catalog, &observation);

        let mut tx = self.db.begin().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO crop_recommendations (
                region, farm_area_hectares, soil_ph, temperature, rainfall,
                nitrogen, phosphorus, potassium, humidity
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&observation.region)
        .bind(to_decimal(observation.farm_area_hectares)?)
        .bind(to_decimal(observation.soil_ph)?)
        .bind(to_decimal(observation.temperature)?)
        .bind(optional_decimal(observation.rainfall)?)
        .bind(optional_decimal(observation.nitrogen)?)
        .bind(optional_decimal(observation.phosphorus)?)
        .bind(optional_decimal(observation.potassium)?)
        .bind(optional_decimal(observation.humidity)?)
        .fetch_one(&mut *tx)
        .await?;

        for candidate in &recommended {
            sqlx::query(
                r#"
                INSERT INTO recommended_crops (
                    recommendation_id, crop_id, suitability_score, expected_yield, expected_profit
                )
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(id)
            .bind(candidate.crop_id)
            .bind(to_decimal(candidate.suitability_score)?)
            .bind(to_decimal(candidate.expected_yield)?)
            .bind(to_decimal(candidate.expected_profit)?)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let forecasts = ForecastService::new(self.db.clone(), self.locks.clone());
        let mut forecaster = forecaster_for(engine);
        let context = ForecastContext {
            start: Utc::now().date_naive(),
            region: Some(observation.region.clone()),
            temperature: Some(observation.temperature),
            rainfall: observation.rainfall,
        };

        for candidate in &recommended {
            let crop = catalog
                .crops()
                .iter()
                .find(|c| c.id == candidate.crop_id)
                .ok_or_else(|| AppError::NotFound("Crop".to_string()))?;
            forecasts.regenerate(crop, &context, &mut forecaster).await?;
        }

        info!(
            recommendation_id = %id,
            recommended = recommended.len(),
            "Recommendation stored"
        );

        Ok(SubmittedRecommendation {
            id,
            recommended_crops: recommended,
        })
    }

    /// Stored recommendation with crops by score and their forecasts
    pub async fn get_result(&self, recommendation_id: Uuid) -> AppResult<RecommendationResult> {
        let recommendation = sqlx::query_as::<_, RecommendationRecord>(
            r#"
            SELECT id, region, farm_area_hectares, soil_ph, temperature, rainfall,
                   nitrogen, phosphorus, potassium, humidity, created_at
            FROM crop_recommendations
            WHERE id = $1
            "#,
        )
        .bind(recommendation_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Recommendation".to_string()))?;

        let rows = sqlx::query_as::<_, RecommendedCropRow>(
            r#"
            SELECT rc.crop_id, c.name AS crop_name, rc.suitability_score,
                   rc.expected_yield, rc.expected_profit
            FROM recommended_crops rc
            JOIN crops c ON c.id = rc.crop_id
            WHERE rc.recommendation_id = $1
            ORDER BY rc.suitability_score DESC, rc.expected_profit DESC
            "#,
        )
        .bind(recommendation_id)
        .fetch_all(&self.db)
        .await?;

        let forecasts = ForecastService::new(self.db.clone(), self.locks.clone());
        let mut recommended_crops = Vec::with_capacity(rows.len());
        for row in rows {
            let points = forecasts.forecasts_for(row.crop_id).await?;
            recommended_crops.push(RecommendedCropView {
                candidate: ScoredCandidate {
                    crop_id: row.crop_id,
                    crop_name: row.crop_name,
                    suitability_score: to_f64(row.suitability_score),
                    expected_yield: to_f64(row.expected_yield),
                    expected_profit: to_f64(row.expected_profit),
                },
                forecasts: points,
            });
        }

        Ok(RecommendationResult {
            recommendation,
            recommended_crops,
        })
    }
}
