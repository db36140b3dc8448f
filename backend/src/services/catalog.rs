//! Crop catalog service: browsing, region snapshots and CSV seeding

use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{to_decimal, to_f64, CropProfile, ToleranceRange};
use shared::InMemoryCatalog;

/// Catalog service over the `crops` table
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

/// Crop row as stored
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CropRow {
    pub id: Uuid,
    pub name: String,
    pub scientific_name: Option<String>,
    pub category: String,
    pub season: String,
    pub min_temperature: Decimal,
    pub max_temperature: Decimal,
    pub min_rainfall: Decimal,
    pub max_rainfall: Decimal,
    pub min_ph: Decimal,
    pub max_ph: Decimal,
    pub growing_period_days: i32,
    pub suitable_regions: String,
    pub yield_per_hectare: Decimal,
    pub market_price_per_kg: Decimal,
}

impl From<CropRow> for CropProfile {
    fn from(row: CropRow) -> Self {
        CropProfile {
            id: row.id,
            name: row.name,
            scientific_name: row.scientific_name,
            category: row.category,
            season: row.season,
            temperature: ToleranceRange::new(to_f64(row.min_temperature), to_f64(row.max_temperature)),
            rainfall: ToleranceRange::new(to_f64(row.min_rainfall), to_f64(row.max_rainfall)),
            soil_ph: ToleranceRange::new(to_f64(row.min_ph), to_f64(row.max_ph)),
            growing_period_days: row.growing_period_days,
            suitable_regions: row.suitable_regions,
            yield_per_hectare: to_f64(row.yield_per_hectare),
            market_price_per_kg: to_f64(row.market_price_per_kg),
        }
    }
}

/// One line of a catalog seed file
#[derive(Debug, Clone, Deserialize)]
pub struct CropCsvRecord {
    pub name: String,
    pub scientific_name: Option<String>,
    pub category: String,
    pub season: String,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub min_rainfall: f64,
    pub max_rainfall: f64,
    pub min_ph: f64,
    pub max_ph: f64,
    pub growing_period_days: i32,
    pub suitable_regions: String,
    pub yield_per_hectare: f64,
    pub market_price_per_kg: f64,
}

impl CropCsvRecord {
    fn check(&self, line: usize) -> AppResult<()> {
        let reject = |message: &str| {
            Err(AppError::CatalogImport(format!(
                "line {} ({}): {}",
                line, self.name, message
            )))
        };

        if self.name.trim().is_empty() {
            return reject("name is empty");
        }
        if self.min_temperature > self.max_temperature
            || self.min_rainfall > self.max_rainfall
            || self.min_ph > self.max_ph
        {
            return reject("range minimum exceeds maximum");
        }
        if self.growing_period_days <= 0 {
            return reject("growing period must be positive");
        }
        if self.yield_per_hectare < 0.0 || self.market_price_per_kg < 0.0 {
            return reject("yield and price cannot be negative");
        }
        Ok(())
    }
}

/// Parse and check every record of a catalog CSV
pub fn parse_crop_csv<R: Read>(reader: R) -> AppResult<Vec<CropCsvRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut records = Vec::new();
    for (idx, result) in csv_reader.deserialize::<CropCsvRecord>().enumerate() {
        // header is line 1
        let line = idx + 2;
        let record = result.map_err(|e| AppError::CatalogImport(format!("line {}: {}", line, e)))?;
        record.check(line)?;
        records.push(record);
    }
    Ok(records)
}

const CROP_COLUMNS: &str = r#"
    id, name, scientific_name, category, season,
    min_temperature, max_temperature, min_rainfall, max_rainfall, min_ph, max_ph,
    growing_period_days, suitable_regions, yield_per_hectare, market_price_per_kg
"#;

/// Crops growing in `$1`, in the order they were inserted
fn region_catalog_query() -> String {
    format!(
        "SELECT {} FROM crops WHERE strpos(suitable_regions, $1) > 0 ORDER BY catalog_order ASC",
        CROP_COLUMNS
    )
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// All crops ordered by name
    pub async fn list_crops(&self) -> AppResult<Vec<CropProfile>> {
        let rows = sqlx::query_as::<_, CropRow>(&format!(
            "SELECT {} FROM crops ORDER BY name ASC",
            CROP_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(CropProfile::from).collect())
    }

    /// One crop by id
    pub async fn get_crop(&self, crop_id: Uuid) -> AppResult<CropProfile> {
        let row = sqlx::query_as::<_, CropRow>(&format!(
            "SELECT {} FROM crops WHERE id = $1",
            CROP_COLUMNS
        ))
        .bind(crop_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Crop".to_string()))?;

        Ok(row.into())
    }

    /// Snapshot of the crops whose region list contains `region`, in
    /// insertion order
    #[instrument(skip(self))]
    pub async fn region_catalog(&self, region: &str) -> AppResult<InMemoryCatalog> {
        let rows = sqlx::query_as::<_, CropRow>(&region_catalog_query())
            .bind(region)
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(CropProfile::from).collect())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM crops")
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }

    /// Insert parsed records in one transaction; existing names are skipped
    pub async fn import(&self, records: &[CropCsvRecord]) -> AppResult<u64> {
        let mut tx = self.db.begin().await?;
        let mut inserted = 0;

        for record in records {
            let result = sqlx::query(
                r#"
                INSERT INTO crops (
                    name, scientific_name, category, season,
                    min_temperature, max_temperature, min_rainfall, max_rainfall,
                    min_ph, max_ph, growing_period_days, suitable_regions,
                    yield_per_hectare, market_price_per_kg
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(&record.name)
            .bind(&record.scientific_name)
            .bind(&record.category)
            .bind(&record.season)
            .bind(to_decimal(record.min_temperature)?)
            .bind(to_decimal(record.max_temperature)?)
            .bind(to_decimal(record.min_rainfall)?)
            .bind(to_decimal(record.max_rainfall)?)
            .bind(to_decimal(record.min_ph)?)
            .bind(to_decimal(record.max_ph)?)
            .bind(record.growing_period_days)
            .bind(&record.suitable_regions)
            .bind(to_decimal(record.yield_per_hectare)?)
            .bind(to_decimal(record.market_price_per_kg)?)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Import `path` when the crop table is empty
    #[instrument(skip(self))]
    pub async fn seed_if_empty(&self, path: &Path) -> AppResult<u64> {
        if self.count().await? > 0 {
            return Ok(0);
        }

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Crop catalog is empty and seed file {} is unreadable: {}", path.display(), e);
                return Ok(0);
            }
        };

        let records = parse_crop_csv(bytes.as_slice())?;
        let inserted = self.import(&records).await?;
        info!("Seeded {} crops from {}", inserted, path.display());
        Ok(inserted)
    }
}
