//! Crop catalog and forecast HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::services::forecast::forecaster_for;
use crate::services::{CatalogService, ForecastService};
use crate::AppState;
use shared::ForecastContext;

/// Optional conditions for a forecast run
#[derive(Debug, Default, Deserialize)]
pub struct RegenerateForecastInput {
    pub region: Option<String>,
    pub temperature: Option<f64>,
    pub rainfall: Option<f64>,
}

/// List all crops ordered by name
pub async fn list_crops(State(state): State<AppState>) -> impl IntoResponse {
    let service = CatalogService::new(state.db.clone());

    match service.list_crops().await {
        Ok(crops) => (StatusCode::OK, Json(serde_json::json!({ "crops": crops }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific crop
pub async fn get_crop(State(state): State<AppState>, Path(crop_id): Path<Uuid>) -> impl IntoResponse {
    let service = CatalogService::new(state.db.clone());

    match service.get_crop(crop_id).await {
        Ok(crop) => (StatusCode::OK, Json(crop)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Stored forecasts for a crop
pub async fn get_crop_forecasts(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
) -> impl IntoResponse {
    let catalog = CatalogService::new(state.db.clone());
    if let Err(e) = catalog.get_crop(crop_id).await {
        return e.into_response();
    }

    let service = ForecastService::new(state.db.clone(), state.forecast_locks.clone());
    match service.forecasts_for(crop_id).await {
        Ok(forecasts) => {
            (StatusCode::OK, Json(serde_json::json!({ "forecasts": forecasts }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Replace a crop's forecasts with a fresh six-month run
pub async fn regenerate_crop_forecasts(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
    input: Option<Json<RegenerateForecastInput>>,
) -> impl IntoResponse {
    let crop = match CatalogService::new(state.db.clone()).get_crop(crop_id).await {
        Ok(crop) => crop,
        Err(e) => return e.into_response(),
    };

    let input = input.map(|Json(input)| input).unwrap_or_default();
    let context = ForecastContext {
        start: Utc::now().date_naive(),
        region: input.region,
        temperature: input.temperature,
        rainfall: input.rainfall,
    };

    let service = ForecastService::new(state.db.clone(), state.forecast_locks.clone());
    let mut forecaster = forecaster_for(&state.config.engine);

    match service.regenerate(&crop, &context, &mut forecaster).await {
        Ok(forecasts) => {
            (StatusCode::CREATED, Json(serde_json::json!({ "forecasts": forecasts }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}
