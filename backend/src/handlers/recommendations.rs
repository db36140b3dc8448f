//! Recommendation HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::models::ObservationInput;
use crate::services::RecommendationService;
use crate::AppState;

/// Submit farm readings and store the ranked recommendation
pub async fn create_recommendation(
    State(state): State<AppState>,
    Json(input): Json<ObservationInput>,
) -> impl IntoResponse {
    let service = RecommendationService::new(state.db.clone(), state.forecast_locks.clone());

    match service.submit(input, &state.config.engine).await {
        Ok(submitted) => (StatusCode::CREATED, Json(submitted)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a stored recommendation with forecasts
pub async fn get_recommendation(
    State(state): State<AppState>,
    Path(recommendation_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = RecommendationService::new(state.db.clone(), state.forecast_locks.clone());

    match service.get_result(recommendation_id).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => e.into_response(),
    }
}
