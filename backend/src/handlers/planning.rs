//! Yield prediction and land allocation HTTP handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::models::ObservationInput;
use crate::services::planning::AllocationInput;
use crate::services::PlanningService;
use crate::AppState;

/// Predicted yield and profit for every crop grown in the region
pub async fn predict_yields(
    State(state): State<AppState>,
    Json(input): Json<ObservationInput>,
) -> impl IntoResponse {
    let service = PlanningService::new(state.db.clone());

    match service.predict_yields(&input).await {
        Ok(predictions) => {
            (StatusCode::OK, Json(serde_json::json!({ "predictions": predictions }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Allocate the farm area over the top predictions
pub async fn allocate_land(
    State(state): State<AppState>,
    Json(input): Json<AllocationInput>,
) -> impl IntoResponse {
    let service = PlanningService::new(state.db.clone());

    match service.allocate(input, state.config.engine.allocation_top_k).await {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(e) => e.into_response(),
    }
}
