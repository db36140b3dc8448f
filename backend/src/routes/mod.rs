//! Route definitions for the Agri Advisor service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/crops", crop_routes())
        .nest("/recommendations", recommendation_routes())
        .route("/yield-predictions", post(handlers::predict_yields))
        .route("/allocations", post(handlers::allocate_land))
}

/// Crop catalog and forecast routes
fn crop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_crops))
        .route("/:crop_id", get(handlers::get_crop))
        .route(
            "/:crop_id/forecasts",
            get(handlers::get_crop_forecasts).post(handlers::regenerate_crop_forecasts),
        )
}

/// Recommendation routes
fn recommendation_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_recommendation))
        .route("/:recommendation_id", get(handlers::get_recommendation))
}
