//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::services::CatalogService;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
    /// Crops in the catalog; absent when the database is unreachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_size: Option<i64>,
}

/// Reports service version, database connectivity and catalog size
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog_size = CatalogService::new(state.db.clone()).count().await.ok();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        database: if catalog_size.is_some() { "connected" } else { "disconnected" },
        catalog_size,
    })
}
