use axum::{Json, extract::State};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `UP` while the process serves requests
    pub status: String,
    /// `up` or `down`
    pub database: String,
    pub timestamp: String,
}

/// Health check endpoint
///
/// Always 200; the database field reports whether a ping succeeded.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse),
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.db.ping().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::warn!("Database ping failed: {e}");
            "down"
        }
    };

    Json(HealthResponse {
        status: "UP".to_string(),
        database: database.to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
