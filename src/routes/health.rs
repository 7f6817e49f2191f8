use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    database: String,
    version: String,
}

/// Health check endpoint
///
/// Returns the health status of the API and its dependencies
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_status = match crate::db::health_check(&state.pool).await {
        Ok(_) => "connected".to_string(),
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            "disconnected".to_string()
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        database: db_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
