//! Liveness and readiness probes

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

const SERVICE: &str = "campus-sentinel";

#[derive(Serialize)]
pub struct HealthResponse {
    service: &'static str,
    status: &'static str,
    version: &'static str,
    timestamp: i64,
}

impl HealthResponse {
    fn with_status(status: &'static str) -> Self {
        Self {
            service: SERVICE,
            status,
            version: env!("CARGO_PKG_VERSION"),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Process is up. Never touches the database.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse::with_status("healthy"))
}

/// Database reachable; 503 otherwise
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (StatusCode::OK, Json(HealthResponse::with_status("ready"))),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(HealthResponse::with_status("unavailable")))
        }
    }
}
