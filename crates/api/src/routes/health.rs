use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Service name reported by `/health`.
pub const SERVICE_NAME: &str = "pita";

/// Health of the site and the two things it cannot serve pages without.
#[derive(Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    /// `ok`, or `degraded` when either check fails.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether the media root is present, so uploads and `/media` work.
    pub media_healthy: bool,
    /// Name of the active mail backend.
    pub mailer: &'static str,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = pita_db::health_check(&state.pool).await.is_ok();
    let media_healthy = state.media.is_available().await;

    let status = if db_healthy && media_healthy {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        service: SERVICE_NAME,
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        media_healthy,
        mailer: state.mailer.name(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
