use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Which outbound AI services have credentials. Missing ones make their
    /// endpoints answer 503 (or fall back) rather than fail startup.
    pub providers: ProviderStatus,
}

#[derive(Serialize)]
pub struct ProviderStatus {
    pub chat: bool,
    pub images: bool,
    pub render: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = agencia_db::health_check(&state.pool).await.is_ok();
    let ai = &state.config.ai;

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        providers: ProviderStatus {
            chat: ai.chat.api_key.is_some(),
            images: ai.images.api_key.is_some(),
            render: ai.render.user_id.is_some() && ai.render.api_key.is_some(),
        },
    })
}

/// Mounted at the root, outside `/api`, and unauthenticated.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
