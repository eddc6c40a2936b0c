//! Health check handler

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;

use crate::infrastructure::http::dto::{CacheStatsResponse, HealthResponse};
use crate::infrastructure::http::state::AppState;

/// GET /api/health
///
/// Reports which provider credentials are configured and the live cache
/// statistics. Always 200; clients inspect the `apis` flags.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
        apis: state.provider_status,
        cache_stats: CacheStatsResponse {
            scripts: state.cache.script_stats(),
            media: state.cache.media_stats(),
            audio: state.cache.audio_stats(),
        },
    })
}
