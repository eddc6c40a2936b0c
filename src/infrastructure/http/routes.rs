//! HTTP Routes
//!
//! API Endpoints:
//! - /api/generate-script            POST  Generate a narration script
//! - /api/generate-audio-with-timing POST  Synthesize narration with timings
//! - /api/search-media               GET   Search stock media
//! - /api/generate-subtitles         POST  Chunk timed segments into WebVTT
//! - /api/health                     GET   Provider status + cache stats

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate-script", post(handlers::generate_script))
        .route(
            "/generate-audio-with-timing",
            post(handlers::generate_audio_with_timing),
        )
        .route("/search-media", get(handlers::search_media))
        .route("/generate-subtitles", post(handlers::generate_subtitles))
        .route("/health", get(handlers::health))
}
