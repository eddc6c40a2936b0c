//! Subtitle generation handler

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::application::GenerateSubtitlesCommand;
use crate::infrastructure::http::dto::{GenerateSubtitlesRequest, SubtitlesResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// POST /api/generate-subtitles
pub async fn generate_subtitles(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateSubtitlesRequest>,
) -> Result<Json<SubtitlesResponse>, ApiError> {
    let segments = request
        .segments
        .into_iter()
        .map(|s| s.into_domain())
        .collect();

    let track = state
        .generate_subtitles_handler
        .handle(GenerateSubtitlesCommand { segments })?;

    Ok(Json(SubtitlesResponse {
        success: true,
        cues: track.cues,
        vtt: track.vtt,
    }))
}
