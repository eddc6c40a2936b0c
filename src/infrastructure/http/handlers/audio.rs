//! Audio generation handler

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::application::GenerateAudioCommand;
use crate::infrastructure::http::dto::{AudioResponse, GenerateAudioRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// POST /api/generate-audio-with-timing
pub async fn generate_audio_with_timing(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateAudioRequest>,
) -> Result<Json<AudioResponse>, ApiError> {
    let track = state
        .generate_audio_handler
        .handle(GenerateAudioCommand {
            segments: request.segments,
            voice: request.voice,
            speaking_rate: request.speaking_rate,
        })
        .await?;

    Ok(Json(AudioResponse {
        success: true,
        full_audio: track.full_audio_base64,
        segments: track.segments,
        total_duration: track.total_duration,
    }))
}
