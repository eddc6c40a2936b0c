//! Script generation handler

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::application::GenerateScriptCommand;
use crate::infrastructure::http::dto::{GenerateScriptRequest, ScriptResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// POST /api/generate-script
pub async fn generate_script(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateScriptRequest>,
) -> Result<Json<ScriptResponse>, ApiError> {
    let script = state
        .generate_script_handler
        .handle(GenerateScriptCommand {
            prompt: request.prompt,
        })
        .await?;

    Ok(Json(ScriptResponse {
        success: true,
        script_data: script,
    }))
}
