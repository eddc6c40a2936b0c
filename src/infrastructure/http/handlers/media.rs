//! Media search handler

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::application::{FieldError, SearchMediaCommand};
use crate::domain::media::MediaType;
use crate::infrastructure::http::dto::{MediaResponse, SearchMediaParams};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// GET /api/search-media
pub async fn search_media(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchMediaParams>,
) -> Result<Json<MediaResponse>, ApiError> {
    let media_type: MediaType = params.media_type.parse().map_err(|message| {
        ApiError::Validation(vec![FieldError {
            field: "tipo".to_string(),
            message,
        }])
    })?;

    let media = state
        .search_media_handler
        .handle(SearchMediaCommand {
            keywords: params.keyword_list(),
            media_type,
            target_duration: params.target_duration,
            count: params.count,
        })
        .await?;

    Ok(Json(MediaResponse {
        success: true,
        media,
    }))
}
