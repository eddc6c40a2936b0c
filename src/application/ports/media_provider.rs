//! Media Provider Port
//!
//! Abstract interface over stock media search providers. Each provider
//! implements the same search capability; the orchestrator iterates an
//! ordered chain of providers and stops at the first non-empty result set.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::media::{MediaItem, MediaType};

/// Media search error
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// One media search request against one provider
#[derive(Debug, Clone)]
pub struct MediaQuery {
    /// Free-text search query
    pub query: String,
    /// Kind of media wanted
    pub media_type: MediaType,
    /// Desired clip duration in seconds (videos only)
    pub target_duration: Option<f64>,
    /// Number of results wanted
    pub count: usize,
}

/// Media Provider Port
#[async_trait]
pub trait MediaProviderPort: Send + Sync {
    /// Provider name for logging and result attribution
    fn name(&self) -> &'static str;

    /// Search the provider; an empty vec is a normal outcome
    async fn search(&self, query: &MediaQuery) -> Result<Vec<MediaItem>, MediaError>;
}
