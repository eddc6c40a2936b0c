//! Script Generator Port
//!
//! Abstract interface over the LLM that writes narration scripts; the
//! concrete implementation lives in infrastructure/adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::script::GeneratedScript;

/// Script generation error
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Script Generator Port
#[async_trait]
pub trait ScriptGeneratorPort: Send + Sync {
    /// Generate a narration script for the given topic prompt
    async fn generate(&self, prompt: &str) -> Result<GeneratedScript, ScriptError>;
}
