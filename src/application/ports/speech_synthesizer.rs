//! Speech Synthesizer Port
//!
//! Abstract interface over the text-to-speech collaborator; the concrete
//! implementation lives in infrastructure/adapters.

use async_trait::async_trait;
use thiserror::Error;

/// Speech synthesis error
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Speech synthesis request
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// Text to synthesize
    pub text: String,
    /// Voice name (e.g. "pt-BR-Wavenet-A")
    pub voice: String,
    /// Speaking rate multiplier
    pub speaking_rate: f64,
}

/// Speech synthesis response
#[derive(Debug, Clone)]
pub struct SynthesisResponse {
    /// Base64 audio payload as returned by the provider
    pub audio_base64: String,
}

/// Speech Synthesizer Port
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// Synthesize one text segment into audio
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, SynthesisError>;
}
