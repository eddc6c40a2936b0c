//! Fake Speech Client
//!
//! Test double for the speech synthesizer: returns a fixed base64 payload or
//! a scripted failure, without touching the network.

use async_trait::async_trait;

use crate::application::ports::{
    SpeechSynthesizerPort, SynthesisError, SynthesisRequest, SynthesisResponse,
};

/// Fake speech client configuration
#[derive(Debug, Clone)]
pub struct FakeSpeechClientConfig {
    /// Fixed payload returned for every request
    pub audio_base64: String,
    /// When true, every call fails with a service error
    pub always_fail: bool,
}

impl Default for FakeSpeechClientConfig {
    fn default() -> Self {
        Self {
            // Large enough to be treated as real audio by the timing engine
            audio_base64: "A".repeat(48000),
            always_fail: false,
        }
    }
}

/// Fake speech client
pub struct FakeSpeechClient {
    config: FakeSpeechClientConfig,
}

impl FakeSpeechClient {
    pub fn new(config: FakeSpeechClientConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeSpeechClientConfig::default())
    }

    pub fn failing() -> Self {
        Self::new(FakeSpeechClientConfig {
            always_fail: true,
            ..Default::default()
        })
    }
}

#[async_trait]
impl SpeechSynthesizerPort for FakeSpeechClient {
    async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesisResponse, SynthesisError> {
        tracing::debug!(
            text_len = request.text.len(),
            voice = %request.voice,
            "FakeSpeechClient: returning fixed audio"
        );

        if self.config.always_fail {
            return Err(SynthesisError::ServiceError(
                "fake synthesis failure".to_string(),
            ));
        }

        Ok(SynthesisResponse {
            audio_base64: self.config.audio_base64.clone(),
        })
    }
}
