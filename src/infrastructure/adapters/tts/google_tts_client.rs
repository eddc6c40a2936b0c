//! Google TTS Client
//!
//! Implements SpeechSynthesizerPort via the Google Cloud Text-to-Speech REST
//! API. Returns the base64 `audioContent` payload untouched; duration
//! estimation happens in the timing engine, not here.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    SpeechSynthesizerPort, SynthesisError, SynthesisRequest, SynthesisResponse,
};

/// Google TTS client configuration
#[derive(Debug, Clone)]
pub struct GoogleTtsClientConfig {
    pub api_key: String,
    pub base_url: String,
    /// BCP-47 language code sent with every request
    pub language_code: String,
    pub timeout_secs: u64,
}

impl GoogleTtsClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://texttospeech.googleapis.com".to_string(),
            language_code: "pt-BR".to_string(),
            timeout_secs: 30,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeHttpRequest {
    input: SynthesisInput,
    voice: VoiceSelection,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection {
    language_code: String,
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    speaking_rate: f64,
    pitch: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeHttpResponse {
    audio_content: String,
}

/// Google TTS client
pub struct GoogleTtsClient {
    client: Client,
    config: GoogleTtsClientConfig,
}

impl GoogleTtsClient {
    pub fn new(config: GoogleTtsClientConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn synthesize_url(&self) -> String {
        format!(
            "{}/v1/text:synthesize?key={}",
            self.config.base_url, self.config.api_key
        )
    }
}

#[async_trait]
impl SpeechSynthesizerPort for GoogleTtsClient {
    async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesisResponse, SynthesisError> {
        let http_request = SynthesizeHttpRequest {
            input: SynthesisInput {
                text: request.text.clone(),
            },
            voice: VoiceSelection {
                language_code: self.config.language_code.clone(),
                name: request.voice.clone(),
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
                speaking_rate: request.speaking_rate,
                pitch: 0.0,
            },
        };

        tracing::debug!(
            voice = %request.voice,
            speaking_rate = request.speaking_rate,
            text_len = request.text.len(),
            "Sending TTS synthesize request"
        );
        let started = std::time::Instant::now();

        let response = self
            .client
            .post(self.synthesize_url())
            .json(&http_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthesisError::Timeout
                } else if e.is_connect() {
                    SynthesisError::NetworkError(format!("Cannot connect to Google TTS: {}", e))
                } else {
                    SynthesisError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SynthesisError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: SynthesizeHttpResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(e.to_string()))?;

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            audio_chars = body.audio_content.len(),
            "TTS synthesis completed"
        );

        Ok(SynthesisResponse {
            audio_base64: body.audio_content,
        })
    }
}
