//! Data Transfer Objects
//!
//! Request and response shapes for the public API. Wire field names keep the
//! backend's original Brazilian-Portuguese contract.

use serde::{Deserialize, Serialize};

use crate::domain::script::{GeneratedScript, ScriptSegment};
use crate::domain::subtitle::SubtitleCue;
use crate::domain::timing::AudioSegment;
use crate::infrastructure::cache::NamespaceStats;

// ============================================================================
// Script generation
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateScriptRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ScriptResponse {
    pub success: bool,
    #[serde(rename = "scriptData")]
    pub script_data: GeneratedScript,
}

// ============================================================================
// Audio generation
// ============================================================================

fn default_voice() -> String {
    "pt-BR-Wavenet-A".to_string()
}

fn default_speaking_rate() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
pub struct GenerateAudioRequest {
    #[serde(rename = "segmentos", default)]
    pub segments: Vec<ScriptSegment>,

    #[serde(default = "default_voice")]
    pub voice: String,

    #[serde(rename = "speakingRate", default = "default_speaking_rate")]
    pub speaking_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct AudioResponse {
    pub success: bool,

    /// Full track payload in base64
    #[serde(rename = "audioCompleto")]
    pub full_audio: String,

    #[serde(rename = "segmentos")]
    pub segments: Vec<AudioSegment>,

    #[serde(rename = "duracaoTotal")]
    pub total_duration: f64,
}

// ============================================================================
// Media search
// ============================================================================

fn default_media_type() -> String {
    "video".to_string()
}

fn default_count() -> usize {
    3
}

/// Query-string parameters of GET /api/search-media
#[derive(Debug, Deserialize)]
pub struct SearchMediaParams {
    /// Comma-separated keywords
    #[serde(default)]
    pub keywords: String,

    #[serde(rename = "tipo", default = "default_media_type")]
    pub media_type: String,

    #[serde(rename = "duracao", default)]
    pub target_duration: Option<f64>,

    #[serde(default = "default_count")]
    pub count: usize,
}

impl SearchMediaParams {
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords
            .split(',')
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct MediaResponse {
    pub success: bool,
    pub media: Vec<crate::domain::media::MediaItem>,
}

// ============================================================================
// Subtitle generation
// ============================================================================

/// One timed segment in a subtitle request
///
/// `fim` may be omitted; it then derives from `inicio + duracao`.
#[derive(Debug, Deserialize)]
pub struct SubtitleSegmentDto {
    #[serde(rename = "texto", default)]
    pub text: String,

    #[serde(rename = "inicio")]
    pub start_seconds: f64,

    #[serde(rename = "duracao")]
    pub duration_seconds: f64,

    #[serde(rename = "fim", default)]
    pub end_seconds: Option<f64>,
}

impl SubtitleSegmentDto {
    pub fn into_domain(self) -> AudioSegment {
        let end = self
            .end_seconds
            .unwrap_or(self.start_seconds + self.duration_seconds);
        AudioSegment {
            text: self.text,
            audio_base64: String::new(),
            start_seconds: self.start_seconds,
            duration_seconds: self.duration_seconds,
            end_seconds: end,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateSubtitlesRequest {
    #[serde(rename = "segmentos", default)]
    pub segments: Vec<SubtitleSegmentDto>,
}

#[derive(Debug, Serialize)]
pub struct SubtitlesResponse {
    pub success: bool,

    #[serde(rename = "legendas")]
    pub cues: Vec<SubtitleCue>,

    pub vtt: String,
}

// ============================================================================
// Health
// ============================================================================

/// Which upstream providers have credentials configured
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProviderStatus {
    pub openai: bool,
    pub google: bool,
    pub pexels: bool,
    pub giphy: bool,
    pub unsplash: bool,
}

#[derive(Debug, Serialize)]
pub struct CacheStatsResponse {
    pub scripts: NamespaceStats,
    pub media: NamespaceStats,
    pub audio: NamespaceStats,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub apis: ProviderStatus,
    #[serde(rename = "cacheStats")]
    pub cache_stats: CacheStatsResponse,
}
