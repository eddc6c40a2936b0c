//! Audio generation orchestration
//!
//! Per segment: audio cache lookup -> synthesis call -> cache store, with a
//! silent placeholder substituted on any failure. Timeline placement always
//! runs fresh, even for cache-hit audio: a cached blob still needs per-request
//! duration placement at the requested speaking rate.

use std::sync::Arc;

use serde_json::json;

use crate::application::error::{ApplicationError, FieldError};
use crate::application::ports::{SpeechSynthesizerPort, SynthesisRequest};
use crate::domain::script::ScriptSegment;
use crate::domain::timing::{
    assemble_track, combine_audio, AudioSegment, TrackPiece, PLACEHOLDER_AUDIO_BASE64,
};
use crate::infrastructure::cache::{derive_cache_key_from_value, CacheService};

/// Speaking-rate bounds accepted on the wire
const MIN_SPEAKING_RATE: f64 = 0.25;
const MAX_SPEAKING_RATE: f64 = 4.0;

#[derive(Debug, Clone)]
pub struct GenerateAudioCommand {
    pub segments: Vec<ScriptSegment>,
    pub voice: String,
    pub speaking_rate: f64,
}

/// A fully generated narration track
#[derive(Debug, Clone)]
pub struct AudioTrackResult {
    pub full_audio_base64: String,
    pub segments: Vec<AudioSegment>,
    pub total_duration: f64,
}

/// GenerateAudio Handler
///
/// Never fails outright once input validates: a failed synthesis degrades the
/// affected segment to placeholder audio instead of aborting the batch.
pub struct GenerateAudioHandler {
    synthesizer: Option<Arc<dyn SpeechSynthesizerPort>>,
    cache: Arc<CacheService>,
}

impl GenerateAudioHandler {
    pub fn new(
        synthesizer: Option<Arc<dyn SpeechSynthesizerPort>>,
        cache: Arc<CacheService>,
    ) -> Self {
        Self { synthesizer, cache }
    }

    pub async fn handle(
        &self,
        cmd: GenerateAudioCommand,
    ) -> Result<AudioTrackResult, ApplicationError> {
        validate_command(&cmd)?;

        let mut pieces = Vec::with_capacity(cmd.segments.len());

        for segment in &cmd.segments {
            let audio = self
                .segment_audio(&segment.text, &cmd.voice, cmd.speaking_rate)
                .await;
            pieces.push(TrackPiece {
                text: segment.text.clone(),
                audio_base64: audio,
            });
        }

        let track = assemble_track(pieces, cmd.speaking_rate);
        let full_audio_base64 = combine_audio(&track.segments);

        tracing::info!(
            segments = track.segments.len(),
            total_duration = track.total_duration,
            "Audio track assembled"
        );

        Ok(AudioTrackResult {
            full_audio_base64,
            segments: track.segments,
            total_duration: track.total_duration,
        })
    }

    /// Audio payload for one segment: cache, then synthesis, then placeholder
    async fn segment_audio(&self, text: &str, voice: &str, rate: f64) -> String {
        let cache_key = derive_cache_key_from_value(
            "audio",
            &json!({ "text": text, "voice": voice, "rate": rate }),
        );

        if let Some(audio) = self.cache.audio.get(&cache_key) {
            tracing::info!(cache_key = %cache_key, "Audio cache hit");
            return audio;
        }

        let Some(synthesizer) = self.synthesizer.as_ref() else {
            tracing::warn!("Speech synthesis not configured, using placeholder audio");
            return PLACEHOLDER_AUDIO_BASE64.to_string();
        };

        let request = SynthesisRequest {
            text: text.to_string(),
            voice: voice.to_string(),
            speaking_rate: rate,
        };

        match synthesizer.synthesize(request).await {
            Ok(response) => {
                self.cache
                    .audio
                    .set(cache_key, response.audio_base64.clone(), None);
                response.audio_base64
            }
            Err(e) => {
                // Degraded, not fatal: one failed segment never fails the batch
                tracing::warn!(error = %e, "Speech synthesis failed, using placeholder audio");
                PLACEHOLDER_AUDIO_BASE64.to_string()
            }
        }
    }
}

fn validate_command(cmd: &GenerateAudioCommand) -> Result<(), ApplicationError> {
    let mut details = Vec::new();

    if cmd.segments.is_empty() {
        details.push(FieldError::new(
            "segmentos",
            "Segments array cannot be empty",
        ));
    }
    for (i, segment) in cmd.segments.iter().enumerate() {
        if segment.text.trim().is_empty() {
            details.push(FieldError::new(
                format!("segmentos[{}].texto", i),
                "Segment text is required",
            ));
        }
    }
    if !(MIN_SPEAKING_RATE..=MAX_SPEAKING_RATE).contains(&cmd.speaking_rate) {
        details.push(FieldError::new(
            "speakingRate",
            format!(
                "Speaking rate must be between {} and {}",
                MIN_SPEAKING_RATE, MAX_SPEAKING_RATE
            ),
        ));
    }

    if details.is_empty() {
        Ok(())
    } else {
        Err(ApplicationError::validation_details(details))
    }
}
