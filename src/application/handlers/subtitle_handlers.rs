//! Subtitle generation
//!
//! Pure computation over already-placed audio segments: no cache, no upstream.

use crate::application::error::{ApplicationError, FieldError};
use crate::domain::subtitle::{chunk_segments, render_vtt, SubtitleCue};
use crate::domain::timing::AudioSegment;

#[derive(Debug, Clone)]
pub struct GenerateSubtitlesCommand {
    pub segments: Vec<AudioSegment>,
}

/// Generated subtitle track
#[derive(Debug, Clone)]
pub struct SubtitleTrackResult {
    pub cues: Vec<SubtitleCue>,
    pub vtt: String,
}

/// GenerateSubtitles Handler
pub struct GenerateSubtitlesHandler;

impl GenerateSubtitlesHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        cmd: GenerateSubtitlesCommand,
    ) -> Result<SubtitleTrackResult, ApplicationError> {
        validate_command(&cmd)?;

        let cues = chunk_segments(&cmd.segments);
        let vtt = render_vtt(&cues);

        tracing::info!(
            segments = cmd.segments.len(),
            cues = cues.len(),
            "Subtitles generated"
        );

        Ok(SubtitleTrackResult { cues, vtt })
    }
}

impl Default for GenerateSubtitlesHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_command(cmd: &GenerateSubtitlesCommand) -> Result<(), ApplicationError> {
    let mut details = Vec::new();

    if cmd.segments.is_empty() {
        details.push(FieldError::new(
            "segmentos",
            "Segments array cannot be empty",
        ));
    }
    for (i, segment) in cmd.segments.iter().enumerate() {
        if segment.start_seconds < 0.0 {
            details.push(FieldError::new(
                format!("segmentos[{}].inicio", i),
                "Start time must be non-negative",
            ));
        }
        if segment.end_seconds <= segment.start_seconds {
            details.push(FieldError::new(
                format!("segmentos[{}].fim", i),
                "End time must be greater than start time",
            ));
        }
    }

    if details.is_empty() {
        Ok(())
    } else {
        Err(ApplicationError::validation_details(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str, start: f64, duration: f64) -> AudioSegment {
        AudioSegment {
            text: text.to_string(),
            audio_base64: String::new(),
            start_seconds: start,
            duration_seconds: duration,
            end_seconds: start + duration,
        }
    }

    #[test]
    fn test_vtt_and_cues_for_simple_track() {
        let handler = GenerateSubtitlesHandler::new();
        let result = handler
            .handle(GenerateSubtitlesCommand {
                segments: vec![segment("Hello world from test", 0.0, 2.5)],
            })
            .unwrap();

        assert_eq!(result.cues.len(), 1);
        assert_eq!(
            result.vtt,
            "WEBVTT\n\n1\n00:00:00.000 --> 00:00:02.500\nHello world from test\n\n"
        );
    }

    #[test]
    fn test_empty_segments_rejected() {
        let handler = GenerateSubtitlesHandler::new();
        let result = handler.handle(GenerateSubtitlesCommand { segments: vec![] });
        assert!(matches!(result, Err(ApplicationError::Validation { .. })));
    }

    #[test]
    fn test_negative_start_rejected() {
        let handler = GenerateSubtitlesHandler::new();
        let result = handler.handle(GenerateSubtitlesCommand {
            segments: vec![segment("texto", -1.0, 2.0)],
        });
        assert!(matches!(result, Err(ApplicationError::Validation { .. })));
    }

    #[test]
    fn test_end_not_after_start_rejected() {
        let handler = GenerateSubtitlesHandler::new();
        let result = handler.handle(GenerateSubtitlesCommand {
            segments: vec![segment("texto", 1.0, 0.0)],
        });
        assert!(matches!(result, Err(ApplicationError::Validation { .. })));
    }

    #[test]
    fn test_empty_text_segment_yields_zero_cues() {
        let handler = GenerateSubtitlesHandler::new();
        let result = handler
            .handle(GenerateSubtitlesCommand {
                segments: vec![segment("", 0.0, 1.0), segment("um dois", 1.0, 1.0)],
            })
            .unwrap();
        assert_eq!(result.cues.len(), 1);
    }
}
