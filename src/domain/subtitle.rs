//! Subtitle cue chunking and WebVTT rendering
//!
//! Each audio segment's text is split into fixed-size word groups; every cue
//! gets a share of the segment duration proportional to its word count, placed
//! contiguously from the segment's start. Cue ids are global across the whole
//! track and never reset.

use serde::{Deserialize, Serialize};

use super::timing::AudioSegment;

/// Words per subtitle cue
pub const WORDS_PER_CUE: usize = 5;

/// One subtitle display unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleCue {
    /// Globally unique, strictly increasing, starts at 1
    pub id: u32,

    #[serde(rename = "inicio")]
    pub start_seconds: f64,

    #[serde(rename = "fim")]
    pub end_seconds: f64,

    #[serde(rename = "texto")]
    pub text: String,
}

/// Chunk placed audio segments into subtitle cues
///
/// A segment with zero words produces zero cues (explicit guard against the
/// zero-word division, treated as normal output rather than an error).
pub fn chunk_segments(segments: &[AudioSegment]) -> Vec<SubtitleCue> {
    let mut cues = Vec::new();

    for segment in segments {
        let words: Vec<&str> = segment.text.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        let duration_per_word = segment.duration_seconds / words.len() as f64;
        let mut cursor = segment.start_seconds;

        for chunk in words.chunks(WORDS_PER_CUE) {
            let cue_duration = duration_per_word * chunk.len() as f64;
            cues.push(SubtitleCue {
                id: cues.len() as u32 + 1,
                start_seconds: cursor,
                end_seconds: cursor + cue_duration,
                text: chunk.join(" "),
            });
            cursor += cue_duration;
        }
    }

    cues
}

/// Render cues as a WebVTT document
pub fn render_vtt(cues: &[SubtitleCue]) -> String {
    let mut vtt = String::from("WEBVTT\n\n");

    for cue in cues {
        vtt.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            cue.id,
            format_timecode(cue.start_seconds),
            format_timecode(cue.end_seconds),
            cue.text
        ));
    }

    vtt
}

/// Format seconds as `HH:MM:SS.mmm` (zero-padded, millisecond precision)
pub fn format_timecode(seconds: f64) -> String {
    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    let secs = seconds % 60.0;

    format!("{:02}:{:02}:{:06.3}", hours, minutes, secs)
}
