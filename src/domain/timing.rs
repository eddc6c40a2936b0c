//! Segment timing engine
//!
//! Places narration audio segments on a contiguous timeline. Durations are
//! estimated without decoding the audio container: real payloads use a fixed
//! byte-rate heuristic, placeholder payloads fall back to a words-per-second
//! estimate. This is a known precision limitation, not a bug.

use serde::{Deserialize, Serialize};

/// Speaking-rate baseline in words per second, tuned for Brazilian Portuguese
pub const WORDS_PER_SECOND: f64 = 2.5;

/// Assumed byte rate of synthesized MP3 audio (bytes per second)
pub const ASSUMED_BYTES_PER_SECOND: f64 = 16000.0;

/// Base64 payloads shorter than this are treated as placeholder audio
pub const PLACEHOLDER_THRESHOLD_CHARS: usize = 1000;

/// Fixed silent MP3 payload substituted when speech synthesis fails
pub const PLACEHOLDER_AUDIO_BASE64: &str = "SUQzAwAAAAAAJlRQRTEAAAAcAAAAU291bmRKYXkuY29tIFNvdW5kIEVmZmVjdHMA//uSwAAAAAABLBQAAAMQA13NgAAAJAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA==";

/// A narration piece waiting for timeline placement
#[derive(Debug, Clone)]
pub struct TrackPiece {
    /// Narrated text
    pub text: String,
    /// Base64 audio payload (real or placeholder)
    pub audio_base64: String,
}

/// One placed audio segment
///
/// Invariant: `end_seconds = start_seconds + duration_seconds` exactly, and
/// consecutive segments are contiguous (`end[i] == start[i + 1]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSegment {
    #[serde(rename = "texto")]
    pub text: String,

    /// Base64 audio payload
    #[serde(rename = "audio")]
    pub audio_base64: String,

    #[serde(rename = "inicio")]
    pub start_seconds: f64,

    #[serde(rename = "duracao")]
    pub duration_seconds: f64,

    #[serde(rename = "fim")]
    pub end_seconds: f64,
}

impl AudioSegment {
    /// Number of whitespace-separated words in the narrated text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// A fully placed audio track
#[derive(Debug, Clone)]
pub struct AudioTrack {
    pub segments: Vec<AudioSegment>,
    /// Total duration in seconds (final running total of the placement loop)
    pub total_duration: f64,
}

/// Estimate the duration of one audio payload in seconds
///
/// Payloads below [`PLACEHOLDER_THRESHOLD_CHARS`] are assumed to be the silent
/// placeholder and estimated from the word count; anything larger is estimated
/// from the decoded byte length at [`ASSUMED_BYTES_PER_SECOND`]. Both paths
/// divide by the speaking rate.
pub fn estimate_duration(audio_base64: &str, text: &str, speaking_rate: f64) -> f64 {
    let word_count = text.split_whitespace().count();

    if audio_base64.len() < PLACEHOLDER_THRESHOLD_CHARS {
        (word_count as f64 / WORDS_PER_SECOND) / speaking_rate
    } else {
        // Decoded length from base64 geometry; padding error is negligible
        // against the byte-rate approximation itself.
        let decoded_len = decoded_byte_len(audio_base64);
        (decoded_len as f64 / ASSUMED_BYTES_PER_SECOND) / speaking_rate
    }
}

/// Decoded byte length of a base64 payload, without allocating the decode
fn decoded_byte_len(audio_base64: &str) -> usize {
    let padding = audio_base64.bytes().rev().take_while(|&b| b == b'=').count();
    (audio_base64.len() / 4) * 3 - padding
}

/// Place pieces on a contiguous timeline
///
/// Sequential prefix sum: each segment starts where the previous one ended.
/// Durations are recomputed fresh on every call, including for audio that
/// came out of the cache.
pub fn assemble_track(pieces: Vec<TrackPiece>, speaking_rate: f64) -> AudioTrack {
    let mut segments = Vec::with_capacity(pieces.len());
    let mut running_total = 0.0_f64;

    for piece in pieces {
        let duration = estimate_duration(&piece.audio_base64, &piece.text, speaking_rate);
        let start = running_total;
        let end = start + duration;

        segments.push(AudioSegment {
            text: piece.text,
            audio_base64: piece.audio_base64,
            start_seconds: start,
            duration_seconds: duration,
            end_seconds: end,
        });

        running_total = end;
    }

    AudioTrack {
        segments,
        total_duration: running_total,
    }
}

/// Combine placed segments into one payload
///
/// Real concatenation would require an audio toolchain; like the original
/// backend, this returns the first segment's payload as the full track.
pub fn combine_audio(segments: &[AudioSegment]) -> String {
    match segments.first() {
        Some(first) => first.audio_base64.clone(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(text: &str, audio: &str) -> TrackPiece {
        TrackPiece {
            text: text.to_string(),
            audio_base64: audio.to_string(),
        }
    }

    /// A payload large enough to take the byte-rate estimation path
    fn large_payload(decoded_bytes: usize) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(vec![0u8; decoded_bytes])
    }

    #[test]
    fn test_placeholder_duration_from_word_count() {
        // 5 words at 2.5 words/s -> 2 seconds
        let duration = estimate_duration(PLACEHOLDER_AUDIO_BASE64, "um dois três quatro cinco", 1.0);
        assert!((duration - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_placeholder_duration_scales_with_rate() {
        let normal = estimate_duration(PLACEHOLDER_AUDIO_BASE64, "um dois três quatro cinco", 1.0);
        let fast = estimate_duration(PLACEHOLDER_AUDIO_BASE64, "um dois três quatro cinco", 2.0);
        assert!((fast - normal / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_real_audio_duration_from_byte_length() {
        // 32000 decoded bytes at 16000 B/s -> 2 seconds
        let audio = large_payload(32000);
        let duration = estimate_duration(&audio, "qualquer texto", 1.0);
        assert!((duration - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_decoded_byte_len_accounts_for_padding() {
        // "TWE=" decodes to 2 bytes, "TWFu" to 3
        assert_eq!(decoded_byte_len("TWE="), 2);
        assert_eq!(decoded_byte_len("TWFu"), 3);
    }

    #[test]
    fn test_decoded_byte_len_matches_real_decode() {
        use base64::Engine;

        for len in [1usize, 2, 3, 1500, 32000] {
            let encoded = base64::engine::general_purpose::STANDARD.encode(vec![0u8; len]);
            assert_eq!(decoded_byte_len(&encoded), len, "len = {}", len);
        }
    }

    #[test]
    fn test_track_starts_at_zero_and_is_contiguous() {
        let track = assemble_track(
            vec![
                piece("um dois três quatro cinco", PLACEHOLDER_AUDIO_BASE64),
                piece("seis sete oito quatro cinco", PLACEHOLDER_AUDIO_BASE64),
                piece("nove dez onze doze treze", PLACEHOLDER_AUDIO_BASE64),
            ],
            1.0,
        );

        assert_eq!(track.segments.len(), 3);
        assert_eq!(track.segments[0].start_seconds, 0.0);
        for pair in track.segments.windows(2) {
            assert_eq!(pair[0].end_seconds, pair[1].start_seconds);
        }
        for segment in &track.segments {
            assert_eq!(
                segment.end_seconds,
                segment.start_seconds + segment.duration_seconds
            );
        }
    }

    #[test]
    fn test_total_duration_is_final_running_total() {
        let track = assemble_track(
            vec![
                piece("um dois três quatro cinco", PLACEHOLDER_AUDIO_BASE64),
                piece("seis sete oito nove dez", PLACEHOLDER_AUDIO_BASE64),
            ],
            1.0,
        );
        let last = track.segments.last().unwrap();
        assert_eq!(track.total_duration, last.end_seconds);
        assert!((track.total_duration - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_track() {
        let track = assemble_track(vec![], 1.0);
        assert!(track.segments.is_empty());
        assert_eq!(track.total_duration, 0.0);
    }

    #[test]
    fn test_combine_audio_returns_first_segment() {
        let track = assemble_track(
            vec![
                piece("primeiro segmento de áudio", &large_payload(3000)),
                piece("segundo segmento de áudio", &large_payload(6000)),
            ],
            1.0,
        );
        assert_eq!(combine_audio(&track.segments), track.segments[0].audio_base64);
        assert_eq!(combine_audio(&[]), "");
    }
}
