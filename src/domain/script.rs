//! Narration scripts
//!
//! Value objects produced by script generation and consumed by audio and
//! subtitle generation. Wire field names keep the backend's original
//! Brazilian-Portuguese contract.

use serde::{Deserialize, Serialize};

/// Kind of visual suggested for a script segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualType {
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "imagem")]
    Image,
    #[serde(rename = "animacao")]
    Animation,
}

impl Default for VisualType {
    fn default() -> Self {
        VisualType::Video
    }
}

/// One contiguous unit of narration text
///
/// Immutable once produced by script generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptSegment {
    /// Text to be narrated
    #[serde(rename = "texto")]
    pub text: String,

    /// Visual keywords (what to show on screen)
    #[serde(rename = "palavras_chave", default)]
    pub visual_keywords: Vec<String>,

    /// Estimated speaking duration in seconds
    #[serde(rename = "duracao_estimada", default)]
    pub estimated_duration_seconds: f64,

    /// Suggested visual type
    #[serde(rename = "tipo_visual", default)]
    pub visual_type: VisualType,
}

impl ScriptSegment {
    /// Number of whitespace-separated words in the segment text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// A complete generated script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedScript {
    #[serde(rename = "titulo")]
    pub title: String,

    #[serde(rename = "segmentos")]
    pub segments: Vec<ScriptSegment>,

    #[serde(rename = "palavras_totais")]
    pub total_word_count: u32,
}
