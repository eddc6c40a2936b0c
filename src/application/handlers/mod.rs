//! Orchestration handlers
//!
//! One handler per capability, each composing input validation, cache lookup,
//! upstream calls, domain transformation and cache store.

mod audio_handlers;
mod media_handlers;
mod script_handlers;
mod subtitle_handlers;

pub use audio_handlers::{AudioTrackResult, GenerateAudioCommand, GenerateAudioHandler};
pub use media_handlers::{SearchMediaCommand, SearchMediaHandler};
pub use script_handlers::{GenerateScriptCommand, GenerateScriptHandler};
pub use subtitle_handlers::{
    GenerateSubtitlesCommand, GenerateSubtitlesHandler, SubtitleTrackResult,
};
