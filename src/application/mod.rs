//! Application layer
//!
//! Ports (abstract upstream collaborators), orchestration handlers and the
//! application error taxonomy.

pub mod error;
pub mod handlers;
pub mod ports;

pub use error::{ApplicationError, FieldError};
pub use handlers::{
    AudioTrackResult, GenerateAudioCommand, GenerateAudioHandler, GenerateScriptCommand,
    GenerateScriptHandler, GenerateSubtitlesCommand, GenerateSubtitlesHandler, SearchMediaCommand,
    SearchMediaHandler, SubtitleTrackResult,
};
pub use ports::{
    MediaError, MediaProviderPort, MediaQuery, ScriptError, ScriptGeneratorPort,
    SpeechSynthesizerPort, SynthesisError, SynthesisRequest, SynthesisResponse,
};
