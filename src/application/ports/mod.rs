//! Application ports
//!
//! Abstract interfaces between the application layer and the upstream
//! collaborators implemented in infrastructure/adapters.

mod media_provider;
mod script_generator;
mod speech_synthesizer;

pub use media_provider::{MediaError, MediaProviderPort, MediaQuery};
pub use script_generator::{ScriptError, ScriptGeneratorPort};
pub use speech_synthesizer::{
    SpeechSynthesizerPort, SynthesisError, SynthesisRequest, SynthesisResponse,
};
