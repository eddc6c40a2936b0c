//! Upstream adapters
//!
//! Concrete implementations of the application ports, one module per vendor
//! family: llm (script generation), tts (speech synthesis), media (stock
//! media search).

pub mod llm;
pub mod media;
pub mod tts;

pub use llm::{OpenAiClientConfig, OpenAiScriptClient};
pub use media::{
    GiphyClient, GiphyClientConfig, PexelsClient, PexelsClientConfig, UnsplashClient,
    UnsplashClientConfig,
};
pub use tts::{FakeSpeechClient, FakeSpeechClientConfig, GoogleTtsClient, GoogleTtsClientConfig};
