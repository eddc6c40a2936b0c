//! Text-to-speech adapters

mod fake_tts_client;
mod google_tts_client;

pub use fake_tts_client::{FakeSpeechClient, FakeSpeechClientConfig};
pub use google_tts_client::{GoogleTtsClient, GoogleTtsClientConfig};
