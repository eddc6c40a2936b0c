//! Roteiro - backend for generating short educational videos in pt-BR
//!
//! Architecture: DDD + Hexagonal
//!
//! Domain layer (domain/):
//! - script: generated narration scripts and their segments
//! - timing: audio duration estimation and track assembly
//! - subtitle: cue chunking and WebVTT rendering
//! - media: normalized stock media results
//!
//! Application layer (application/):
//! - Ports: ScriptGenerator, SpeechSynthesizer, MediaProvider
//! - Handlers: one orchestration handler per capability
//!
//! Infrastructure layer (infrastructure/):
//! - HTTP: RESTful API with rate limiting
//! - Cache: TTL cache namespaces with periodic sweep
//! - Adapters: OpenAI, Google TTS, Pexels, Giphy, Unsplash clients

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
