//! Application State
//!
//! Shared state for the HTTP layer: the command handlers, the cache service
//! for health reporting, provider credential status, and the rate limiters.

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::{
    GenerateAudioHandler, GenerateScriptHandler, GenerateSubtitlesHandler, MediaProviderPort,
    ScriptGeneratorPort, SearchMediaHandler, SpeechSynthesizerPort,
};
use crate::domain::media::MediaType;
use crate::infrastructure::cache::CacheService;

use super::dto::ProviderStatus;
use super::rate_limit::{RateLimitConfig, RateLimiters};

/// Application state
pub struct AppState {
    pub cache: Arc<CacheService>,
    pub provider_status: ProviderStatus,
    pub rate_limiters: RateLimiters,

    // ========== Command Handlers ==========
    pub generate_script_handler: GenerateScriptHandler,
    pub generate_audio_handler: GenerateAudioHandler,
    pub search_media_handler: SearchMediaHandler,
    pub generate_subtitles_handler: GenerateSubtitlesHandler,
}

impl AppState {
    pub fn new(
        script_generator: Option<Arc<dyn ScriptGeneratorPort>>,
        synthesizer: Option<Arc<dyn SpeechSynthesizerPort>>,
        media_chains: HashMap<MediaType, Vec<Arc<dyn MediaProviderPort>>>,
        cache: Arc<CacheService>,
        provider_status: ProviderStatus,
        rate_limit: &RateLimitConfig,
    ) -> Self {
        Self {
            generate_script_handler: GenerateScriptHandler::new(
                script_generator,
                cache.clone(),
            ),
            generate_audio_handler: GenerateAudioHandler::new(synthesizer, cache.clone()),
            search_media_handler: SearchMediaHandler::new(media_chains, cache.clone()),
            generate_subtitles_handler: GenerateSubtitlesHandler::new(),
            rate_limiters: RateLimiters::new(rate_limit),
            provider_status,
            cache,
        }
    }
}
