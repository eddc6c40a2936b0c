//! Roteiro - educational video generation backend
//!
//! Composition root: loads configuration, wires the provider adapters that
//! have credentials, starts the cache sweeper and serves the API.

use std::collections::HashMap;
use std::sync::Arc;

use roteiro::config::{load_config, print_config};
use roteiro::application::{MediaProviderPort, ScriptGeneratorPort, SpeechSynthesizerPort};
use roteiro::domain::media::MediaType;
use roteiro::infrastructure::adapters::{
    GiphyClient, GiphyClientConfig, GoogleTtsClient, GoogleTtsClientConfig, OpenAiClientConfig,
    OpenAiScriptClient, PexelsClient, PexelsClientConfig, UnsplashClient, UnsplashClientConfig,
};
use roteiro::infrastructure::cache::CacheService;
use roteiro::infrastructure::http::{AppState, HttpServer, ProviderStatus, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (priority: env > config file > defaults)
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // Initialize logging
    let log_filter = format!(
        "{},roteiro={},tower_http=debug",
        config.log.level, config.log.level
    );
    let builder = tracing_subscriber::fmt().with_env_filter(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
    );
    if config.log.json {
        builder.json().init();
    } else {
        builder.init();
    }

    tracing::info!("Roteiro - educational video generation backend");
    print_config(&config);

    // Script generation (OpenAI)
    let script_generator: Option<Arc<dyn ScriptGeneratorPort>> =
        match &config.providers.openai_api_key {
            Some(key) => Some(Arc::new(OpenAiScriptClient::new(OpenAiClientConfig::new(
                key.clone(),
            ))?)),
            None => {
                tracing::warn!("OPENAI_API_KEY not set, script generation disabled");
                None
            }
        };

    // Speech synthesis (Google TTS)
    let synthesizer: Option<Arc<dyn SpeechSynthesizerPort>> =
        match &config.providers.google_api_key {
            Some(key) => Some(Arc::new(GoogleTtsClient::new(GoogleTtsClientConfig::new(
                key.clone(),
            ))?)),
            None => {
                tracing::warn!("GOOGLE_API_KEY not set, audio degrades to placeholders");
                None
            }
        };

    // Media providers, assembled into per-type fallback chains
    let pexels: Option<Arc<dyn MediaProviderPort>> = match &config.providers.pexels_api_key {
        Some(key) => Some(Arc::new(PexelsClient::new(PexelsClientConfig::new(
            key.clone(),
        ))?)),
        None => {
            tracing::warn!("PEXELS_API_KEY not set, video search disabled");
            None
        }
    };
    let giphy: Option<Arc<dyn MediaProviderPort>> = match &config.providers.giphy_api_key {
        Some(key) => Some(Arc::new(GiphyClient::new(GiphyClientConfig::new(
            key.clone(),
        ))?)),
        None => {
            tracing::warn!("GIPHY_API_KEY not set, gif search disabled");
            None
        }
    };
    let unsplash: Option<Arc<dyn MediaProviderPort>> =
        match &config.providers.unsplash_access_key {
            Some(key) => Some(Arc::new(UnsplashClient::new(UnsplashClientConfig::new(
                key.clone(),
            ))?)),
            None => {
                tracing::warn!("UNSPLASH_ACCESS_KEY not set, image search disabled");
                None
            }
        };

    let mut media_chains: HashMap<MediaType, Vec<Arc<dyn MediaProviderPort>>> = HashMap::new();
    media_chains.insert(
        MediaType::Video,
        [pexels.clone(), unsplash.clone()].into_iter().flatten().collect(),
    );
    media_chains.insert(
        MediaType::Gif,
        [giphy.clone(), unsplash.clone()].into_iter().flatten().collect(),
    );
    media_chains.insert(
        MediaType::Image,
        [unsplash.clone()].into_iter().flatten().collect(),
    );

    let provider_status = ProviderStatus {
        openai: script_generator.is_some(),
        google: synthesizer.is_some(),
        pexels: pexels.is_some(),
        giphy: giphy.is_some(),
        unsplash: unsplash.is_some(),
    };

    // Cache service with periodic sweep
    let cache = Arc::new(CacheService::new(config.cache.to_service_config()));
    let sweeper = cache.spawn_sweeper();

    // HTTP server
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(
        script_generator,
        synthesizer,
        media_chains,
        cache,
        provider_status,
        &config.rate_limit.to_limiter_config(),
    );

    let server = HttpServer::new(server_config, state);

    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    sweeper.abort();
    tracing::info!("Server shutdown complete");

    Ok(())
}
