//! Configuration Loader
//!
//! Priority (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file (config.toml)
//! 3. Defaults

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// Configuration file search names
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// Bare environment variables mapped onto provider credentials, so the
/// conventional names work without the ROTEIRO_ prefix.
const PROVIDER_ENV_OVERLAYS: &[(&str, &str)] = &[
    ("OPENAI_API_KEY", "providers.openai_api_key"),
    ("GOOGLE_API_KEY", "providers.google_api_key"),
    ("PEXELS_API_KEY", "providers.pexels_api_key"),
    ("GIPHY_API_KEY", "providers.giphy_api_key"),
    ("UNSPLASH_ACCESS_KEY", "providers.unsplash_access_key"),
];

/// Load the application configuration
///
/// Merges, highest priority first:
/// 1. Environment variables (prefix `ROTEIRO_`, level separator `__`),
///    plus the bare provider key names (`OPENAI_API_KEY`, ...)
/// 2. Configuration file (config.toml or config.local.toml)
/// 3. Defaults
///
/// # Environment variable examples
/// - `ROTEIRO_SERVER__PORT=8080`
/// - `ROTEIRO_CACHE__SCRIPT_TTL_SECS=1800`
/// - `ROTEIRO_RATE_LIMIT__GENERAL_MAX=200`
/// - `OPENAI_API_KEY=sk-...`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// Load configuration from an explicit path
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. Defaults (lowest priority)
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3001)?
        .set_default("cache.script_ttl_secs", 3600)?
        .set_default("cache.media_ttl_secs", 7200)?
        .set_default("cache.audio_ttl_secs", 86400)?
        .set_default("cache.sweep_interval_secs", 600)?
        .set_default("rate_limit.enabled", true)?
        .set_default("rate_limit.window_secs", 15 * 60)?
        .set_default("rate_limit.general_max", 100)?
        .set_default("rate_limit.ai_generation_max", 20)?
        .set_default("rate_limit.media_search_max", 50)?
        .set_default("rate_limit.audio_generation_max", 30)?
        .set_default("rate_limit.health_window_secs", 60)?
        .set_default("rate_limit.health_max", 1000)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. Configuration file (if present)
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. Environment variables (highest priority)
    // Prefix: ROTEIRO_, level separator: __ (double underscore)
    builder = builder.add_source(
        Environment::with_prefix("ROTEIRO")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 3b. Bare provider key names override everything else
    for (var, key) in PROVIDER_ENV_OVERLAYS {
        if let Ok(value) = std::env::var(var) {
            if !value.is_empty() {
                builder = builder.set_override(*key, value)?;
            }
        }
    }

    // 4. Build and deserialize
    let config = builder.build()?;
    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 5. Validate
    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validate configuration consistency
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.cache.sweep_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Cache sweep interval cannot be 0".to_string(),
        ));
    }

    if config.cache.script_ttl_secs == 0
        || config.cache.media_ttl_secs == 0
        || config.cache.audio_ttl_secs == 0
    {
        return Err(ConfigError::ValidationError(
            "Cache TTLs cannot be 0".to_string(),
        ));
    }

    if config.rate_limit.window_secs == 0 || config.rate_limit.health_window_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Rate limit windows cannot be 0".to_string(),
        ));
    }

    if config.rate_limit.general_max == 0 {
        return Err(ConfigError::ValidationError(
            "General rate limit cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// Log the effective configuration at startup
///
/// Secrets are reported as configured/missing only.
pub fn print_config(config: &AppConfig) {
    let key_status = |key: &Option<String>| if key.is_some() { "configured" } else { "missing" };

    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("OpenAI key: {}", key_status(&config.providers.openai_api_key));
    tracing::info!("Google TTS key: {}", key_status(&config.providers.google_api_key));
    tracing::info!("Pexels key: {}", key_status(&config.providers.pexels_api_key));
    tracing::info!("Giphy key: {}", key_status(&config.providers.giphy_api_key));
    tracing::info!(
        "Unsplash key: {}",
        key_status(&config.providers.unsplash_access_key)
    );
    tracing::info!(
        "Cache TTLs: scripts {}s, media {}s, audio {}s (sweep every {}s)",
        config.cache.script_ttl_secs,
        config.cache.media_ttl_secs,
        config.cache.audio_ttl_secs,
        config.cache.sweep_interval_secs
    );
    tracing::info!(
        "Rate limits: {}/{}s general, {} script, {} media, {} audio",
        config.rate_limit.general_max,
        config.rate_limit.window_secs,
        config.rate_limit.ai_generation_max,
        config.rate_limit.media_search_max,
        config.rate_limit.audio_generation_max
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_sweep_interval() {
        let mut config = AppConfig::default();
        config.cache.sweep_interval_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_ttl() {
        let mut config = AppConfig::default();
        config.cache.media_ttl_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_rate_limit() {
        let mut config = AppConfig::default();
        config.rate_limit.general_max = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[server]\nport = 8080\n\n[cache]\nscript_ttl_secs = 120\n",
        )
        .unwrap();

        let config = load_config_from_path(Some(&path)).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cache.script_ttl_secs, 120);
        // Untouched sections keep their defaults
        assert_eq!(config.cache.media_ttl_secs, 7200);
    }
}
