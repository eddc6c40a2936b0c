//! Configuration Types

use serde::Deserialize;
use std::time::Duration;

use crate::infrastructure::cache::CacheServiceConfig;
use crate::infrastructure::http::RateLimitConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream provider credentials
    #[serde(default)]
    pub providers: ProvidersConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub rate_limit: RateLimitSettings,

    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            providers: ProvidersConfig::default(),
            cache: CacheConfig::default(),
            rate_limit: RateLimitSettings::default(),
            log: LogConfig::default(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Upstream provider credentials
///
/// All keys are optional; a missing key disables the provider and the
/// routes that need it degrade (503 for scripts, placeholder audio for
/// synthesis, shorter fallback chains for media).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub openai_api_key: Option<String>,

    #[serde(default)]
    pub google_api_key: Option<String>,

    #[serde(default)]
    pub pexels_api_key: Option<String>,

    #[serde(default)]
    pub giphy_api_key: Option<String>,

    #[serde(default)]
    pub unsplash_access_key: Option<String>,
}

/// Cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Script namespace TTL (seconds)
    #[serde(default = "default_script_ttl")]
    pub script_ttl_secs: u64,

    /// Media namespace TTL (seconds)
    #[serde(default = "default_media_ttl")]
    pub media_ttl_secs: u64,

    /// Audio namespace TTL (seconds)
    #[serde(default = "default_audio_ttl")]
    pub audio_ttl_secs: u64,

    /// Sweep cadence (seconds)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

fn default_script_ttl() -> u64 {
    3600
}

fn default_media_ttl() -> u64 {
    7200
}

fn default_audio_ttl() -> u64 {
    86400
}

fn default_sweep_interval() -> u64 {
    600
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            script_ttl_secs: default_script_ttl(),
            media_ttl_secs: default_media_ttl(),
            audio_ttl_secs: default_audio_ttl(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

impl CacheConfig {
    pub fn to_service_config(&self) -> CacheServiceConfig {
        CacheServiceConfig {
            script_ttl: Duration::from_secs(self.script_ttl_secs),
            media_ttl: Duration::from_secs(self.media_ttl_secs),
            audio_ttl: Duration::from_secs(self.audio_ttl_secs),
            sweep_interval: Duration::from_secs(self.sweep_interval_secs),
        }
    }
}

/// Rate limit configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Window for the API quotas (seconds)
    #[serde(default = "default_window")]
    pub window_secs: u64,

    #[serde(default = "default_general_max")]
    pub general_max: u32,

    #[serde(default = "default_ai_generation_max")]
    pub ai_generation_max: u32,

    #[serde(default = "default_media_search_max")]
    pub media_search_max: u32,

    #[serde(default = "default_audio_generation_max")]
    pub audio_generation_max: u32,

    /// Window for the health quota (seconds)
    #[serde(default = "default_health_window")]
    pub health_window_secs: u64,

    #[serde(default = "default_health_max")]
    pub health_max: u32,
}

fn default_enabled() -> bool {
    true
}

fn default_window() -> u64 {
    15 * 60
}

fn default_general_max() -> u32 {
    100
}

fn default_ai_generation_max() -> u32 {
    20
}

fn default_media_search_max() -> u32 {
    50
}

fn default_audio_generation_max() -> u32 {
    30
}

fn default_health_window() -> u64 {
    60
}

fn default_health_max() -> u32 {
    1000
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            window_secs: default_window(),
            general_max: default_general_max(),
            ai_generation_max: default_ai_generation_max(),
            media_search_max: default_media_search_max(),
            audio_generation_max: default_audio_generation_max(),
            health_window_secs: default_health_window(),
            health_max: default_health_max(),
        }
    }
}

impl RateLimitSettings {
    pub fn to_limiter_config(&self) -> RateLimitConfig {
        RateLimitConfig {
            enabled: self.enabled,
            window: Duration::from_secs(self.window_secs),
            general_max: self.general_max,
            ai_generation_max: self.ai_generation_max,
            media_search_max: self.media_search_max,
            audio_generation_max: self.audio_generation_max,
            health_window: Duration::from_secs(self.health_window_secs),
            health_max: self.health_max,
        }
    }
}

/// Log configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON output instead of the human-readable format
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.cache.script_ttl_secs, 3600);
        assert_eq!(config.cache.audio_ttl_secs, 86400);
        assert_eq!(config.rate_limit.general_max, 100);
        assert!(config.providers.openai_api_key.is_none());
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:3001");
    }

    #[test]
    fn test_cache_config_conversion() {
        let config = CacheConfig::default().to_service_config();
        assert_eq!(config.media_ttl, Duration::from_secs(7200));
        assert_eq!(config.sweep_interval, Duration::from_secs(600));
    }
}
