//! Request rate limiting
//!
//! Keyed in-memory limiters built on governor, one quota per route class,
//! keyed by client IP. Budgets follow the original backend: 100 general API
//! requests per 15 minutes, with tighter quotas for the AI-backed routes and
//! a separate generous quota for health checks.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::state::keyed::DashMapStateStore;
use governor::{Quota, RateLimiter};

type KeyedLimiter = RateLimiter<String, DashMapStateStore<String>, DefaultClock>;

/// Rate limit configuration (requests per window)
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub window: Duration,
    pub general_max: u32,
    pub ai_generation_max: u32,
    pub media_search_max: u32,
    pub audio_generation_max: u32,
    pub health_window: Duration,
    pub health_max: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window: Duration::from_secs(15 * 60),
            general_max: 100,
            ai_generation_max: 20,
            media_search_max: 50,
            audio_generation_max: 30,
            health_window: Duration::from_secs(60),
            health_max: 1000,
        }
    }
}

/// One keyed limiter
pub struct MemoryLimiter {
    limiter: Arc<KeyedLimiter>,
}

impl MemoryLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        let burst = NonZeroU32::new(max_requests.max(1)).unwrap_or(NonZeroU32::MIN);
        let per_request =
            Duration::from_secs_f64(window.as_secs_f64() / f64::from(burst.get()));
        let quota = Quota::with_period(per_request)
            .unwrap_or_else(|| Quota::per_minute(burst))
            .allow_burst(burst);

        Self {
            limiter: Arc::new(RateLimiter::dashmap(quota)),
        }
    }

    /// Check admission for one key; on rejection returns retry-after seconds
    pub fn check(&self, key: &str) -> Result<(), u64> {
        match self.limiter.check_key(&key.to_string()) {
            Ok(()) => Ok(()),
            Err(not_until) => {
                let retry_after = not_until.wait_time_from(DefaultClock::default().now());
                Err(retry_after.as_secs().max(1))
            }
        }
    }
}

/// Route classes with distinct quotas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    AiGeneration,
    AudioGeneration,
    MediaSearch,
    Health,
    Other,
}

impl RouteClass {
    pub fn from_path(path: &str) -> Self {
        match path {
            "/api/generate-script" => RouteClass::AiGeneration,
            "/api/generate-audio-with-timing" => RouteClass::AudioGeneration,
            "/api/search-media" => RouteClass::MediaSearch,
            "/api/health" => RouteClass::Health,
            _ => RouteClass::Other,
        }
    }
}

/// All route-class limiters
pub struct RateLimiters {
    enabled: bool,
    general: MemoryLimiter,
    ai_generation: MemoryLimiter,
    media_search: MemoryLimiter,
    audio_generation: MemoryLimiter,
    health: MemoryLimiter,
}

impl RateLimiters {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            enabled: config.enabled,
            general: MemoryLimiter::new(config.general_max, config.window),
            ai_generation: MemoryLimiter::new(config.ai_generation_max, config.window),
            media_search: MemoryLimiter::new(config.media_search_max, config.window),
            audio_generation: MemoryLimiter::new(config.audio_generation_max, config.window),
            health: MemoryLimiter::new(config.health_max, config.health_window),
        }
    }

    /// Check admission for a request
    ///
    /// Health checks only consume the health quota; every other API route
    /// consumes the general quota plus its class quota.
    pub fn check(&self, class: RouteClass, key: &str) -> Result<(), u64> {
        if !self.enabled {
            return Ok(());
        }
        if class == RouteClass::Health {
            return self.health.check(key);
        }

        self.general.check(key)?;
        match class {
            RouteClass::AiGeneration => self.ai_generation.check(key),
            RouteClass::AudioGeneration => self.audio_generation.check(key),
            RouteClass::MediaSearch => self.media_search.check(key),
            RouteClass::Health | RouteClass::Other => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limiter_allows_burst_then_rejects() {
        let limiter = MemoryLimiter::new(3, Duration::from_secs(900));

        for _ in 0..3 {
            assert!(limiter.check("10.0.0.1").is_ok());
        }
        let retry_after = limiter.check("10.0.0.1").unwrap_err();
        assert!(retry_after >= 1);
    }

    #[test]
    fn test_limiter_keys_are_independent() {
        let limiter = MemoryLimiter::new(1, Duration::from_secs(900));
        assert!(limiter.check("10.0.0.1").is_ok());
        assert!(limiter.check("10.0.0.2").is_ok());
        assert!(limiter.check("10.0.0.1").is_err());
    }

    #[test]
    fn test_route_class_from_path() {
        assert_eq!(
            RouteClass::from_path("/api/generate-script"),
            RouteClass::AiGeneration
        );
        assert_eq!(
            RouteClass::from_path("/api/search-media"),
            RouteClass::MediaSearch
        );
        assert_eq!(RouteClass::from_path("/api/health"), RouteClass::Health);
        assert_eq!(
            RouteClass::from_path("/api/generate-subtitles"),
            RouteClass::Other
        );
    }

    #[test]
    fn test_class_quota_tighter_than_general() {
        let limiters = RateLimiters::new(&RateLimitConfig {
            enabled: true,
            window: Duration::from_secs(900),
            general_max: 100,
            ai_generation_max: 2,
            media_search_max: 50,
            audio_generation_max: 30,
            health_window: Duration::from_secs(60),
            health_max: 1000,
        });

        assert!(limiters.check(RouteClass::AiGeneration, "ip").is_ok());
        assert!(limiters.check(RouteClass::AiGeneration, "ip").is_ok());
        assert!(limiters.check(RouteClass::AiGeneration, "ip").is_err());
        // Other classes still admitted for the same key
        assert!(limiters.check(RouteClass::MediaSearch, "ip").is_ok());
    }

    #[test]
    fn test_disabled_limiter_admits_everything() {
        let limiters = RateLimiters::new(&RateLimitConfig {
            enabled: false,
            general_max: 1,
            ..RateLimitConfig::default()
        });

        for _ in 0..10 {
            assert!(limiters.check(RouteClass::AiGeneration, "ip").is_ok());
        }
    }

    #[test]
    fn test_health_does_not_consume_general_quota() {
        let limiters = RateLimiters::new(&RateLimitConfig {
            enabled: true,
            window: Duration::from_secs(900),
            general_max: 1,
            ai_generation_max: 20,
            media_search_max: 50,
            audio_generation_max: 30,
            health_window: Duration::from_secs(60),
            health_max: 1000,
        });

        for _ in 0..10 {
            assert!(limiters.check(RouteClass::Health, "ip").is_ok());
        }
        assert!(limiters.check(RouteClass::Other, "ip").is_ok());
    }
}
