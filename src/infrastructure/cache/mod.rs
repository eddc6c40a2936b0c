//! Response caching
//!
//! One [`TtlCache`] per capability namespace, bundled into an explicitly
//! constructed, injectable [`CacheService`] with a periodic sweep task. The
//! namespace TTLs follow expected upstream volatility: scripts 1 h, media
//! searches 2 h, synthesized audio 24 h.

mod key;
mod ttl_cache;

pub use key::{derive_cache_key, derive_cache_key_from_value};
pub use ttl_cache::TtlCache;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::domain::media::MediaItem;
use crate::domain::script::GeneratedScript;

/// Cache service configuration
#[derive(Debug, Clone)]
pub struct CacheServiceConfig {
    pub script_ttl: Duration,
    pub media_ttl: Duration,
    pub audio_ttl: Duration,
    pub sweep_interval: Duration,
}

impl Default for CacheServiceConfig {
    fn default() -> Self {
        Self {
            script_ttl: Duration::from_secs(3600),
            media_ttl: Duration::from_secs(7200),
            audio_ttl: Duration::from_secs(86400),
            sweep_interval: Duration::from_secs(600),
        }
    }
}

/// Per-namespace cache statistics, exposed on the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct NamespaceStats {
    pub size: usize,
    pub keys: Vec<String>,
}

/// The three cache namespaces
pub struct CacheService {
    /// Generated scripts keyed by prompt
    pub script: TtlCache<GeneratedScript>,
    /// Media search results keyed by the full query parameter set
    pub media: TtlCache<Vec<MediaItem>>,
    /// Synthesized audio payloads keyed by (text, voice, rate)
    pub audio: TtlCache<String>,

    sweep_interval: Duration,
}

impl CacheService {
    pub fn new(config: CacheServiceConfig) -> Self {
        Self {
            script: TtlCache::new(config.script_ttl),
            media: TtlCache::new(config.media_ttl),
            audio: TtlCache::new(config.audio_ttl),
            sweep_interval: config.sweep_interval,
        }
    }

    /// Start the periodic sweep over all namespaces
    ///
    /// The returned handle is owned by the composition root and aborted on
    /// shutdown.
    pub fn spawn_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        let service = Arc::clone(self);
        let mut interval = tokio::time::interval(service.sweep_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        tokio::spawn(async move {
            // First tick fires immediately; skip it so the sweep runs on the
            // configured cadence after startup.
            interval.tick().await;
            loop {
                interval.tick().await;
                let removed = service.sweep();
                if removed > 0 {
                    tracing::debug!(removed, "Cache sweep removed expired entries");
                }
            }
        })
    }

    /// Sweep all namespaces once, returning the number of entries removed
    pub fn sweep(&self) -> usize {
        self.script.cleanup() + self.media.cleanup() + self.audio.cleanup()
    }

    pub fn script_stats(&self) -> NamespaceStats {
        self.script.cleanup();
        NamespaceStats {
            size: self.script.len(),
            keys: self.script.keys(),
        }
    }

    pub fn media_stats(&self) -> NamespaceStats {
        self.media.cleanup();
        NamespaceStats {
            size: self.media.len(),
            keys: self.media.keys(),
        }
    }

    pub fn audio_stats(&self) -> NamespaceStats {
        self.audio.cleanup();
        NamespaceStats {
            size: self.audio.len(),
            keys: self.audio.keys(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn test_namespaces_have_independent_ttls() {
        let service = CacheService::new(CacheServiceConfig {
            script_ttl: Duration::from_secs(10),
            media_ttl: Duration::from_secs(20),
            audio_ttl: Duration::from_secs(30),
            sweep_interval: Duration::from_secs(600),
        });

        service.audio.set("a", "blob".to_string(), None);
        service.media.set("m", vec![], None);

        advance(Duration::from_secs(21)).await;
        assert!(service.media.get("m").is_none());
        assert!(service.audio.get("a").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_bounds_unread_entries() {
        let service = Arc::new(CacheService::new(CacheServiceConfig {
            script_ttl: Duration::from_secs(10),
            media_ttl: Duration::from_secs(10),
            audio_ttl: Duration::from_secs(10),
            sweep_interval: Duration::from_secs(600),
        }));
        service.audio.set("written-once", "blob".to_string(), None);

        let sweeper = service.spawn_sweeper();
        // Let the sweeper task register its interval timer before advancing
        // the paused clock, otherwise the tick is missed and skipped.
        tokio::task::yield_now().await;

        // Past the entry's TTL and past one sweep interval
        advance(Duration::from_secs(601)).await;
        tokio::task::yield_now().await;

        assert_eq!(service.audio.len(), 0);
        sweeper.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stats_report_size_and_keys() {
        let service = CacheService::new(CacheServiceConfig::default());
        service.audio.set("k1", "a".to_string(), None);
        service.audio.set("k2", "b".to_string(), None);

        let stats = service.audio_stats();
        assert_eq!(stats.size, 2);
        let mut keys = stats.keys;
        keys.sort();
        assert_eq!(keys, vec!["k1", "k2"]);
    }
}
