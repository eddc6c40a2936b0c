//! Media search orchestration
//!
//! Providers are an ordered chain per media type, each implementing the same
//! search capability. For every provider the orchestrator tries the full
//! keyword query first, then a broader single-keyword fallback against the
//! same provider, and only then moves to the next provider, stopping at the
//! first non-empty result set. Provider failures are logged and treated as
//! "no results from this provider"; if every path comes up empty the caller
//! gets an empty result set, not an error.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;

use crate::application::error::{ApplicationError, FieldError};
use crate::application::ports::{MediaProviderPort, MediaQuery};
use crate::domain::media::{MediaItem, MediaType};
use crate::infrastructure::cache::{derive_cache_key_from_value, CacheService};

/// Keyword query length limits (characters, joined)
const QUERY_MIN_CHARS: usize = 2;
const QUERY_MAX_CHARS: usize = 100;

/// Result count limits
const MIN_COUNT: usize = 1;
const MAX_COUNT: usize = 10;

/// Generic keyword used when the caller's first keyword is blank
const FALLBACK_KEYWORD: &str = "education";

#[derive(Debug, Clone)]
pub struct SearchMediaCommand {
    pub keywords: Vec<String>,
    pub media_type: MediaType,
    pub target_duration: Option<f64>,
    pub count: usize,
}

/// SearchMedia Handler
pub struct SearchMediaHandler {
    /// Ordered provider chain per media type
    chains: HashMap<MediaType, Vec<Arc<dyn MediaProviderPort>>>,
    cache: Arc<CacheService>,
}

impl SearchMediaHandler {
    pub fn new(
        chains: HashMap<MediaType, Vec<Arc<dyn MediaProviderPort>>>,
        cache: Arc<CacheService>,
    ) -> Self {
        Self { chains, cache }
    }

    pub async fn handle(
        &self,
        cmd: SearchMediaCommand,
    ) -> Result<Vec<MediaItem>, ApplicationError> {
        validate_command(&cmd)?;

        let keywords: Vec<&str> = cmd
            .keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect();
        let primary_query = keywords.join(" ");

        let cache_key = derive_cache_key_from_value(
            "media",
            &json!({
                "keywords": primary_query,
                "tipo": cmd.media_type.as_str(),
                "duracao": cmd.target_duration,
                "count": cmd.count,
            }),
        );
        if let Some(items) = self.cache.media.get(&cache_key) {
            tracing::info!(cache_key = %cache_key, "Media cache hit");
            return Ok(items);
        }

        let fallback_query = keywords
            .first()
            .copied()
            .unwrap_or(FALLBACK_KEYWORD)
            .to_string();

        let items = self
            .search_chain(&cmd, &primary_query, &fallback_query)
            .await;

        self.cache.media.set(cache_key, items.clone(), None);
        Ok(items)
    }

    /// Walk the provider chain until one query returns results
    async fn search_chain(
        &self,
        cmd: &SearchMediaCommand,
        primary_query: &str,
        fallback_query: &str,
    ) -> Vec<MediaItem> {
        let Some(chain) = self.chains.get(&cmd.media_type) else {
            tracing::warn!(media_type = cmd.media_type.as_str(), "No providers configured");
            return Vec::new();
        };

        for provider in chain {
            let items = self
                .search_provider(provider, cmd, primary_query)
                .await;
            if !items.is_empty() {
                return items;
            }

            // Broader fallback query against the same provider before moving on
            let items = self
                .search_provider(provider, cmd, fallback_query)
                .await;
            if !items.is_empty() {
                return items;
            }
        }

        Vec::new()
    }

    async fn search_provider(
        &self,
        provider: &Arc<dyn MediaProviderPort>,
        cmd: &SearchMediaCommand,
        query: &str,
    ) -> Vec<MediaItem> {
        let media_query = MediaQuery {
            query: query.to_string(),
            media_type: cmd.media_type,
            target_duration: cmd.target_duration,
            count: cmd.count,
        };

        match provider.search(&media_query).await {
            Ok(items) => {
                tracing::info!(
                    provider = provider.name(),
                    query = query,
                    results = items.len(),
                    "Media search"
                );
                items
            }
            Err(e) => {
                // Degraded: a failed provider counts as zero results
                tracing::warn!(provider = provider.name(), error = %e, "Media provider failed");
                Vec::new()
            }
        }
    }
}

fn validate_command(cmd: &SearchMediaCommand) -> Result<(), ApplicationError> {
    let mut details = Vec::new();

    let joined: String = cmd
        .keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let chars = joined.chars().count();
    if chars < QUERY_MIN_CHARS || chars > QUERY_MAX_CHARS {
        details.push(FieldError::new(
            "keywords",
            format!(
                "Query must be between {} and {} characters",
                QUERY_MIN_CHARS, QUERY_MAX_CHARS
            ),
        ));
    }
    if !(MIN_COUNT..=MAX_COUNT).contains(&cmd.count) {
        details.push(FieldError::new(
            "count",
            format!("Count must be between {} and {}", MIN_COUNT, MAX_COUNT),
        ));
    }

    if details.is_empty() {
        Ok(())
    } else {
        Err(ApplicationError::validation_details(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::application::ports::MediaError;
    use crate::infrastructure::cache::CacheServiceConfig;

    /// Provider that records every query and answers from a script
    struct StubProvider {
        name: &'static str,
        queries: Mutex<Vec<String>>,
        /// Outcome per call, in order; exhausted calls return empty
        outcomes: Mutex<Vec<Result<usize, ()>>>,
    }

    impl StubProvider {
        fn new(name: &'static str, outcomes: Vec<Result<usize, ()>>) -> Arc<Self> {
            Arc::new(Self {
                name,
                queries: Mutex::new(Vec::new()),
                outcomes: Mutex::new(outcomes),
            })
        }

        fn seen_queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MediaProviderPort for StubProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn search(&self, query: &MediaQuery) -> Result<Vec<MediaItem>, MediaError> {
            self.queries.lock().unwrap().push(query.query.clone());
            let outcome = {
                let mut outcomes = self.outcomes.lock().unwrap();
                if outcomes.is_empty() {
                    Ok(0)
                } else {
                    outcomes.remove(0)
                }
            };
            match outcome {
                Ok(n) => Ok((0..n)
                    .map(|i| {
                        MediaItem::new(
                            query.media_type,
                            format!("https://{}/{}", self.name, i),
                            format!("https://{}/preview/{}", self.name, i),
                            self.name,
                        )
                    })
                    .collect()),
                Err(()) => Err(MediaError::ServiceError("upstream down".to_string())),
            }
        }
    }

    fn handler_with(chain: Vec<Arc<StubProvider>>) -> SearchMediaHandler {
        let mut chains = HashMap::new();
        chains.insert(
            MediaType::Video,
            chain
                .into_iter()
                .map(|p| p as Arc<dyn MediaProviderPort>)
                .collect(),
        );
        SearchMediaHandler::new(
            chains,
            Arc::new(CacheService::new(CacheServiceConfig::default())),
        )
    }

    fn command(keywords: &[&str]) -> SearchMediaCommand {
        SearchMediaCommand {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            media_type: MediaType::Video,
            target_duration: Some(5.0),
            count: 3,
        }
    }

    #[tokio::test]
    async fn test_primary_query_hit_stops_chain() {
        let primary = StubProvider::new("pexels", vec![Ok(2)]);
        let secondary = StubProvider::new("unsplash", vec![Ok(5)]);
        let handler = handler_with(vec![primary.clone(), secondary.clone()]);

        let items = handler
            .handle(command(&["educação", "aprendizado"]))
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].source, "pexels");
        assert_eq!(primary.seen_queries(), vec!["educação aprendizado"]);
        assert!(secondary.seen_queries().is_empty());
    }

    #[tokio::test]
    async fn test_fallback_query_before_secondary_provider() {
        // Primary provider: empty on the full query, results on the fallback
        let primary = StubProvider::new("pexels", vec![Ok(0), Ok(1)]);
        let secondary = StubProvider::new("unsplash", vec![Ok(5)]);
        let handler = handler_with(vec![primary.clone(), secondary.clone()]);

        let items = handler
            .handle(command(&["educação", "aprendizado"]))
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        // Same provider queried twice: full query, then first keyword alone
        assert_eq!(
            primary.seen_queries(),
            vec!["educação aprendizado", "educação"]
        );
        assert!(secondary.seen_queries().is_empty());
    }

    #[tokio::test]
    async fn test_secondary_provider_after_both_queries_empty() {
        let primary = StubProvider::new("pexels", vec![Ok(0), Ok(0)]);
        let secondary = StubProvider::new("unsplash", vec![Ok(2)]);
        let handler = handler_with(vec![primary.clone(), secondary.clone()]);

        let items = handler.handle(command(&["educação"])).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].source, "unsplash");
        assert_eq!(primary.seen_queries().len(), 2);
    }

    #[tokio::test]
    async fn test_provider_error_treated_as_empty() {
        let failing = StubProvider::new("pexels", vec![Err(()), Err(())]);
        let healthy = StubProvider::new("unsplash", vec![Ok(1)]);
        let handler = handler_with(vec![failing, healthy]);

        let items = handler.handle(command(&["educação"])).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].source, "unsplash");
    }

    #[tokio::test]
    async fn test_all_paths_empty_returns_empty_not_error() {
        let provider = StubProvider::new("pexels", vec![Ok(0), Ok(0)]);
        let handler = handler_with(vec![provider]);

        let items = handler.handle(command(&["educação"])).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_cache_hit_skips_providers() {
        let provider = StubProvider::new("pexels", vec![Ok(1)]);
        let handler = handler_with(vec![provider.clone()]);

        handler.handle(command(&["educação"])).await.unwrap();
        handler.handle(command(&["educação"])).await.unwrap();

        assert_eq!(provider.seen_queries().len(), 1);
    }

    #[tokio::test]
    async fn test_count_out_of_range_rejected() {
        let handler = handler_with(vec![]);
        let mut cmd = command(&["educação"]);
        cmd.count = 50;
        let result = handler.handle(cmd).await;
        assert!(matches!(result, Err(ApplicationError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_blank_keywords_rejected() {
        let handler = handler_with(vec![]);
        let result = handler.handle(command(&["  ", ""])).await;
        assert!(matches!(result, Err(ApplicationError::Validation { .. })));
    }
}
