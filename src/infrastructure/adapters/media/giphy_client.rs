//! Giphy Client
//!
//! Animated GIF search. Queries are decorated with educational terms, results
//! are g-rated and filtered to portrait-friendly aspect ratios.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{MediaError, MediaProviderPort, MediaQuery};
use crate::domain::media::{MediaItem, MediaType};

/// Accepted aspect ratio band (height / width) for mobile-friendly GIFs
const MIN_ASPECT_RATIO: f64 = 1.3;
const MAX_ASPECT_RATIO: f64 = 2.0;

/// Giphy client configuration
#[derive(Debug, Clone)]
pub struct GiphyClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl GiphyClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.giphy.com".to_string(),
            timeout_secs: 15,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct GifSearchResponse {
    #[serde(default)]
    data: Vec<Gif>,
}

#[derive(Debug, Deserialize)]
struct Gif {
    #[serde(default)]
    title: String,
    images: GifImages,
}

#[derive(Debug, Deserialize)]
struct GifImages {
    original: GifRendition,
    #[serde(default)]
    looping: Option<GifRendition>,
    preview_gif: GifRendition,
}

#[derive(Debug, Default, Deserialize)]
struct GifRendition {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    mp4: Option<String>,
    /// Giphy reports dimensions as strings
    #[serde(default)]
    width: Option<String>,
    #[serde(default)]
    height: Option<String>,
}

impl GifRendition {
    fn width_px(&self) -> Option<u32> {
        self.width.as_deref().and_then(|w| w.parse().ok())
    }

    fn height_px(&self) -> Option<u32> {
        self.height.as_deref().and_then(|h| h.parse().ok())
    }
}

/// Giphy animated GIF client
pub struct GiphyClient {
    client: Client,
    config: GiphyClientConfig,
}

impl GiphyClient {
    pub fn new(config: GiphyClientConfig) -> Result<Self, MediaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MediaError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn search_url(&self) -> String {
        format!("{}/v1/gifs/search", self.config.base_url)
    }

    fn aspect_ratio_ok(gif: &Gif) -> bool {
        match (gif.images.original.width_px(), gif.images.original.height_px()) {
            (Some(width), Some(height)) if width > 0 => {
                let ratio = height as f64 / width as f64;
                (MIN_ASPECT_RATIO..=MAX_ASPECT_RATIO).contains(&ratio)
            }
            _ => false,
        }
    }
}

#[async_trait]
impl MediaProviderPort for GiphyClient {
    fn name(&self) -> &'static str {
        "giphy"
    }

    async fn search(&self, query: &MediaQuery) -> Result<Vec<MediaItem>, MediaError> {
        let decorated = format!("{} educational animated", query.query);

        let limit = (query.count * 2).to_string();
        let response = self
            .client
            .get(self.search_url())
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("q", decorated.as_str()),
                ("limit", limit.as_str()),
                ("rating", "g"),
                ("lang", "pt"),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MediaError::Timeout
                } else {
                    MediaError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(MediaError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: GifSearchResponse = response
            .json()
            .await
            .map_err(|e| MediaError::InvalidResponse(e.to_string()))?;

        let items = body
            .data
            .into_iter()
            .filter(Self::aspect_ratio_ok)
            .take(query.count)
            .filter_map(|gif| {
                let url = gif
                    .images
                    .original
                    .mp4
                    .clone()
                    .or_else(|| gif.images.looping.as_ref().and_then(|l| l.mp4.clone()))?;
                let preview = gif.images.preview_gif.url.clone()?;
                let mut item = MediaItem::new(MediaType::Gif, url, preview, "giphy");
                item.width = gif.images.original.width_px();
                item.height = gif.images.original.height_px();
                item.title = Some(gif.title).filter(|t| !t.is_empty());
                Some(item)
            })
            .collect();

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gif(width: &str, height: &str) -> Gif {
        Gif {
            title: "Aula animada".to_string(),
            images: GifImages {
                original: GifRendition {
                    url: None,
                    mp4: Some("https://g/original.mp4".to_string()),
                    width: Some(width.to_string()),
                    height: Some(height.to_string()),
                },
                looping: None,
                preview_gif: GifRendition {
                    url: Some("https://g/preview.gif".to_string()),
                    ..Default::default()
                },
            },
        }
    }

    #[test]
    fn test_aspect_ratio_filter() {
        // 480x720 -> ratio 1.5, accepted
        assert!(GiphyClient::aspect_ratio_ok(&gif("480", "720")));
        // 480x480 -> ratio 1.0, rejected
        assert!(!GiphyClient::aspect_ratio_ok(&gif("480", "480")));
        // 400x1000 -> ratio 2.5, rejected
        assert!(!GiphyClient::aspect_ratio_ok(&gif("400", "1000")));
    }

    #[test]
    fn test_unparseable_dimensions_rejected() {
        assert!(!GiphyClient::aspect_ratio_ok(&gif("", "720")));
    }

    #[test]
    fn test_search_url() {
        let client =
            GiphyClient::new(GiphyClientConfig::new("k").with_base_url("http://localhost:1"))
                .unwrap();
        assert_eq!(client.search_url(), "http://localhost:1/v1/gifs/search");
    }
}
