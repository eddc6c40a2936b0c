//! Unsplash Client
//!
//! Static image search, used as the fallback at the end of every provider
//! chain. Queries are decorated toward educational concept imagery and
//! results filtered to portrait-friendly aspect ratios.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{MediaError, MediaProviderPort, MediaQuery};
use crate::domain::media::{MediaItem, MediaType};

/// Minimum aspect ratio (height / width) for portrait-friendly images
const MIN_ASPECT_RATIO: f64 = 1.3;

/// Unsplash client configuration
#[derive(Debug, Clone)]
pub struct UnsplashClientConfig {
    pub access_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl UnsplashClientConfig {
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            base_url: "https://api.unsplash.com".to_string(),
            timeout_secs: 15,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct PhotoSearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    width: u32,
    height: u32,
    urls: PhotoUrls,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    alt_description: Option<String>,
    user: PhotoUser,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
    thumb: String,
}

#[derive(Debug, Deserialize)]
struct PhotoUser {
    name: String,
}

/// Unsplash stock photo client
pub struct UnsplashClient {
    client: Client,
    config: UnsplashClientConfig,
}

impl UnsplashClient {
    pub fn new(config: UnsplashClientConfig) -> Result<Self, MediaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MediaError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn search_url(&self) -> String {
        format!("{}/search/photos", self.config.base_url)
    }

    fn aspect_ratio_ok(photo: &Photo) -> bool {
        photo.width > 0 && photo.height as f64 / photo.width as f64 >= MIN_ASPECT_RATIO
    }
}

#[async_trait]
impl MediaProviderPort for UnsplashClient {
    fn name(&self) -> &'static str {
        "unsplash"
    }

    async fn search(&self, query: &MediaQuery) -> Result<Vec<MediaItem>, MediaError> {
        let decorated = format!("{} educational concept illustration", query.query);
        let per_page = (query.count * 2).to_string();

        let response = self
            .client
            .get(self.search_url())
            .header(
                "Authorization",
                format!("Client-ID {}", self.config.access_key),
            )
            .query(&[
                ("query", decorated.as_str()),
                ("per_page", per_page.as_str()),
                ("orientation", "portrait"),
                ("content_filter", "high"),
                ("order_by", "relevant"),
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

        let body: PhotoSearchResponse = response
            .json()
            .await
            .map_err(|e| MediaError::InvalidResponse(e.to_string()))?;

        let items = body
            .results
            .into_iter()
            .filter(Self::aspect_ratio_ok)
            .take(query.count)
            .map(|photo| {
                let mut item = MediaItem::new(
                    MediaType::Image,
                    photo.urls.regular.clone(),
                    photo.urls.thumb.clone(),
                    "unsplash",
                );
                item.width = Some(photo.width);
                item.height = Some(photo.height);
                item.description = photo.description.or(photo.alt_description);
                item.author = Some(photo.user.name);
                item
            })
            .collect();

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(width: u32, height: u32) -> Photo {
        Photo {
            width,
            height,
            urls: PhotoUrls {
                regular: "https://u/regular".to_string(),
                thumb: "https://u/thumb".to_string(),
            },
            description: None,
            alt_description: Some("uma sala de aula".to_string()),
            user: PhotoUser {
                name: "Fotógrafa".to_string(),
            },
        }
    }

    #[test]
    fn test_aspect_ratio_filter() {
        assert!(UnsplashClient::aspect_ratio_ok(&photo(1000, 1500)));
        assert!(!UnsplashClient::aspect_ratio_ok(&photo(1500, 1000)));
        assert!(!UnsplashClient::aspect_ratio_ok(&photo(0, 1000)));
    }

    #[test]
    fn test_search_url() {
        let client = UnsplashClient::new(
            UnsplashClientConfig::new("k").with_base_url("http://localhost:1"),
        )
        .unwrap();
        assert_eq!(client.search_url(), "http://localhost:1/search/photos");
    }
}
