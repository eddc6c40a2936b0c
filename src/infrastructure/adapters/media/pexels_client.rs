//! Pexels Client
//!
//! Stock video search. Clips are filtered to a usable length band, ordered by
//! closeness to the caller's target duration, and reduced to one renderable
//! file each (HD up to 1280px wide preferred).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{MediaError, MediaProviderPort, MediaQuery};
use crate::domain::media::{MediaItem, MediaType};

/// Usable clip length band in seconds
const MIN_CLIP_SECONDS: f64 = 3.0;
const MAX_CLIP_SECONDS: f64 = 30.0;

/// Target duration assumed when the caller does not provide one
const DEFAULT_TARGET_SECONDS: f64 = 5.0;

/// Pexels client configuration
#[derive(Debug, Clone)]
pub struct PexelsClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl PexelsClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.pexels.com".to_string(),
            timeout_secs: 15,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct VideoSearchResponse {
    #[serde(default)]
    videos: Vec<PexelsVideo>,
}

#[derive(Debug, Deserialize)]
struct PexelsVideo {
    duration: f64,
    image: String,
    #[serde(default)]
    video_files: Vec<PexelsVideoFile>,
}

#[derive(Debug, Clone, Deserialize)]
struct PexelsVideoFile {
    link: String,
    width: u32,
    height: u32,
    #[serde(default)]
    quality: Option<String>,
}

/// Pexels stock video client
pub struct PexelsClient {
    client: Client,
    config: PexelsClientConfig,
}

impl PexelsClient {
    pub fn new(config: PexelsClientConfig) -> Result<Self, MediaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MediaError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn search_url(&self) -> String {
        format!("{}/videos/search", self.config.base_url)
    }

    /// Best renderable file for a clip: HD up to 1280px wide wins
    fn pick_file(video: &PexelsVideo) -> Option<PexelsVideoFile> {
        let mut candidates: Vec<&PexelsVideoFile> = video
            .video_files
            .iter()
            .filter(|f| {
                matches!(f.quality.as_deref(), Some("hd") | Some("sd"))
            })
            .collect();
        candidates.sort_by_key(|f| {
            if f.quality.as_deref() == Some("hd") && f.width <= 1280 {
                0
            } else {
                1
            }
        });

        candidates
            .first()
            .copied()
            .or(video.video_files.first())
            .cloned()
    }
}

#[async_trait]
impl MediaProviderPort for PexelsClient {
    fn name(&self) -> &'static str {
        "pexels"
    }

    async fn search(&self, query: &MediaQuery) -> Result<Vec<MediaItem>, MediaError> {
        // Over-fetch so the duration filter still leaves enough options
        let per_page = (query.count * 2).to_string();
        let response = self
            .client
            .get(self.search_url())
            .header("Authorization", &self.config.api_key)
            .query(&[
                ("query", query.query.as_str()),
                ("per_page", per_page.as_str()),
                ("orientation", "portrait"),
                ("size", "medium"),
                ("locale", "pt-BR"),
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

        let body: VideoSearchResponse = response
            .json()
            .await
            .map_err(|e| MediaError::InvalidResponse(e.to_string()))?;

        let target = query.target_duration.unwrap_or(DEFAULT_TARGET_SECONDS);
        let mut videos: Vec<PexelsVideo> = body
            .videos
            .into_iter()
            .filter(|v| v.duration >= MIN_CLIP_SECONDS && v.duration <= MAX_CLIP_SECONDS)
            .collect();
        videos.sort_by(|a, b| {
            let a_diff = (a.duration - target).abs();
            let b_diff = (b.duration - target).abs();
            a_diff.partial_cmp(&b_diff).unwrap_or(std::cmp::Ordering::Equal)
        });

        let items = videos
            .into_iter()
            .take(query.count)
            .filter_map(|video| {
                let file = Self::pick_file(&video)?;
                let mut item =
                    MediaItem::new(MediaType::Video, file.link, video.image.clone(), "pexels");
                item.duration_seconds = Some(video.duration);
                item.width = Some(file.width);
                item.height = Some(file.height);
                item.quality = file.quality;
                Some(item)
            })
            .collect();

        Ok(items)
    }
}
