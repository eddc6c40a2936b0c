//! Stock media search results

use serde::{Deserialize, Serialize};

/// Kind of media requested or returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "imagem")]
    Image,
    #[serde(rename = "gif")]
    Gif,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Video => "video",
            MediaType::Image => "imagem",
            MediaType::Gif => "gif",
        }
    }
}

impl std::str::FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(MediaType::Video),
            // Both spellings are accepted on the wire
            "imagem" | "image" => Ok(MediaType::Image),
            "gif" => Ok(MediaType::Gif),
            other => Err(format!("Unknown media type: {}", other)),
        }
    }
}

/// One stock media result, normalized across providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "tipo")]
    pub media_type: MediaType,

    pub url: String,

    /// Thumbnail / preview URL
    pub preview: String,

    /// Provider name ("pexels", "giphy", "unsplash")
    #[serde(rename = "fonte")]
    pub source: String,

    #[serde(rename = "duracao", skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,

    #[serde(rename = "largura", skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(rename = "altura", skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(rename = "qualidade", skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,

    #[serde(rename = "titulo", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "autor", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl MediaItem {
    /// Minimal item with only the fields every provider fills in
    pub fn new(
        media_type: MediaType,
        url: impl Into<String>,
        preview: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            media_type,
            url: url.into(),
            preview: preview.into(),
            source: source.into(),
            duration_seconds: None,
            width: None,
            height: None,
            quality: None,
            title: None,
            description: None,
            author: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_parse() {
        assert_eq!("video".parse::<MediaType>().unwrap(), MediaType::Video);
        assert_eq!("imagem".parse::<MediaType>().unwrap(), MediaType::Image);
        assert_eq!("image".parse::<MediaType>().unwrap(), MediaType::Image);
        assert_eq!("gif".parse::<MediaType>().unwrap(), MediaType::Gif);
        assert!("audio".parse::<MediaType>().is_err());
    }

    #[test]
    fn test_optional_fields_omitted_from_wire() {
        let item = MediaItem::new(MediaType::Gif, "https://u", "https://p", "giphy");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["tipo"], "gif");
        assert_eq!(json["fonte"], "giphy");
        assert!(json.get("duracao").is_none());
        assert!(json.get("autor").is_none());
    }
}
