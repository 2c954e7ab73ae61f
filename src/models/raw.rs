//! Wire-format response shapes
//!
//! Backend revisions disagree on details: ids arrive as numbers or strings,
//! most fields are optional, and the categories resource has been seen under
//! two different keys. These types absorb all of that; conversion to the
//! strict model happens in the parent module.

use serde::{Deserialize, Serialize};

use crate::models::{MediaItem, MediaKind};

/// An id that may arrive as a JSON number or string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Int(i64),
    Text(String),
}

impl RawId {
    /// Normalize to `i64`, parsing string ids
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Text(value) => value.trim().parse().ok(),
        }
    }
}

/// A news item as it appears on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawNewsItem {
    pub id: Option<RawId>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub content_html: Option<String>,
    pub category: Option<String>,
    pub link: Option<String>,
    pub publish_date: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub reading_time: Option<u32>,
    pub views_count: Option<u64>,
    pub media: Option<Vec<RawMediaItem>>,
    pub source_name: Option<String>,
    pub source_url: Option<String>,
}

/// A media attachment as it appears on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMediaItem {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub duration: Option<u32>,
}

impl RawMediaItem {
    /// Convert to the strict model; `None` if the kind is unknown or the
    /// primary URL is missing
    #[must_use]
    pub fn into_media(self) -> Option<MediaItem> {
        let kind = match self.kind.as_deref() {
            Some("photo") => MediaKind::Photo,
            Some("video") => MediaKind::Video,
            _ => return None,
        };
        let url = self.url.filter(|u| !u.is_empty())?;

        Some(MediaItem {
            kind,
            url,
            thumbnail: self.thumbnail,
            width: self.width,
            height: self.height,
            duration: self.duration,
        })
    }
}

/// A news listing response as it appears on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPageResponse {
    pub status: Option<String>,
    pub message: Option<String>,
    pub data: Vec<RawNewsItem>,
    pub total: Option<u64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub pages: Option<u32>,
}

/// The categories resource response
///
/// One backend revision keys the list as `data`, another as `categories`;
/// accept both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCategoriesResponse {
    pub status: Option<String>,
    #[serde(alias = "categories")]
    pub data: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_id_from_number_and_string() {
        let int: RawId = serde_json::from_str("15").unwrap();
        assert_eq!(int.as_i64(), Some(15));

        let text: RawId = serde_json::from_str("\"15\"").unwrap();
        assert_eq!(text.as_i64(), Some(15));

        let junk: RawId = serde_json::from_str("\"fifteen\"").unwrap();
        assert_eq!(junk.as_i64(), None);
    }

    #[test]
    fn test_empty_page_response_deserializes() {
        let response: RawPageResponse = serde_json::from_str("{}").unwrap();
        assert!(response.data.is_empty());
        assert_eq!(response.total, None);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let response: RawPageResponse = serde_json::from_str(
            r#"{"data": [], "server_time": "2024-01-01T00:00:00Z", "debug": true}"#,
        )
        .unwrap();
        assert!(response.data.is_empty());
    }

    #[test]
    fn test_categories_under_either_key() {
        let data_key: RawCategoriesResponse =
            serde_json::from_str(r#"{"data": ["gifts", "crypto"]}"#).unwrap();
        assert_eq!(data_key.data, vec!["gifts", "crypto"]);

        let categories_key: RawCategoriesResponse =
            serde_json::from_str(r#"{"categories": ["tech"]}"#).unwrap();
        assert_eq!(categories_key.data, vec!["tech"]);
    }

    #[test]
    fn test_media_missing_url_dropped() {
        let media = RawMediaItem {
            kind: Some("video".to_string()),
            url: None,
            ..Default::default()
        };
        assert!(media.into_media().is_none());
    }
}
