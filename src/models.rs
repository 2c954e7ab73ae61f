//! Internal data model for news content
//!
//! The types here are the strict, validated shapes the rest of the crate
//! works with. Responses arrive as the loose wire shapes in [`raw`] and are
//! converted at the boundary, so nothing past the decode step has to deal
//! with optional ids or mixed field types.

pub mod raw;

use serde::{Deserialize, Serialize};

use crate::constants::fallback;
use crate::error::FetchError;

/// Media attachment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

/// A media attachment owned by exactly one news item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub kind: MediaKind,
    pub url: String,
    pub thumbnail: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Video duration in seconds
    pub duration: Option<u32>,
}

/// A single unit of news content
///
/// Immutable once constructed; the client stores and forwards items but
/// never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    /// Plain-text body
    pub content: String,
    /// HTML body, when the backend provides one
    pub content_html: Option<String>,
    pub category: String,
    pub link: Option<String>,
    pub publish_date: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    /// Estimated reading time in minutes
    pub reading_time: Option<u32>,
    pub views_count: Option<u64>,
    #[serde(default)]
    pub media: Vec<MediaItem>,
    pub source_name: Option<String>,
    pub source_url: Option<String>,
}

impl NewsItem {
    /// The synthetic placeholder item served when retrieval fails entirely
    #[must_use]
    pub fn service_unavailable() -> Self {
        Self {
            id: fallback::UNAVAILABLE_ID,
            title: fallback::UNAVAILABLE_TITLE.to_string(),
            content: fallback::UNAVAILABLE_BODY.to_string(),
            content_html: None,
            category: fallback::UNAVAILABLE_CATEGORY.to_string(),
            link: None,
            publish_date: None,
            subtitle: None,
            author: None,
            reading_time: None,
            views_count: None,
            media: Vec::new(),
            source_name: None,
            source_url: None,
        }
    }
}

/// One page of a news listing plus pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsPage {
    pub items: Vec<NewsItem>,
    /// Total item count across all pages, when the server reports it
    pub total: Option<u64>,
    /// 1-based page number
    pub page: u32,
    /// Requested page size
    pub limit: u32,
    /// Total page count, when the server reports it
    pub pages: Option<u32>,
}

impl NewsPage {
    /// Convert a wire page response, dropping items that fail validation
    ///
    /// A single malformed item must not blank the whole feed, so invalid
    /// entries are logged and skipped. Pagination metadata missing from
    /// the response falls back to the requested values.
    #[must_use]
    pub fn from_raw(response: raw::RawPageResponse, requested_page: u32, limit: u32) -> Self {
        let mut items = Vec::with_capacity(response.data.len());
        for raw_item in response.data {
            match NewsItem::try_from(raw_item) {
                Ok(item) => items.push(item),
                Err(error) => {
                    tracing::warn!(%error, "dropping malformed news item from listing");
                }
            }
        }

        Self {
            items,
            total: response.total,
            page: response.page.unwrap_or(requested_page),
            limit: response.limit.unwrap_or(limit),
            pages: response.pages,
        }
    }

    /// The degraded single-item page served when all attempts fail
    #[must_use]
    pub fn fallback(requested_page: u32, limit: u32) -> Self {
        Self {
            items: vec![NewsItem::service_unavailable()],
            total: None,
            page: requested_page,
            limit,
            pages: None,
        }
    }
}

impl TryFrom<raw::RawNewsItem> for NewsItem {
    type Error = FetchError;

    fn try_from(raw: raw::RawNewsItem) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .as_ref()
            .and_then(raw::RawId::as_i64)
            .ok_or_else(|| FetchError::InvalidItem {
                reason: "missing or non-numeric id".to_string(),
            })?;

        let title = raw
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(FetchError::InvalidItem {
                reason: format!("item {} has no title", id),
            })?;

        let media = raw
            .media
            .unwrap_or_default()
            .into_iter()
            .filter_map(raw::RawMediaItem::into_media)
            .collect();

        Ok(Self {
            id,
            title,
            content: raw.content.unwrap_or_default(),
            content_html: raw.content_html,
            category: raw
                .category
                .unwrap_or_else(|| fallback::UNAVAILABLE_CATEGORY.to_string()),
            link: raw.link,
            publish_date: raw.publish_date,
            subtitle: raw.subtitle,
            author: raw.author,
            reading_time: raw.reading_time,
            views_count: raw.views_count,
            media,
            source_name: raw.source_name,
            source_url: raw.source_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_item(json: &str) -> raw::RawNewsItem {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_numeric_id_converts() {
        let item = NewsItem::try_from(raw_item(r#"{"id": 7, "title": "Hello"}"#)).unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.title, "Hello");
        assert_eq!(item.category, "general");
        assert!(item.media.is_empty());
    }

    #[test]
    fn test_string_id_converts() {
        let item = NewsItem::try_from(raw_item(r#"{"id": "42", "title": "Hello"}"#)).unwrap();
        assert_eq!(item.id, 42);
    }

    #[test]
    fn test_missing_id_rejected() {
        let err = NewsItem::try_from(raw_item(r#"{"title": "Hello"}"#)).unwrap_err();
        assert!(matches!(err, FetchError::InvalidItem { .. }));
    }

    #[test]
    fn test_non_numeric_string_id_rejected() {
        let err = NewsItem::try_from(raw_item(r#"{"id": "abc", "title": "Hello"}"#)).unwrap_err();
        assert!(matches!(err, FetchError::InvalidItem { .. }));
    }

    #[test]
    fn test_blank_title_rejected() {
        let err = NewsItem::try_from(raw_item(r#"{"id": 1, "title": "   "}"#)).unwrap_err();
        assert!(matches!(err, FetchError::InvalidItem { .. }));
    }

    #[test]
    fn test_media_conversion_skips_unknown_kinds() {
        let item = NewsItem::try_from(raw_item(
            r#"{
                "id": 1,
                "title": "With media",
                "media": [
                    {"type": "photo", "url": "https://cdn/img.jpg", "width": 800, "height": 600},
                    {"type": "audio", "url": "https://cdn/clip.mp3"},
                    {"type": "video"}
                ]
            }"#,
        ))
        .unwrap();

        // Unknown kind and missing url are both dropped
        assert_eq!(item.media.len(), 1);
        assert_eq!(item.media[0].kind, MediaKind::Photo);
        assert_eq!(item.media[0].width, Some(800));
    }

    #[test]
    fn test_page_from_raw_skips_invalid_items() {
        let response: raw::RawPageResponse = serde_json::from_str(
            r#"{
                "data": [
                    {"id": 1, "title": "Good"},
                    {"title": "No id"},
                    {"id": 2, "title": "Also good"}
                ],
                "total": 40,
                "page": 2,
                "limit": 20,
                "pages": 2
            }"#,
        )
        .unwrap();

        let page = NewsPage::from_raw(response, 2, 20);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, Some(40));
        assert_eq!(page.page, 2);
        assert_eq!(page.pages, Some(2));
    }

    #[test]
    fn test_page_from_raw_defaults_missing_metadata() {
        let response: raw::RawPageResponse =
            serde_json::from_str(r#"{"data": [{"id": 1, "title": "Only"}]}"#).unwrap();

        let page = NewsPage::from_raw(response, 3, 10);
        assert_eq!(page.page, 3);
        assert_eq!(page.limit, 10);
        assert_eq!(page.total, None);
    }

    #[test]
    fn test_fallback_page_is_renderable() {
        let page = NewsPage::fallback(1, 20);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].category, "general");
        assert!(!page.items[0].title.is_empty());
        assert_eq!(page.page, 1);
    }
}
