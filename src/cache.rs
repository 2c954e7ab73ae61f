//! In-memory response cache with lazy TTL expiry
//!
//! Entries older than the configured TTL are treated as absent on lookup
//! but are not proactively swept; an expired entry stays in storage until
//! it is overwritten or the cache is cleared. Growth within a session is
//! unbounded, which is acceptable for the single-session scope.

use dashmap::DashMap;
use std::time::{Duration, Instant};

use crate::models::{NewsItem, NewsPage};

/// A cached response payload
///
/// The cache is shared between operations with different result types,
/// so values are stored pre-converted under a type tag rather than as
/// raw JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Page(NewsPage),
    Item(NewsItem),
    Categories(Vec<String>),
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: CachedValue,
    stored_at: Instant,
}

impl CacheEntry {
    /// Expired exactly at the TTL boundary (`elapsed >= ttl`)
    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }
}

/// Key/value store of recently fetched responses with per-entry expiry
#[derive(Debug)]
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ResponseCache {
    /// Create a cache whose entries expire after `ttl`
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Get the payload for `key` if a fresh entry exists
    #[must_use]
    pub fn get(&self, key: &str) -> Option<CachedValue> {
        let entry = self.entries.get(key)?;
        if entry.is_expired(self.ttl) {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Store `value` under `key`, overwriting any previous entry and
    /// resetting its timestamp
    pub fn insert(&self, key: impl Into<String>, value: CachedValue) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, expired ones included
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cache key for a news listing request
#[must_use]
pub fn page_key(category: Option<&str>, page: u32, limit: u32) -> String {
    format!("news_{}_{}_{}", category.unwrap_or("all"), page, limit)
}

/// Cache key for a single news item
#[must_use]
pub fn item_key(id: i64) -> String {
    format!("news_item_{}", id)
}

/// Cache key for the category list
pub const CATEGORIES_KEY: &str = "categories";
