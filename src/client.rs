//! News retrieval service
//!
//! [`NewsClient`] composes the response cache, endpoint resolver and retry
//! executor into the public operations consumed by the feed: list a page
//! of news, fetch a single item, list categories, clear the cache and
//! report a diagnostic status snapshot.
//!
//! Failure contracts differ per operation. Listings and categories degrade
//! gracefully (a synthetic placeholder page, a default category list)
//! because the feed UI must always have something to render. A single
//! missing article cannot be degraded meaningfully, so `news_by_id`
//! propagates its error.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::cache::{self, CachedValue, ResponseCache};
use crate::config::ClientConfig;
use crate::constants::{endpoint::CATEGORIES_PATH, fallback};
use crate::endpoint::{EndpointKind, EndpointResolver, EndpointStatus};
use crate::error::FetchError;
use crate::models::raw::{RawCategoriesResponse, RawNewsItem, RawPageResponse};
use crate::models::{NewsItem, NewsPage};
use crate::retry::execute_with_retry;

/// Listing operation consumed by the feed controller
///
/// A seam so the pagination logic can be driven by scripted fakes in
/// tests. The fallible contract is deliberate: the controller needs to
/// distinguish failure for its error and rollback states.
#[async_trait]
pub trait NewsFetcher: Send + Sync {
    async fn list_news(
        &self,
        category: Option<&str>,
        page: u32,
        limit: u32,
        use_cache: bool,
    ) -> Result<NewsPage, FetchError>;
}

/// Read-only diagnostic snapshot
#[derive(Debug, Clone, serde::Serialize)]
pub struct ClientStatus {
    pub active_endpoint: EndpointKind,
    pub endpoints: Vec<EndpointStatus>,
    pub cache_entries: usize,
}

/// The API resolution, caching and retrieval layer
///
/// Constructed once per application instance and passed by reference to
/// consumers; tests construct isolated instances.
pub struct NewsClient {
    http: reqwest::Client,
    config: ClientConfig,
    cache: ResponseCache,
    resolver: EndpointResolver,
}

impl NewsClient {
    /// Build a client with an HTTP-probing endpoint resolver
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let resolver =
            EndpointResolver::with_http_probe(config.endpoints.clone(), config.prefer_local)?;
        Self::with_resolver(config, resolver)
    }

    /// Build a client around an existing resolver (tests inject scripted
    /// probes this way)
    pub fn with_resolver(config: ClientConfig, resolver: EndpointResolver) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .context("failed to build HTTP client")?;

        let cache = ResponseCache::new(config.cache.ttl);
        Ok(Self {
            http,
            config,
            cache,
            resolver,
        })
    }

    /// Run endpoint resolution (call once at startup)
    pub async fn resolve_endpoints(&self) {
        self.resolver.resolve_active().await;
        debug!(active = %self.resolver.active(), "endpoint resolution complete");
    }

    /// List one page of news, degrading to a placeholder page on total
    /// failure
    pub async fn list_news(
        &self,
        category: Option<&str>,
        page: u32,
        limit: u32,
        use_cache: bool,
    ) -> NewsPage {
        match self.try_list_news(category, page, limit, use_cache).await {
            Ok(result) => result,
            Err(error) => {
                warn!(%error, page, "news listing failed after retries, serving fallback page");
                NewsPage::fallback(page, limit)
            }
        }
    }

    /// List one page of news, propagating retry exhaustion
    pub async fn try_list_news(
        &self,
        category: Option<&str>,
        page: u32,
        limit: u32,
        use_cache: bool,
    ) -> Result<NewsPage, FetchError> {
        let category = normalize_category(category);
        let key = cache::page_key(category, page, limit);

        if use_cache && let Some(CachedValue::Page(cached)) = self.cache.get(&key) {
            debug!(%key, "news listing served from cache");
            return Ok(cached);
        }

        let raw = execute_with_retry(&self.resolver, &self.config.retry, || {
            self.fetch_page_once(category, page, limit)
        })
        .await?;

        let result = NewsPage::from_raw(raw, page, limit);
        debug!(
            page,
            items = result.items.len(),
            total = ?result.total,
            "news listing fetched"
        );

        if use_cache {
            self.cache.insert(key, CachedValue::Page(result.clone()));
        }
        Ok(result)
    }

    /// Fetch a single news item by id
    pub async fn news_by_id(&self, id: i64) -> Result<NewsItem, FetchError> {
        let key = cache::item_key(id);
        if let Some(CachedValue::Item(cached)) = self.cache.get(&key) {
            debug!(id, "news item served from cache");
            return Ok(cached);
        }

        let raw = execute_with_retry(&self.resolver, &self.config.retry, || {
            self.fetch_item_once(id)
        })
        .await?;

        let item = NewsItem::try_from(raw)?;
        self.cache.insert(key, CachedValue::Item(item.clone()));
        Ok(item)
    }

    /// List category identifiers, degrading to the default list on total
    /// failure (the feed must always render some category filter)
    pub async fn categories(&self) -> Vec<String> {
        if let Some(CachedValue::Categories(cached)) = self.cache.get(cache::CATEGORIES_KEY) {
            return cached;
        }

        let fetched = execute_with_retry(&self.resolver, &self.config.retry, || {
            self.fetch_categories_once()
        })
        .await;

        match fetched {
            Ok(response) if !response.data.is_empty() => {
                self.cache.insert(
                    cache::CATEGORIES_KEY,
                    CachedValue::Categories(response.data.clone()),
                );
                response.data
            }
            Ok(_) => {
                debug!("categories endpoint returned an empty list, using defaults");
                default_categories()
            }
            Err(error) => {
                warn!(%error, "category listing failed after retries, using defaults");
                default_categories()
            }
        }
    }

    /// Empty the response cache
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Diagnostic snapshot of endpoint state and cache size
    #[must_use]
    pub fn status(&self) -> ClientStatus {
        ClientStatus {
            active_endpoint: self.resolver.active(),
            endpoints: self.resolver.statuses(),
            cache_entries: self.cache.len(),
        }
    }

    async fn fetch_page_once(
        &self,
        category: Option<&str>,
        page: u32,
        limit: u32,
    ) -> Result<RawPageResponse, FetchError> {
        let base = self.resolver.active_base();
        let mut request = self
            .http
            .get(&base)
            .query(&[("page", page.to_string()), ("limit", limit.to_string())]);
        if let Some(category) = category {
            request = request.query(&[("category", category)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_transport(base.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                url: base,
                status: status.as_u16(),
            });
        }

        response
            .json::<RawPageResponse>()
            .await
            .map_err(|e| FetchError::Decode {
                url: base,
                source: e,
            })
    }

    async fn fetch_item_once(&self, id: i64) -> Result<RawNewsItem, FetchError> {
        let url = format!("{}{}", self.resolver.active_base(), id);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::from_transport(url.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<RawNewsItem>()
            .await
            .map_err(|e| FetchError::Decode { url, source: e })
    }

    async fn fetch_categories_once(&self) -> Result<RawCategoriesResponse, FetchError> {
        let url = format!("{}{}", self.resolver.active_base(), CATEGORIES_PATH);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::from_transport(url.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<RawCategoriesResponse>()
            .await
            .map_err(|e| FetchError::Decode { url, source: e })
    }
}

#[async_trait]
impl NewsFetcher for NewsClient {
    async fn list_news(
        &self,
        category: Option<&str>,
        page: u32,
        limit: u32,
        use_cache: bool,
    ) -> Result<NewsPage, FetchError> {
        self.try_list_news(category, page, limit, use_cache).await
    }
}

/// Treat `"all"` and the empty string as no category filter
fn normalize_category(category: Option<&str>) -> Option<&str> {
    category.filter(|c| !c.is_empty() && *c != "all")
}

/// The hardcoded category list used when the endpoint cannot supply one
fn default_categories() -> Vec<String> {
    fallback::DEFAULT_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .collect()
}
