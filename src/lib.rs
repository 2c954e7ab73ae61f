//! Resilient news retrieval client
//!
//! The API resolution, caching and retrieval layer behind a categorized
//! news feed: it decides which backend endpoint to talk to, caches
//! responses with a bounded lifetime, retries failed requests with
//! backoff, degrades gracefully when every attempt fails and coordinates
//! load-more pagination for a scrolling UI.
//!
//! Typical wiring:
//!
//! ```no_run
//! use std::sync::Arc;
//! use news_client::{ClientConfig, FeedController, NewsClient};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let _log_guard = news_client::logging::init_logging(".")?;
//!
//! let client = Arc::new(NewsClient::new(ClientConfig::default())?);
//! client.resolve_endpoints().await;
//!
//! let feed = FeedController::new(client.clone(), 20);
//! feed.set_category(Some("crypto")).await;
//! feed.load_more().await;
//!
//! for item in feed.snapshot().items {
//!     println!("{}: {}", item.category, item.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod constants;
pub mod endpoint;
pub mod error;
pub mod feed;
pub mod logging;
pub mod models;
pub mod retry;

pub use cache::{CachedValue, ResponseCache};
pub use client::{ClientStatus, NewsClient, NewsFetcher};
pub use config::{CacheConfig, ClientConfig, EndpointsConfig, RetryPolicy};
pub use endpoint::{EndpointKind, EndpointResolver, EndpointStatus, HealthProbe, Reachability};
pub use error::FetchError;
pub use feed::{FeedController, FeedPhase, FeedSnapshot};
pub use models::{MediaItem, MediaKind, NewsItem, NewsPage};
