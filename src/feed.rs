//! Feed pagination controller
//!
//! Maintains the accumulated, paged item list behind a scrolling feed:
//! loading flags, has-more detection and load-more with rollback.
//!
//! Rapid category switches can leave a superseded request in flight; its
//! result must not leak into the new feed. Every mutation is gated on a
//! generation counter captured when the request started: a category
//! change bumps the generation, and any result carrying a stale
//! generation is discarded.

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::client::NewsFetcher;
use crate::models::NewsItem;

/// Lifecycle phase of the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// No category selected yet
    Idle,
    /// First page of the current category is loading
    LoadingInitial,
    /// At least one page is shown
    Loaded,
    /// A subsequent page is loading
    LoadingMore,
    /// The initial load failed; nothing usable to show
    Error,
}

/// Snapshot of the feed state for rendering
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub items: Vec<NewsItem>,
    pub phase: FeedPhase,
    pub page: u32,
    pub has_more: bool,
    /// User-facing message, set only in the `Error` phase
    pub error: Option<String>,
}

impl FeedSnapshot {
    /// Whether the initial load is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, FeedPhase::LoadingInitial)
    }

    /// Whether a load-more request is in flight
    #[must_use]
    pub const fn is_loading_more(&self) -> bool {
        matches!(self.phase, FeedPhase::LoadingMore)
    }
}

#[derive(Debug)]
struct FeedState {
    items: Vec<NewsItem>,
    category: Option<String>,
    page: u32,
    has_more: bool,
    phase: FeedPhase,
    error: Option<String>,
    /// Bumped on every category change; stale results carry an older value
    generation: u64,
}

/// Accumulates paged listings into a scrollable feed
pub struct FeedController {
    fetcher: Arc<dyn NewsFetcher>,
    page_size: u32,
    state: Mutex<FeedState>,
}

impl FeedController {
    #[must_use]
    pub fn new(fetcher: Arc<dyn NewsFetcher>, page_size: u32) -> Self {
        Self {
            fetcher,
            page_size,
            state: Mutex::new(FeedState {
                items: Vec::new(),
                category: None,
                page: 1,
                has_more: true,
                phase: FeedPhase::Idle,
                error: None,
                generation: 0,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().expect("feed state lock poisoned")
    }

    /// Current feed state for rendering
    #[must_use]
    pub fn snapshot(&self) -> FeedSnapshot {
        let state = self.state();
        FeedSnapshot {
            items: state.items.clone(),
            phase: state.phase,
            page: state.page,
            has_more: state.has_more,
            error: state.error.clone(),
        }
    }

    /// Switch category and load its first page
    ///
    /// Resets pagination, bumps the generation (so in-flight results for
    /// the previous category are discarded) and replaces the item list on
    /// success. On failure the feed enters the `Error` phase; the item
    /// list is left untouched.
    pub async fn set_category(&self, category: Option<&str>) {
        let generation = {
            let mut state = self.state();
            state.generation += 1;
            state.category = category.map(str::to_string);
            state.page = 1;
            state.has_more = true;
            state.phase = FeedPhase::LoadingInitial;
            state.error = None;
            state.generation
        };

        let result = self
            .fetcher
            .list_news(category, 1, self.page_size, true)
            .await;

        let mut state = self.state();
        if state.generation != generation {
            debug!("discarding stale initial load result");
            return;
        }

        match result {
            Ok(page) => {
                state.has_more = page.items.len() as u32 == self.page_size;
                state.items = page.items;
                state.phase = FeedPhase::Loaded;
                state.error = None;
            }
            Err(error) => {
                warn!(%error, "initial feed load failed");
                state.phase = FeedPhase::Error;
                state.error = Some("Failed to load news".to_string());
            }
        }
    }

    /// Load the next page and append it
    ///
    /// Only meaningful on a loaded feed: a no-op unless the phase is
    /// `Loaded` with more pages available, so calls while idle, loading
    /// or in the error phase never fetch. Bypasses the cache so
    /// subsequent pages are always fresh. A failure rolls the page
    /// counter back and is otherwise non-fatal: the already-loaded feed
    /// stays usable.
    pub async fn load_more(&self) {
        let (generation, category, next_page) = {
            let mut state = self.state();
            if state.phase != FeedPhase::Loaded || !state.has_more {
                return;
            }
            state.page += 1;
            state.phase = FeedPhase::LoadingMore;
            (state.generation, state.category.clone(), state.page)
        };

        let result = self
            .fetcher
            .list_news(category.as_deref(), next_page, self.page_size, false)
            .await;

        let mut state = self.state();
        if state.generation != generation {
            debug!(page = next_page, "discarding stale load-more result");
            return;
        }

        match result {
            Ok(page) => {
                let full_page = page.items.len() as u32 == self.page_size;
                // Prefer the server's total count when it reports one;
                // fall back to the page-length heuristic otherwise
                state.has_more = match page.total {
                    Some(total) => full_page && total > u64::from(next_page * self.page_size),
                    None => full_page,
                };
                state.items.extend(page.items);
                state.phase = FeedPhase::Loaded;
            }
            Err(error) => {
                debug!(%error, page = next_page, "load-more failed, rolling back page counter");
                state.page -= 1;
                state.phase = FeedPhase::Loaded;
            }
        }
    }
}

impl std::fmt::Debug for FeedController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("FeedController")
            .field("page_size", &self.page_size)
            .field("phase", &state.phase)
            .field("items", &state.items.len())
            .field("page", &state.page)
            .finish_non_exhaustive()
    }
}
