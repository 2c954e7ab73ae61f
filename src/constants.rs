//! Constants used throughout the news client
//!
//! This module centralizes endpoint addresses, timing parameters and
//! fallback content to improve maintainability and reduce duplication.

use std::time::Duration;

/// Candidate backend base URLs
///
/// Base URLs always end with a trailing slash so that item and
/// sub-resource paths can be appended directly.
pub mod endpoint {
    /// Primary local development backend
    pub const LOCAL_URL: &str = "http://localhost:8000/api/news/";

    /// Alternate local backend (production build served locally)
    pub const LOCAL_ALT_URL: &str = "http://localhost:8001/api/news/";

    /// Production backend
    pub const PRODUCTION_URL: &str = "https://giftpropaganda.onrender.com/api/news/";

    /// Path suffix for the category listing resource
    pub const CATEGORIES_PATH: &str = "categories/";
}

/// Timeout constants
pub mod timeout {
    use super::Duration;

    /// Timeout for data requests (listings, single items, categories)
    pub const REQUEST: Duration = Duration::from_secs(10);

    /// Timeout for health probes
    ///
    /// Much shorter than [`REQUEST`]: a probe only needs to establish
    /// that the endpoint answers at all, and the startup cascade may
    /// probe up to three candidates in sequence.
    pub const PROBE: Duration = Duration::from_secs(3);
}

/// Retry constants
pub mod retry {
    use super::Duration;

    /// Maximum request attempts (1 = no retries)
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Base delay between attempts; attempt N waits `BASE_DELAY * N`
    pub const BASE_DELAY: Duration = Duration::from_secs(1);
}

/// Cache constants
pub mod cache {
    use super::Duration;

    /// Time-to-live for cached responses (5 minutes)
    ///
    /// Entries older than this are treated as absent. Expiry is lazy:
    /// stale entries remain in storage until overwritten or cleared.
    pub const TTL: Duration = Duration::from_secs(5 * 60);
}

/// Pagination constants
pub mod page {
    /// Default page size for news listings
    pub const DEFAULT_LIMIT: u32 = 20;

    /// Page size used by health probes (smallest useful payload)
    pub const PROBE_LIMIT: u32 = 1;
}

/// Fallback content served when every retrieval attempt fails
///
/// The feed UI must never render a blank crash state, so listing and
/// category operations degrade to synthetic placeholders instead of
/// propagating errors.
pub mod fallback {
    /// Category list returned when the categories endpoint is unreachable
    pub const DEFAULT_CATEGORIES: &[&str] = &["gifts", "crypto", "tech", "community", "gaming"];

    /// Category assigned to the synthetic placeholder item
    pub const UNAVAILABLE_CATEGORY: &str = "general";

    /// Title of the synthetic placeholder item
    pub const UNAVAILABLE_TITLE: &str = "News service temporarily unavailable";

    /// Body of the synthetic placeholder item
    pub const UNAVAILABLE_BODY: &str =
        "The news feed could not be loaded. Please check your connection and try again later.";

    /// Id of the synthetic placeholder item (never collides with real ids)
    pub const UNAVAILABLE_ID: i64 = -1;
}
