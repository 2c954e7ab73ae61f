//! Configuration type definitions
//!
//! All knobs of the client are grouped here: endpoint candidates, timeouts,
//! retry policy and cache TTL. Every struct deserializes with serde and
//! falls back to the values in [`crate::constants`] field by field, so a
//! partial configuration document is always valid.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants;

/// Serde helper for durations expressed as integer milliseconds
pub mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

/// Default value functions used in serde deserialization
mod defaults {
    use crate::constants;
    use std::time::Duration;

    #[inline]
    pub fn local_url() -> String {
        constants::endpoint::LOCAL_URL.to_string()
    }

    #[inline]
    pub fn local_alt_url() -> String {
        constants::endpoint::LOCAL_ALT_URL.to_string()
    }

    #[inline]
    pub fn production_url() -> String {
        constants::endpoint::PRODUCTION_URL.to_string()
    }

    #[inline]
    pub fn probe_timeout() -> Duration {
        constants::timeout::PROBE
    }

    #[inline]
    pub fn request_timeout() -> Duration {
        constants::timeout::REQUEST
    }

    #[inline]
    pub fn max_attempts() -> u32 {
        constants::retry::MAX_ATTEMPTS
    }

    #[inline]
    pub fn base_delay() -> Duration {
        constants::retry::BASE_DELAY
    }

    #[inline]
    pub fn cache_ttl() -> Duration {
        constants::cache::TTL
    }
}

/// Main client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Candidate backend base URLs
    pub endpoints: EndpointsConfig,
    /// Retry policy for data requests
    pub retry: RetryPolicy,
    /// Response cache settings
    pub cache: CacheConfig,
    /// Timeout for data requests
    #[serde(with = "duration_millis")]
    pub request_timeout: Duration,
    /// Whether endpoint resolution should try local candidates first
    ///
    /// Supplied by the host application (e.g. a hostname check); the
    /// client treats it as an opaque boolean.
    pub prefer_local: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointsConfig::default(),
            retry: RetryPolicy::default(),
            cache: CacheConfig::default(),
            request_timeout: defaults::request_timeout(),
            prefer_local: false,
        }
    }
}

/// Candidate base URLs and probe settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Primary local development backend
    pub local: String,
    /// Alternate local backend
    pub local_alt: String,
    /// Production backend
    pub production: String,
    /// Timeout for health probes
    #[serde(with = "duration_millis")]
    pub probe_timeout: Duration,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            local: defaults::local_url(),
            local_alt: defaults::local_alt_url(),
            production: defaults::production_url(),
            probe_timeout: defaults::probe_timeout(),
        }
    }
}

/// Retry policy for data requests
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetryPolicy {
    /// Maximum attempts per logical request (1 = no retries)
    pub max_attempts: u32,
    /// Base delay; attempt N waits `base_delay * N` before the next try
    #[serde(with = "duration_millis")]
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: defaults::max_attempts(),
            base_delay: defaults::base_delay(),
        }
    }
}

/// Response cache settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Time-to-live for cached responses
    #[serde(with = "duration_millis")]
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: defaults::cache_ttl(),
        }
    }
}
