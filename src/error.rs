//! Error types for news retrieval
//!
//! This module provides detailed error types for the fetch pipeline,
//! making it easier to diagnose and handle different failure scenarios.

use std::fmt;

/// Errors that can occur while fetching news data
#[derive(Debug)]
#[non_exhaustive]
pub enum FetchError {
    /// No response within the request deadline
    Timeout { url: String },

    /// Server answered with a non-2xx status
    Http { url: String, status: u16 },

    /// Connection-level failure (DNS, refused, reset, TLS)
    Network {
        url: String,
        source: reqwest::Error,
    },

    /// Response body could not be decoded as the expected JSON shape
    Decode {
        url: String,
        source: reqwest::Error,
    },

    /// A wire item was missing fields required by the internal model
    InvalidItem { reason: String },

    /// Every attempt failed; carries the error of the final attempt
    RetriesExhausted { attempts: u32, last: Box<FetchError> },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout { url } => write!(f, "Request to {} timed out", url),
            Self::Http { url, status } => {
                write!(f, "Server at {} returned HTTP {}", url, status)
            }
            Self::Network { url, source } => {
                write!(f, "Network error requesting {}: {}", url, source)
            }
            Self::Decode { url, source } => {
                write!(f, "Failed to decode response from {}: {}", url, source)
            }
            Self::InvalidItem { reason } => write!(f, "Invalid news item: {}", reason),
            Self::RetriesExhausted { attempts, last } => {
                write!(f, "All {} attempts failed; last error: {}", attempts, last)
            }
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Network { source, .. } | Self::Decode { source, .. } => Some(source),
            Self::RetriesExhausted { last, .. } => Some(last.as_ref()),
            _ => None,
        }
    }
}

impl FetchError {
    /// Classify a transport error from reqwest against the URL it targeted
    #[must_use]
    pub fn from_transport(url: String, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url }
        } else {
            Self::Network { url, source }
        }
    }

    /// Check if this is a timeout
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Check if this is a connectivity failure (timeout or network)
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Network { .. })
    }

    /// Check if the server itself failed (HTTP 5xx)
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Http { status, .. } if *status >= 500)
    }

    /// The error of the final attempt, unwrapping retry exhaustion
    #[must_use]
    pub fn last_cause(&self) -> &FetchError {
        match self {
            Self::RetriesExhausted { last, .. } => last.last_cause(),
            other => other,
        }
    }

    /// Get the appropriate log level for this error
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        match self {
            // Transient connectivity problems are expected and retried
            Self::Timeout { .. } | Self::Network { .. } => tracing::Level::WARN,
            // A malformed response shape means a contract break
            Self::Decode { .. } | Self::InvalidItem { .. } => tracing::Level::ERROR,
            Self::Http { status, .. } if *status >= 500 => tracing::Level::WARN,
            Self::Http { .. } => tracing::Level::ERROR,
            // Exhaustion is what callers act on
            Self::RetriesExhausted { .. } => tracing::Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_timeout_display() {
        let err = FetchError::Timeout {
            url: "http://localhost:8000/api/news/".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("localhost:8000"));
        assert!(msg.contains("timed out"));
    }

    #[test]
    fn test_http_error_display() {
        let err = FetchError::Http {
            url: "http://localhost:8000/api/news/".to_string(),
            status: 503,
        };

        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("localhost:8000"));
    }

    #[test]
    fn test_retries_exhausted_carries_last_error() {
        let err = FetchError::RetriesExhausted {
            attempts: 3,
            last: Box::new(FetchError::Http {
                url: "http://localhost:8000/api/news/".to_string(),
                status: 502,
            }),
        };

        let msg = err.to_string();
        assert!(msg.contains("3 attempts"));
        assert!(msg.contains("502"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_last_cause_unwraps_exhaustion() {
        let err = FetchError::RetriesExhausted {
            attempts: 2,
            last: Box::new(FetchError::Timeout {
                url: "http://localhost:8000/api/news/".to_string(),
            }),
        };

        assert!(err.last_cause().is_timeout());
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_is_network_error() {
        let err = FetchError::Timeout {
            url: "http://test/".to_string(),
        };
        assert!(err.is_network_error());

        let err = FetchError::Http {
            url: "http://test/".to_string(),
            status: 500,
        };
        assert!(!err.is_network_error());
        assert!(err.is_server_error());
    }

    #[test]
    fn test_invalid_item_display() {
        let err = FetchError::InvalidItem {
            reason: "missing title".to_string(),
        };
        assert!(err.to_string().contains("missing title"));
    }

    #[test]
    fn test_log_level() {
        let timeout = FetchError::Timeout {
            url: "http://test/".to_string(),
        };
        assert_eq!(timeout.log_level(), tracing::Level::WARN);

        let not_found = FetchError::Http {
            url: "http://test/".to_string(),
            status: 404,
        };
        assert_eq!(not_found.log_level(), tracing::Level::ERROR);

        let bad_gateway = FetchError::Http {
            url: "http://test/".to_string(),
            status: 502,
        };
        assert_eq!(bad_gateway.log_level(), tracing::Level::WARN);
    }
}
