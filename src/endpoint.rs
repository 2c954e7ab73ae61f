//! Endpoint resolution and per-candidate health tracking
//!
//! The client knows several candidate base URLs (local, local-alt,
//! production). Exactly one is active at any time. Resolution runs at
//! startup: when a local context is preferred, candidates are probed in
//! order and the first reachable one wins, falling back to the primary
//! local candidate if nothing answers. Outside a local context the
//! production candidate is selected unconditionally.
//!
//! Health state is also updated opportunistically from data-request
//! outcomes, which is what allows the retry path to swap the active
//! endpoint mid-operation. Resolution never raises; the worst case is an
//! active candidate with unknown reachability.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::RwLock;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::EndpointsConfig;
use crate::constants::page::PROBE_LIMIT;

/// Named endpoint candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndpointKind {
    Local,
    LocalAlt,
    Production,
}

impl EndpointKind {
    /// All candidates in probe/preference order
    pub const ALL: [Self; 3] = [Self::Local, Self::LocalAlt, Self::Production];

    /// Stable name for logging and status display
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::LocalAlt => "local-alt",
            Self::Production => "production",
        }
    }
}

impl std::fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last-known reachability of a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reachability {
    /// Never probed and no request outcome recorded yet
    #[default]
    Unknown,
    Reachable,
    Unreachable,
}

/// Health information for a single candidate
#[derive(Debug, Clone, Default)]
pub struct EndpointHealth {
    /// Current reachability
    pub reachability: Reachability,
    /// When the state was last updated
    pub last_check: Option<Instant>,
    /// Consecutive failures since the last success
    pub consecutive_failures: u32,
    /// Total successful probes and requests
    pub total_successes: u64,
    /// Total failed probes and requests
    pub total_failures: u64,
}

impl EndpointHealth {
    /// Record a successful probe or data request
    pub fn record_success(&mut self) {
        self.reachability = Reachability::Reachable;
        self.last_check = Some(Instant::now());
        self.consecutive_failures = 0;
        self.total_successes += 1;
    }

    /// Record a failed probe or data request
    pub fn record_failure(&mut self) {
        self.reachability = Reachability::Unreachable;
        self.last_check = Some(Instant::now());
        self.consecutive_failures += 1;
        self.total_failures += 1;
    }
}

/// Read-only health snapshot of one candidate, for status display
#[derive(Debug, Clone, serde::Serialize)]
pub struct EndpointStatus {
    pub kind: EndpointKind,
    pub url: String,
    pub reachability: Reachability,
    pub consecutive_failures: u32,
}

/// Reachability test for a candidate base URL
///
/// Implementations must swallow their own failures: an unreachable
/// endpoint is an answer, not an error.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn check(&self, base_url: &str) -> bool;
}

/// Probe that issues a minimal listing request over HTTP
///
/// Success is an HTTP 200 within the probe timeout; any transport error,
/// timeout or other status counts as unreachable.
pub struct HttpProbe {
    http: reqwest::Client,
}

impl HttpProbe {
    pub fn new(config: &EndpointsConfig) -> anyhow::Result<Self> {
        use anyhow::Context;

        let http = reqwest::Client::builder()
            .timeout(config.probe_timeout)
            .build()
            .context("failed to build probe HTTP client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl HealthProbe for HttpProbe {
    async fn check(&self, base_url: &str) -> bool {
        let result = self
            .http
            .get(base_url)
            .query(&[("limit", PROBE_LIMIT.to_string())])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await;

        match result {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(error) => {
                debug!(url = base_url, %error, "health probe failed");
                false
            }
        }
    }
}

/// Decides which candidate base URL is active and tracks candidate health
pub struct EndpointResolver {
    config: EndpointsConfig,
    prefer_local: bool,
    health: DashMap<EndpointKind, EndpointHealth>,
    active: RwLock<EndpointKind>,
    probe: Box<dyn HealthProbe>,
}

impl EndpointResolver {
    /// Create a resolver with an injected probe (tests use scripted probes)
    #[must_use]
    pub fn new(config: EndpointsConfig, prefer_local: bool, probe: Box<dyn HealthProbe>) -> Self {
        let health = DashMap::new();
        for kind in EndpointKind::ALL {
            health.insert(kind, EndpointHealth::default());
        }
        Self {
            config,
            prefer_local,
            health,
            // Production is the safe initial choice until resolution runs
            active: RwLock::new(EndpointKind::Production),
            probe,
        }
    }

    /// Create a resolver backed by an HTTP probe
    pub fn with_http_probe(config: EndpointsConfig, prefer_local: bool) -> anyhow::Result<Self> {
        let probe = HttpProbe::new(&config)?;
        Ok(Self::new(config, prefer_local, Box::new(probe)))
    }

    /// Base URL of a candidate
    #[must_use]
    pub fn url_of(&self, kind: EndpointKind) -> &str {
        match kind {
            EndpointKind::Local => &self.config.local,
            EndpointKind::LocalAlt => &self.config.local_alt,
            EndpointKind::Production => &self.config.production,
        }
    }

    /// The currently active candidate
    #[must_use]
    pub fn active(&self) -> EndpointKind {
        *self.active.read().expect("active endpoint lock poisoned")
    }

    /// Base URL of the currently active candidate
    #[must_use]
    pub fn active_base(&self) -> String {
        self.url_of(self.active()).to_string()
    }

    fn set_active(&self, kind: EndpointKind) {
        let mut active = self.active.write().expect("active endpoint lock poisoned");
        if *active != kind {
            info!(endpoint = %kind, url = self.url_of(kind), "switching active endpoint");
        }
        *active = kind;
    }

    /// Last-known reachability of a candidate
    #[must_use]
    pub fn reachability(&self, kind: EndpointKind) -> Reachability {
        self.health
            .get(&kind)
            .map(|h| h.reachability)
            .unwrap_or_default()
    }

    /// Probe one candidate and record the outcome
    async fn probe_candidate(&self, kind: EndpointKind) -> bool {
        let reachable = self.probe.check(self.url_of(kind)).await;
        let mut health = self.health.entry(kind).or_default();
        if reachable {
            health.record_success();
        } else {
            health.record_failure();
        }
        debug!(endpoint = %kind, reachable, "health probe completed");
        reachable
    }

    /// Decide the active candidate
    ///
    /// Never raises. When no candidate answers in a local-preferring
    /// context, the primary local candidate stays active regardless of
    /// reachability; downstream requests may then fail, which is
    /// acceptable since nothing responded.
    pub async fn resolve_active(&self) {
        if self.prefer_local {
            for kind in EndpointKind::ALL {
                if self.probe_candidate(kind).await {
                    self.set_active(kind);
                    return;
                }
            }
            warn!("no endpoint candidate responded; staying on local");
            self.set_active(EndpointKind::Local);
        } else {
            // Production is selected regardless of the probe outcome;
            // there is no further candidate to fall back to. The probe
            // still runs to seed the health state.
            self.probe_candidate(EndpointKind::Production).await;
            self.set_active(EndpointKind::Production);
        }
    }

    /// Record a failed data request against the active candidate
    pub fn note_active_failure(&self) {
        let active = self.active();
        if let Some(mut health) = self.health.get_mut(&active) {
            health.record_failure();
        }
    }

    /// Record a successful data request against the active candidate
    pub fn note_active_success(&self) {
        let active = self.active();
        if let Some(mut health) = self.health.get_mut(&active) {
            health.record_success();
        }
    }

    /// Switch away from a known-unreachable active candidate
    ///
    /// Only acts when the active candidate is known-unreachable and some
    /// other candidate is known-reachable. Returns whether a switch
    /// happened.
    pub fn swap_if_unreachable(&self) -> bool {
        let active = self.active();
        if self.reachability(active) != Reachability::Unreachable {
            return false;
        }

        let alternate = EndpointKind::ALL
            .into_iter()
            .find(|&kind| kind != active && self.reachability(kind) == Reachability::Reachable);

        match alternate {
            Some(kind) => {
                info!(from = %active, to = %kind, "swapping away from unreachable endpoint");
                self.set_active(kind);
                true
            }
            None => false,
        }
    }

    /// Health snapshot of every candidate, in preference order
    #[must_use]
    pub fn statuses(&self) -> Vec<EndpointStatus> {
        EndpointKind::ALL
            .into_iter()
            .map(|kind| {
                let health = self.health.get(&kind);
                EndpointStatus {
                    kind,
                    url: self.url_of(kind).to_string(),
                    reachability: health.as_ref().map(|h| h.reachability).unwrap_or_default(),
                    consecutive_failures: health.map(|h| h.consecutive_failures).unwrap_or(0),
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for EndpointResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointResolver")
            .field("active", &self.active())
            .field("prefer_local", &self.prefer_local)
            .finish_non_exhaustive()
    }
}
