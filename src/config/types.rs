//! Core configuration types for the research engine

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::utils::constants::{
    ACCEPT_LANGUAGE, DEFAULT_FETCH_TIMEOUT_SECS, SCRAPE_CONCURRENCY, USER_AGENT,
};

/// Default DuckDuckGo HTML search endpoint
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Configuration for the research engine
///
/// Construct via [`EngineConfig::builder`] or use [`Default`] for the stock
/// setup (direct transport, 15s deadline, width-6 batches).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Deadline applied to each individual retrieval, in seconds
    pub(crate) fetch_timeout_secs: u64,

    /// Fixed chunk width for batch scraping (peak in-flight requests)
    pub(crate) scrape_concurrency: usize,

    /// User agent sent with every request
    pub(crate) user_agent: String,

    /// Accept-Language header sent with every request
    pub(crate) accept_language: String,

    /// Search results endpoint (query and pagination parameters appended)
    pub(crate) search_endpoint: String,

    /// Optional relay prefix for environments that cannot reach targets
    /// directly. When set, every request goes to
    /// `<relay_prefix><urlencoded target url>` and the relay forwards the
    /// response body unchanged. The rest of the engine is indifferent to
    /// which transport is in use.
    pub(crate) relay_prefix: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            scrape_concurrency: SCRAPE_CONCURRENCY,
            user_agent: USER_AGENT.to_string(),
            accept_language: ACCEPT_LANGUAGE.to_string(),
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            relay_prefix: None,
        }
    }
}

impl EngineConfig {
    /// Start building a configuration
    #[must_use]
    pub fn builder() -> super::EngineConfigBuilder {
        super::EngineConfigBuilder::default()
    }

    /// Per-retrieval deadline
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Batch chunk width
    #[must_use]
    pub fn scrape_concurrency(&self) -> usize {
        self.scrape_concurrency
    }

    /// User agent string
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Accept-Language header value
    #[must_use]
    pub fn accept_language(&self) -> &str {
        &self.accept_language
    }

    /// Search results endpoint
    #[must_use]
    pub fn search_endpoint(&self) -> &str {
        &self.search_endpoint
    }

    /// Relay prefix, if routing through an intermediate relay
    #[must_use]
    pub fn relay_prefix(&self) -> Option<&str> {
        self.relay_prefix.as_deref()
    }
}
