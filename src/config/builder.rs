//! Builder for [`EngineConfig`] with validation
//!
//! Invalid combinations (zero concurrency, zero deadline, unparseable
//! endpoint) are rejected at build time so the engine never has to re-check
//! them in hot paths.

use anyhow::{Result, anyhow};
use url::Url;

use super::types::{DEFAULT_SEARCH_ENDPOINT, EngineConfig};
use crate::utils::constants::{
    ACCEPT_LANGUAGE, DEFAULT_FETCH_TIMEOUT_SECS, SCRAPE_CONCURRENCY, USER_AGENT,
};

/// Fluent builder for [`EngineConfig`]
#[derive(Debug, Clone)]
pub struct EngineConfigBuilder {
    fetch_timeout_secs: u64,
    scrape_concurrency: usize,
    user_agent: String,
    accept_language: String,
    search_endpoint: String,
    relay_prefix: Option<String>,
}

impl Default for EngineConfigBuilder {
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

impl EngineConfigBuilder {
    /// Set the per-retrieval deadline in seconds
    #[must_use]
    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = secs;
        self
    }

    /// Set the batch chunk width
    #[must_use]
    pub fn scrape_concurrency(mut self, width: usize) -> Self {
        self.scrape_concurrency = width;
        self
    }

    /// Override the user agent
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// Override the Accept-Language header
    #[must_use]
    pub fn accept_language(mut self, lang: impl Into<String>) -> Self {
        self.accept_language = lang.into();
        self
    }

    /// Override the search results endpoint
    #[must_use]
    pub fn search_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.search_endpoint = endpoint.into();
        self
    }

    /// Route every request through a relay: the target URL is appended,
    /// percent-encoded, to this prefix
    #[must_use]
    pub fn relay_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.relay_prefix = Some(prefix.into());
        self
    }

    /// Validate and build the configuration
    ///
    /// # Errors
    /// Returns an error for a zero deadline, zero concurrency width, an
    /// endpoint that is not an absolute URL, or an empty relay prefix.
    pub fn build(self) -> Result<EngineConfig> {
        if self.fetch_timeout_secs == 0 {
            return Err(anyhow!("fetch timeout must be at least 1 second"));
        }
        if self.scrape_concurrency == 0 {
            return Err(anyhow!("scrape concurrency must be at least 1"));
        }
        Url::parse(&self.search_endpoint)
            .map_err(|e| anyhow!("invalid search endpoint '{}': {e}", self.search_endpoint))?;
        if let Some(prefix) = &self.relay_prefix
            && prefix.trim().is_empty()
        {
            return Err(anyhow!("relay prefix must not be empty"));
        }

        Ok(EngineConfig {
            fetch_timeout_secs: self.fetch_timeout_secs,
            scrape_concurrency: self.scrape_concurrency,
            user_agent: self.user_agent,
            accept_language: self.accept_language,
            search_endpoint: self.search_endpoint,
            relay_prefix: self.relay_prefix,
        })
    }
}
