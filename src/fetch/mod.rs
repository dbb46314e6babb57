//! Single-retrieval fetch gateway
//!
//! One [`FetchClient`] is shared by the whole engine. Each call performs
//! exactly one outbound request under its own deadline and normalizes every
//! transport outcome into a [`ScrapeError`]. Retry policy, if any, belongs to
//! callers; none is applied here.

use std::time::Duration;

use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::error::{ScrapeError, ScrapeResult};

/// A fetched document body with its declared content type
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// Value of the Content-Type response header, if any (parameters such as
    /// `; charset=utf-8` stripped)
    pub content_type: Option<String>,
    /// Decoded response body
    pub body: String,
}

/// HTTP retrieval client with per-call deadline and transport indirection
///
/// Works identically whether requests go straight to the target or through a
/// relay that forwards the target URL as a parameter; the relay is a
/// deployment concern configured once in [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: reqwest::Client,
    timeout: Duration,
    relay_prefix: Option<String>,
}

impl FetchClient {
    /// Build the shared client from engine configuration
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed
    /// (malformed header values, TLS backend initialization).
    pub fn new(config: &EngineConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(config.accept_language())?,
        );

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            timeout: config.fetch_timeout(),
            relay_prefix: config.relay_prefix().map(str::to_string),
        })
    }

    /// Retrieve one URL within the configured deadline
    ///
    /// # Errors
    /// - [`ScrapeError::Timeout`] if the retrieval (headers and body) does
    ///   not complete in time
    /// - [`ScrapeError::Transport`] for connection failures and non-2xx
    ///   statuses
    pub async fn fetch(&self, url: &str) -> ScrapeResult<FetchedDocument> {
        let request_url = self.request_url(url);
        trace!(url, request_url = %request_url, "fetching");

        let result = tokio::time::timeout(self.timeout, self.fetch_inner(&request_url)).await;
        match result {
            Ok(Ok(doc)) => {
                debug!(url, bytes = doc.body.len(), "fetch complete");
                Ok(doc)
            }
            Ok(Err(e)) => Err(e),
            Err(_elapsed) => Err(ScrapeError::Timeout),
        }
    }

    async fn fetch_inner(&self, request_url: &str) -> ScrapeResult<FetchedDocument> {
        let response = self
            .client
            .get(request_url)
            .send()
            .await
            .map_err(|e| ScrapeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Transport(format!("HTTP {status}")));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| {
                v.split(';')
                    .next()
                    .unwrap_or(v)
                    .trim()
                    .to_ascii_lowercase()
            });

        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::Transport(e.to_string()))?;

        Ok(FetchedDocument { content_type, body })
    }

    /// Compose the URL actually requested: the target itself, or the relay
    /// endpoint with the target appended percent-encoded.
    fn request_url(&self, target: &str) -> String {
        match &self.relay_prefix {
            Some(prefix) => format!("{prefix}{}", urlencoding::encode(target)),
            None => target.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_relay(prefix: Option<&str>) -> FetchClient {
        let mut builder = EngineConfig::builder();
        if let Some(p) = prefix {
            builder = builder.relay_prefix(p);
        }
        let config = builder.build().expect("test config");
        FetchClient::new(&config).expect("test client")
    }

    #[test]
    fn direct_request_url_is_target() {
        let client = client_with_relay(None);
        assert_eq!(
            client.request_url("https://example.com/a?b=c"),
            "https://example.com/a?b=c"
        );
    }

    #[test]
    fn relay_request_url_encodes_target() {
        let client = client_with_relay(Some("https://relay.example/raw?url="));
        assert_eq!(
            client.request_url("https://example.com/a?b=c"),
            "https://relay.example/raw?url=https%3A%2F%2Fexample.com%2Fa%3Fb%3Dc"
        );
    }
}
