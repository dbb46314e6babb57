//! Error types for fetch and extraction operations
//!
//! Every failure the engine can hit while retrieving or extracting a page is
//! classified here. Errors never cross the `search`/`scrape_page`/
//! `scrape_batch` boundary: at that edge they are rendered into the sentinel
//! text carried inside a [`PageRecord`](crate::extract::PageRecord), so
//! downstream consumers always receive data.

use thiserror::Error;

/// Result type alias for fetch and extraction operations
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Failure classification for a single fetch-and-extract operation
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The retrieval did not complete within its deadline
    #[error("request timed out")]
    Timeout,

    /// Network failure or non-success HTTP status
    #[error("transport failure: {0}")]
    Transport(String),

    /// Declared content type is neither HTML, XHTML, nor plain text
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// Body too short to be a real page (blocked, consent wall, error stub)
    #[error("empty or blocked response")]
    DegenerateResponse,

    /// Malformed URL met during link resolution or redirect unwrapping.
    /// Always recovered locally (fallback value or dropped link); carried
    /// here for the rare caller that wants to log it.
    #[error("parse anomaly: {0}")]
    ParseAnomaly(String),
}

impl ScrapeError {
    /// Render the failure as the sentinel text placed in a failed page
    /// record's `text` field.
    #[must_use]
    pub fn sentinel_text(&self) -> String {
        match self {
            ScrapeError::Timeout => "[Error: Timed out]".to_string(),
            ScrapeError::Transport(msg) => format!("[Error: {msg}]"),
            ScrapeError::UnsupportedContentType(ct) => format!("[Non-HTML content: {ct}]"),
            ScrapeError::DegenerateResponse => "[Empty or blocked response]".to_string(),
            ScrapeError::ParseAnomaly(msg) => format!("[Error: {msg}]"),
        }
    }

    /// Whether this failure came from the transport layer (as opposed to the
    /// content gates). Transport failures are the ones worth surfacing in
    /// warn-level logs during a batch.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, ScrapeError::Timeout | ScrapeError::Transport(_))
    }
}
