//! Structured records produced by page extraction

use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;

/// One outbound link discovered on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    /// Normalized visible text of the anchor (3–80 characters)
    pub text: String,
    /// Absolute http(s) target URL
    pub url: String,
}

/// Structured content extracted from one fetched document
///
/// A record is produced for every scraped URL, success or failure. On
/// failure every field is empty and `text` carries a sentinel describing
/// what went wrong (see [`ScrapeError::sentinel_text`]); errors are data,
/// never exceptions, past the scrape boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageRecord {
    /// Document title, normalized
    pub title: String,
    /// Description meta-tag content, normalized
    pub meta: String,
    /// First h1–h3 headings in document order (at most 10)
    pub headings: Vec<String>,
    /// Primary body text, normalized and capped to the caller's length
    pub text: String,
    /// Outbound links (at most 20), resolved to absolute URLs
    pub links: Vec<PageLink>,
}

impl PageRecord {
    /// Build the failure record for an error: all fields empty, sentinel
    /// text describing the failure.
    #[must_use]
    pub fn failure(error: &ScrapeError) -> Self {
        Self {
            text: error.sentinel_text(),
            ..Self::default()
        }
    }

    /// Whether this record carries a failure sentinel instead of content
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.title.is_empty()
            && self.headings.is_empty()
            && self.links.is_empty()
            && self.text.starts_with('[')
            && self.text.ends_with(']')
    }
}
