//! Data structures and constants for web search

use serde::{Deserialize, Serialize};

// =============================================================================
// Constants
// =============================================================================

/// CSS selector for result title anchors on a DuckDuckGo HTML result page.
/// The anchor carries both the visible title and the (redirect-wrapped) URL.
pub const RESULT_ANCHOR_SELECTOR: &str = ".result__a";

/// CSS selector for result snippets, paired with anchors by index
pub const RESULT_SNIPPET_SELECTOR: &str = ".result__snippet";

/// Base used to resolve redirect-wrapped hrefs, which arrive scheme-relative
/// (`//duckduckgo.com/l/?uddg=...`) or path-relative (`/l/?uddg=...`)
pub const REDIRECT_BASE: &str = "https://duckduckgo.com";

/// Maximum accepted query length, in characters
pub const MAX_QUERY_LENGTH: usize = 500;

// =============================================================================
// Data Structures
// =============================================================================

/// A single search result with title, URL, and snippet
///
/// Immutable once created; `url` is the uniqueness key within one search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title text
    pub title: String,

    /// Absolute target URL (redirect wrapping already removed)
    pub url: String,

    /// Description snippet, empty when the result page had none
    pub snippet: String,
}
