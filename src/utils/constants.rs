//! Shared configuration constants for the research engine
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Default fetch timeout: 15 seconds
///
/// Applied per retrieval, search pages and content pages alike. Long enough
/// for slow origins, short enough that one dead host cannot stall a batch
/// chunk for more than one deadline.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

/// Scrape concurrency width: 6 pages in flight
///
/// Batch scraping processes URLs in fixed-size chunks of this width. All
/// fetches inside a chunk run concurrently; the next chunk starts only after
/// the previous one fully resolves, so peak in-flight requests never exceed
/// this value.
pub const SCRAPE_CONCURRENCY: usize = 6;

/// Results per search result page
///
/// The DuckDuckGo HTML endpoint returns roughly this many organic results
/// per page. Used to derive how many pages a request for N results needs.
pub const RESULTS_PER_PAGE: usize = 20;

/// Maximum number of search result pages fetched for one query
///
/// Caps request fan-out regardless of how many results the caller asks for.
pub const MAX_SEARCH_PAGES: usize = 5;

/// Minimum body length for a response to count as real content
///
/// Bodies shorter than this are treated as blocked or empty responses
/// (consent walls, bot interstitials, error stubs) rather than pages worth
/// extracting.
pub const MIN_DOCUMENT_LENGTH: usize = 100;

/// Maximum headings extracted from one page
pub const MAX_HEADINGS: usize = 10;

/// Maximum outbound links extracted from one page
pub const MAX_LINKS: usize = 20;

/// Maximum visible-text length kept per extracted link, in characters
pub const MAX_LINK_TEXT_LEN: usize = 80;

/// Minimum visible-text length for a link to be kept, in characters
pub const MIN_LINK_TEXT_LEN: usize = 3;

/// Browser user agent sent with every request
///
/// Matches a current desktop Chrome build. Several search endpoints serve
/// degraded or empty markup to unknown agents.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Accept-Language header sent with every request
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
