//! Paginated web search
//!
//! Issues one or more result-page requests concurrently, merges them in page
//! order, and deduplicates by URL keeping the first occurrence. Per-page
//! failures are contained: a page that times out or errors contributes
//! nothing, and a search that finds nothing at all returns an empty list
//! rather than an error. The consumer decides how to surface "no results".

pub mod parser;
pub mod types;

pub use types::{MAX_QUERY_LENGTH, SearchResult};

use std::collections::HashSet;

use futures::future::join_all;
use tracing::{debug, warn};
use url::Url;

use crate::fetch::FetchClient;
use crate::utils::constants::{MAX_SEARCH_PAGES, RESULTS_PER_PAGE};

/// Run a search, returning up to `num_results` unique results.
///
/// Fetches `min(5, ceil(num_results / 20))` result pages concurrently, each
/// under its own deadline, then merges in page-index order regardless of
/// completion order.
pub async fn run_search(
    fetcher: &FetchClient,
    endpoint: &str,
    query: &str,
    num_results: usize,
) -> Vec<SearchResult> {
    let trimmed = query.trim();
    if trimmed.is_empty() || num_results == 0 {
        warn!("empty query or zero results requested, skipping search");
        return Vec::new();
    }
    let query: String = if trimmed.chars().count() > MAX_QUERY_LENGTH {
        warn!(len = trimmed.len(), "query too long, truncating");
        trimmed.chars().take(MAX_QUERY_LENGTH).collect()
    } else {
        trimmed.to_string()
    };

    let pages_needed = num_results.div_ceil(RESULTS_PER_PAGE).min(MAX_SEARCH_PAGES);
    debug!(query = %query, num_results, pages_needed, "starting search");

    let requests = (0..pages_needed).map(|page| {
        let page_url = page_request_url(endpoint, &query, page);
        async move {
            match fetcher.fetch(&page_url).await {
                Ok(doc) => parser::parse_result_page(&doc.body),
                Err(e) => {
                    warn!(page, error = %e, "result page request failed, contributing nothing");
                    Vec::new()
                }
            }
        }
    });

    let pages = join_all(requests).await;

    // Merge in page order, first occurrence of each URL wins; stop as soon
    // as enough unique results have accumulated.
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged: Vec<SearchResult> = Vec::new();
    'pages: for (page_index, page_results) in pages.into_iter().enumerate() {
        debug!(page = page_index, count = page_results.len(), "merging result page");
        for result in page_results {
            if merged.len() >= num_results {
                break 'pages;
            }
            if seen.insert(result.url.clone()) {
                merged.push(result);
            }
        }
    }

    debug!(unique = merged.len(), "search complete");
    merged
}

/// Build the request URL for one result page: the query parameter plus, for
/// pages past the first, the result-offset pagination parameter.
fn page_request_url(endpoint: &str, query: &str, page: usize) -> String {
    match Url::parse(endpoint) {
        Ok(mut url) => {
            {
                let mut pairs = url.query_pairs_mut();
                pairs.append_pair("q", query);
                if page > 0 {
                    pairs.append_pair("s", &(page * RESULTS_PER_PAGE).to_string());
                }
            }
            url.to_string()
        }
        // Endpoint is validated at config build time; a bad override just
        // produces a request that fails and is contained like any other.
        Err(_) => endpoint.to_string(),
    }
}
