//! Result-page parsing
//!
//! Turns one page of raw DuckDuckGo HTML search results into an ordered list
//! of [`SearchResult`]s. Anchors and snippets are paired by index; a missing
//! or misaligned snippet just becomes an empty string. Redirect-wrapped
//! hrefs are unwrapped to their real targets here; deduplication is the
//! orchestrator's job, not the parser's.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::trace;
use url::Url;

use super::types::{REDIRECT_BASE, RESULT_ANCHOR_SELECTOR, RESULT_SNIPPET_SELECTOR, SearchResult};
use crate::extract::clean_inline;

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(RESULT_ANCHOR_SELECTOR)
        .expect("BUG: hardcoded CSS selector '.result__a' is invalid")
});

static SNIPPET_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(RESULT_SNIPPET_SELECTOR)
        .expect("BUG: hardcoded CSS selector '.result__snippet' is invalid")
});

/// Parse one page of search-results markup into ordered results.
#[must_use]
pub fn parse_result_page(html: &str) -> Vec<SearchResult> {
    let document = Html::parse_document(html);

    let snippets: Vec<String> = document
        .select(&SNIPPET_SELECTOR)
        .map(|el| clean_inline(&el.text().collect::<String>()))
        .collect();

    document
        .select(&ANCHOR_SELECTOR)
        .enumerate()
        .filter_map(|(index, anchor)| {
            let href = anchor.value().attr("href")?;
            if href.trim().is_empty() {
                return None;
            }
            let title = clean_inline(&anchor.text().collect::<String>());
            Some(SearchResult {
                title,
                url: unwrap_redirect(href),
                snippet: snippets.get(index).cloned().unwrap_or_default(),
            })
        })
        .collect()
}

/// Unwrap a search-engine redirect href to its real target.
///
/// DuckDuckGo wraps result targets as `/l/?uddg=<encoded url>&rut=...`. The
/// `uddg` value comes back percent-decoded from the query parse and is
/// decoded once more, matching the double decode the engine has always
/// performed. On any failure (unparseable href, missing or empty parameter,
/// bad escape sequence) the original href is returned unchanged, even when
/// that means handing back an engine-internal tracking URL.
pub(crate) fn unwrap_redirect(href: &str) -> String {
    if !href.contains("uddg=") {
        return href.to_string();
    }

    let Ok(base) = Url::parse(REDIRECT_BASE) else {
        return href.to_string();
    };
    let Ok(wrapped) = base.join(href) else {
        trace!(href, "redirect href did not parse, keeping original");
        return href.to_string();
    };

    let Some(target) = wrapped
        .query_pairs()
        .find(|(key, _)| key == "uddg")
        .map(|(_, value)| value.into_owned())
    else {
        return href.to_string();
    };
    if target.is_empty() {
        return href.to_string();
    }

    match urlencoding::decode(&target) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            trace!(href, "redirect target failed to decode, keeping original");
            href.to_string()
        }
    }
}
