//! Research session pipeline
//!
//! Drives the full search-then-scrape flow at a caller-chosen detail level:
//! low stops at search results, medium also extracts every result page, and
//! high additionally follows a bounded number of same-domain outbound links
//! per page. The engine itself stays stateless; the session value is the
//! caller-held record of one run.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::ResearchEngine;
use crate::extract::PageRecord;
use crate::search::SearchResult;
use crate::utils::is_valid_url;

/// Text cap for result pages at medium detail, in characters
const MEDIUM_PAGE_TEXT_LEN: usize = 500;

/// Text cap for result pages at high detail, in characters
const HIGH_PAGE_TEXT_LEN: usize = 2000;

/// Text cap for sub-pages, in characters
const SUBPAGE_TEXT_LEN: usize = 800;

/// How deep one research run goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    /// Search results only
    Low,
    /// Results plus page extraction
    Medium,
    /// Results, page extraction, and same-domain sub-page extraction
    High,
}

impl FromStr for DetailLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(DetailLevel::Low),
            "medium" => Ok(DetailLevel::Medium),
            "high" => Ok(DetailLevel::High),
            other => Err(format!("unknown detail level '{other}' (expected low, medium, or high)")),
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DetailLevel::Low => "low",
            DetailLevel::Medium => "medium",
            DetailLevel::High => "high",
        };
        f.write_str(name)
    }
}

/// Tunables for one research run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOptions {
    /// How many search results to collect
    pub num_results: usize,
    /// Maximum sub-pages followed per result page at high detail
    pub max_subpages: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            num_results: 5,
            max_subpages: 2,
        }
    }
}

/// The assembled output of one research run
///
/// `pages` is index-aligned with `results`; `subpages` maps a parent
/// result's URL to the records of the sub-pages followed from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchSession {
    pub query: String,
    pub level: DetailLevel,
    pub started_at: DateTime<Utc>,
    pub results: Vec<SearchResult>,
    pub pages: Vec<PageRecord>,
    pub subpages: HashMap<String, Vec<PageRecord>>,
}

/// Run the full pipeline for one query.
pub(crate) async fn run(
    engine: &ResearchEngine,
    query: &str,
    level: DetailLevel,
    options: SessionOptions,
) -> ResearchSession {
    info!(query, %level, num_results = options.num_results, "starting research session");

    let results = engine.search(query, options.num_results).await;
    let mut session = ResearchSession {
        query: query.to_string(),
        level,
        started_at: Utc::now(),
        results,
        pages: Vec::new(),
        subpages: HashMap::new(),
    };

    if level == DetailLevel::Low || session.results.is_empty() {
        return session;
    }

    let page_text_len = match level {
        DetailLevel::High => HIGH_PAGE_TEXT_LEN,
        _ => MEDIUM_PAGE_TEXT_LEN,
    };
    let urls: Vec<String> = session.results.iter().map(|r| r.url.clone()).collect();
    session.pages = engine.scrape_batch(&urls, page_text_len).await;

    if level == DetailLevel::High && options.max_subpages > 0 {
        session.subpages = scrape_subpages(engine, &session, options.max_subpages).await;
    }

    info!(
        results = session.results.len(),
        pages = session.pages.len(),
        subpage_sets = session.subpages.len(),
        "research session complete"
    );
    session
}

/// Follow outbound links from each scraped page, staying on the parent
/// page's domain and never visiting the same URL twice within the session.
async fn scrape_subpages(
    engine: &ResearchEngine,
    session: &ResearchSession,
    max_subpages: usize,
) -> HashMap<String, Vec<PageRecord>> {
    let mut seen: HashSet<String> = session.results.iter().map(|r| r.url.clone()).collect();
    let mut subpages = HashMap::new();

    for (result, page) in session.results.iter().zip(session.pages.iter()) {
        if page.is_failure() {
            continue;
        }
        let Some(parent_host) = host_of(&result.url) else {
            continue;
        };

        let mut candidates = Vec::new();
        for link in &page.links {
            if candidates.len() >= max_subpages {
                break;
            }
            if is_valid_url(&link.url)
                && host_of(&link.url).as_deref() == Some(parent_host.as_str())
                && seen.insert(link.url.clone())
            {
                candidates.push(link.url.clone());
            }
        }
        if candidates.is_empty() {
            continue;
        }

        info!(parent = %result.url, count = candidates.len(), "scraping sub-pages");
        let records = engine.scrape_batch(&candidates, SUBPAGE_TEXT_LEN).await;
        subpages.insert(result.url.clone(), records);
    }

    subpages
}

fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}
