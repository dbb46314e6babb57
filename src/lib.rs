//! Plethora: a search-and-scrape web research engine.
//!
//! Issues a query against DuckDuckGo's HTML endpoint, merges and
//! deduplicates paginated results, then fetches and extracts structured
//! content from result pages (and optionally their same-domain sub-pages)
//! under bounded concurrency. Failures never escape the engine as errors:
//! a bad page becomes a record whose text says what went wrong.
//!
//! ```no_run
//! use plethora::{EngineConfig, ResearchEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = ResearchEngine::new(EngineConfig::default())?;
//!     let results = engine.search("rust async runtimes", 5).await;
//!     let urls: Vec<String> = results.iter().map(|r| r.url.clone()).collect();
//!     let pages = engine.scrape_batch(&urls, 500).await;
//!     println!("{} pages scraped", pages.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod scrape;
pub mod search;
pub mod session;
pub mod utils;

pub use config::{EngineConfig, EngineConfigBuilder};
pub use error::{ScrapeError, ScrapeResult};
pub use extract::{PageLink, PageRecord, clean_text};
pub use fetch::{FetchClient, FetchedDocument};
pub use search::SearchResult;
pub use session::{DetailLevel, ResearchSession, SessionOptions};

use anyhow::Result;

/// Handle over the whole engine: one shared HTTP client plus configuration.
///
/// Stateless across calls; every method is an independent operation and the
/// handle is cheap to clone.
#[derive(Debug, Clone)]
pub struct ResearchEngine {
    config: EngineConfig,
    fetcher: FetchClient,
}

impl ResearchEngine {
    /// Build an engine from configuration.
    ///
    /// # Errors
    /// Fails only if the underlying HTTP client cannot be constructed.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let fetcher = FetchClient::new(&config)?;
        Ok(Self { config, fetcher })
    }

    /// The configuration this engine was built with
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Search for up to `num_results` unique results.
    ///
    /// Never errors: failed result pages contribute nothing and a total
    /// absence of results is the empty list.
    pub async fn search(&self, query: &str, num_results: usize) -> Vec<SearchResult> {
        search::run_search(
            &self.fetcher,
            self.config.search_endpoint(),
            query,
            num_results,
        )
        .await
    }

    /// Scrape one page into a [`PageRecord`]; failures become sentinel text.
    pub async fn scrape_page(&self, url: &str, max_len: usize) -> PageRecord {
        scrape::scrape_page(&self.fetcher, url, max_len).await
    }

    /// Scrape many pages under the configured concurrency width. The output
    /// has the same length and order as `urls`.
    pub async fn scrape_batch(&self, urls: &[String], max_len: usize) -> Vec<PageRecord> {
        scrape::scrape_batch(
            &self.fetcher,
            urls,
            max_len,
            self.config.scrape_concurrency(),
        )
        .await
    }

    /// Run the full search-then-scrape pipeline at the given detail level.
    pub async fn run_session(
        &self,
        query: &str,
        level: DetailLevel,
        options: SessionOptions,
    ) -> ResearchSession {
        session::run(self, query, level, options).await
    }
}
