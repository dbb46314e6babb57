//! Page scraping boundary
//!
//! The last stop before results leave the engine: [`scrape_page`] turns any
//! fetch or extraction failure into a sentinel-bearing [`PageRecord`], and
//! [`scrape_batch`] runs many URLs under a fixed concurrency width while
//! guaranteeing output order equals input order. Nothing in this module
//! returns an error.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::error::ScrapeResult;
use crate::extract::{self, PageRecord};
use crate::fetch::FetchClient;

/// Scrape one page into a structured record.
///
/// Always returns a record: on failure the record is empty except for a
/// sentinel `text` describing what went wrong.
pub async fn scrape_page(fetcher: &FetchClient, url: &str, max_len: usize) -> PageRecord {
    match fetch_and_extract(fetcher, url, max_len).await {
        Ok(record) => record,
        Err(e) => {
            if e.is_transport() {
                warn!(url, error = %e, "page scrape failed");
            } else {
                debug!(url, error = %e, "page rejected by content gate");
            }
            PageRecord::failure(&e)
        }
    }
}

async fn fetch_and_extract(
    fetcher: &FetchClient,
    url: &str,
    max_len: usize,
) -> ScrapeResult<PageRecord> {
    let doc = fetcher.fetch(url).await?;
    extract::extract_page(&doc, url, max_len)
}

/// Scrape many pages, bounding concurrency with fixed-size chunks.
///
/// The input is split into chunks of `width`; within a chunk every
/// fetch+extract runs concurrently, and the next chunk starts only once the
/// whole chunk has resolved, so peak in-flight requests never exceed
/// `width`. The output has the same length and order as `urls` regardless
/// of completion order, and a failing URL fills its own slot with a
/// sentinel record without disturbing its neighbors.
pub async fn scrape_batch(
    fetcher: &FetchClient,
    urls: &[String],
    max_len: usize,
    width: usize,
) -> Vec<PageRecord> {
    let width = width.max(1);
    let mut records = Vec::with_capacity(urls.len());

    for (chunk_index, chunk) in urls.chunks(width).enumerate() {
        debug!(chunk = chunk_index, size = chunk.len(), "scraping chunk");
        let chunk_records = join_all(
            chunk
                .iter()
                .map(|url| scrape_page(fetcher, url, max_len)),
        )
        .await;
        records.extend(chunk_records);
    }

    records
}
