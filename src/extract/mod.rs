//! Structured content extraction from fetched documents
//!
//! Turns raw page markup into a [`PageRecord`] by:
//! 1. Rejecting non-textual and degenerate responses up front
//! 2. Building an exclusion set of non-content subtrees (navigation, chrome,
//!    media, wiki furniture, ads, hidden elements) and skipping everything
//!    inside them
//! 3. Pulling title, meta description, headings, primary body text, and
//!    outbound links out of what remains
//!
//! Every step is best-effort: a missing element yields a default, never a
//! failure. The only failures this module produces are the content gates.

pub mod schema;
pub mod text;

pub use schema::{PageLink, PageRecord};
pub use text::{clean_inline, clean_text, truncate_chars};

use std::collections::HashSet;
use std::sync::LazyLock;

use ego_tree::NodeId;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::trace;
use url::Url;

use crate::error::{ScrapeError, ScrapeResult};
use crate::fetch::FetchedDocument;
use crate::utils::constants::{
    MAX_HEADINGS, MAX_LINK_TEXT_LEN, MAX_LINKS, MIN_DOCUMENT_LENGTH, MIN_LINK_TEXT_LEN,
};
use crate::utils::page_origin;

/// Placeholder body text for pages that parse but contain nothing readable
const NO_READABLE_CONTENT: &str = "[No readable content]";

// ============================================================================
// CSS Selectors
// ============================================================================

// Parsed once at first access and cached forever. Hardcoded selectors never
// fail to parse; if one does, it's a compile-time bug.

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("title").expect("BUG: hardcoded CSS selector 'title' is invalid")
});

static META_DESCRIPTION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("meta[name='description']")
        .expect("BUG: hardcoded CSS selector \"meta[name='description']\" is invalid")
});

static HEADING_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1, h2, h3").expect("BUG: hardcoded CSS selector 'h1, h2, h3' is invalid")
});

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a[href]").expect("BUG: hardcoded CSS selector 'a[href]' is invalid")
});

static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("body").expect("BUG: hardcoded CSS selector 'body' is invalid")
});

/// Subtrees that never contribute content: scripts and styling, page chrome,
/// embedded media, site-furniture tables and boxes, edit/reference/TOC
/// markup, ad and consent regions, and elements marked hidden or decorative.
const NON_CONTENT_SELECTORS: &[&str] = &[
    "script",
    "style",
    "noscript",
    "nav",
    "header",
    "footer",
    "aside",
    "iframe",
    "form",
    "button",
    "input",
    "select",
    "img",
    "picture",
    "figure",
    "svg",
    "table.infobox",
    "table.navbox",
    "table.sidebar",
    ".infobox",
    ".navbox",
    ".vertical-navbox",
    ".sidebar",
    ".mw-editsection",
    ".mw-jump-link",
    "sup.reference",
    ".reflist",
    ".toc",
    "#toc",
    ".ads",
    ".advertisement",
    ".cookie-notice",
    ".cookie-banner",
    ".popup",
    ".modal",
    "[hidden]",
    "[aria-hidden='true']",
    "[role='presentation']",
    "[style*='display:none']",
    "[style*='display: none']",
];

static STRIP_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    NON_CONTENT_SELECTORS
        .iter()
        .map(|sel| {
            Selector::parse(sel)
                .unwrap_or_else(|e| panic!("BUG: hardcoded CSS selector '{sel}' is invalid: {e}"))
        })
        .collect()
});

/// Primary-content containers, tried in priority order before falling back
/// to `<body>`. Preferring these avoids pulling boilerplate into the text.
const CONTENT_CONTAINER_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role='main']",
    "#main-content",
    ".main-content",
    "#content",
    ".content",
    ".post-content",
    ".entry-content",
    "[itemprop='articleBody']",
    ".article-body",
    ".story-body",
];

static CONTENT_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    CONTENT_CONTAINER_SELECTORS
        .iter()
        .map(|sel| {
            Selector::parse(sel)
                .unwrap_or_else(|e| panic!("BUG: hardcoded CSS selector '{sel}' is invalid: {e}"))
        })
        .collect()
});

/// Leading numeric outline prefix on headings ("1.2.3 Installation")
static OUTLINE_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+(\.\d+)*\.?\s+").expect("OUTLINE_PREFIX_RE: hardcoded regex is valid")
});

// ============================================================================
// Extraction
// ============================================================================

/// Extract a structured record from a fetched document.
///
/// # Errors
/// - [`ScrapeError::UnsupportedContentType`] when the declared content type
///   is neither HTML, XHTML, nor plain text
/// - [`ScrapeError::DegenerateResponse`] when the body is too short to be a
///   real page
pub fn extract_page(
    doc: &FetchedDocument,
    page_url: &str,
    max_len: usize,
) -> ScrapeResult<PageRecord> {
    if let Some(raw_type) = &doc.content_type {
        let declared = raw_type
            .split(';')
            .next()
            .unwrap_or(raw_type)
            .trim()
            .to_ascii_lowercase();
        if !is_textual_content_type(&declared) {
            return Err(ScrapeError::UnsupportedContentType(declared));
        }
    }

    if doc.body.len() < MIN_DOCUMENT_LENGTH {
        return Err(ScrapeError::DegenerateResponse);
    }

    Ok(extract_from_html(&doc.body, page_url, max_len))
}

fn is_textual_content_type(declared: &str) -> bool {
    matches!(declared, "text/html" | "application/xhtml+xml" | "text/plain")
}

/// Extract a structured record from raw markup. Infallible: absence of any
/// element yields a default field, and a page with nothing readable gets a
/// placeholder body text.
#[must_use]
pub fn extract_from_html(html: &str, page_url: &str, max_len: usize) -> PageRecord {
    let document = Html::parse_document(html);
    let excluded = build_exclusion_set(&document);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| clean_inline(&el.text().collect::<String>()))
        .unwrap_or_default();

    let meta = document
        .select(&META_DESCRIPTION_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(clean_inline)
        .unwrap_or_default();

    let headings = extract_headings(&document, &excluded);
    let text = extract_body_text(&document, &excluded, max_len);
    let links = extract_links(&document, &excluded, page_url);

    PageRecord {
        title,
        meta,
        headings,
        text,
        links,
    }
}

/// Collect the node ids of every subtree that must not contribute content.
fn build_exclusion_set(document: &Html) -> HashSet<NodeId> {
    let mut excluded = HashSet::new();
    for selector in STRIP_SELECTORS.iter() {
        for element in document.select(selector) {
            excluded.insert(element.id());
        }
    }
    excluded
}

/// Whether an element sits inside (or is itself) an excluded subtree.
fn in_excluded_subtree(element: ElementRef<'_>, excluded: &HashSet<NodeId>) -> bool {
    excluded.contains(&element.id()) || element.ancestors().any(|a| excluded.contains(&a.id()))
}

fn extract_headings(document: &Html, excluded: &HashSet<NodeId>) -> Vec<String> {
    document
        .select(&HEADING_SELECTOR)
        .filter(|el| !in_excluded_subtree(*el, excluded))
        .map(|el| {
            let raw = clean_inline(&el.text().collect::<String>());
            OUTLINE_PREFIX_RE.replace(&raw, "").into_owned()
        })
        .filter(|heading| {
            let len = heading.chars().count();
            len > 1 && len < 200
        })
        .take(MAX_HEADINGS)
        .collect()
}

fn extract_body_text(document: &Html, excluded: &HashSet<NodeId>, max_len: usize) -> String {
    let container = CONTENT_SELECTORS
        .iter()
        .find_map(|selector| document.select(selector).next())
        .or_else(|| document.select(&BODY_SELECTOR).next())
        .unwrap_or_else(|| document.root_element());

    let mut buf = String::new();
    for node in container.descendants() {
        if let scraper::node::Node::Text(fragment) = node.value() {
            if node.ancestors().any(|a| excluded.contains(&a.id())) {
                continue;
            }
            buf.push_str(fragment);
            buf.push(' ');
        }
    }

    let cleaned = clean_inline(&buf);
    let body = if cleaned.is_empty() {
        NO_READABLE_CONTENT.to_string()
    } else {
        cleaned
    };

    truncate_chars(&body, max_len).trim_end().to_string()
}

fn extract_links(document: &Html, excluded: &HashSet<NodeId>, page_url: &str) -> Vec<PageLink> {
    let origin: Option<Url> = page_origin(page_url);
    let mut links = Vec::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        if links.len() >= MAX_LINKS {
            break;
        }
        if in_excluded_subtree(anchor, excluded) {
            continue;
        }
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            continue;
        }
        let href_lower = href.to_ascii_lowercase();
        if href_lower.starts_with("javascript:")
            || href_lower.starts_with("mailto:")
            || href_lower.contains("action=edit")
        {
            continue;
        }

        let resolved = if href.starts_with("http://") || href.starts_with("https://") {
            match Url::parse(href) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    trace!(href, error = %e, "dropping unparseable absolute link");
                    continue;
                }
            }
        } else {
            // Relative href: resolve against the page origin. A page whose
            // origin cannot be parsed gets its relative links dropped rather
            // than guessed.
            match &origin {
                Some(origin) => match crate::utils::resolve_href(origin, href) {
                    Some(url) => url,
                    None => {
                        trace!(href, "dropping unresolvable relative link");
                        continue;
                    }
                },
                None => continue,
            }
        };

        let text = clean_inline(&anchor.text().collect::<String>());
        if text.chars().count() < MIN_LINK_TEXT_LEN {
            continue;
        }

        links.push(PageLink {
            text: truncate_chars(&text, MAX_LINK_TEXT_LEN),
            url: resolved,
        });
    }

    links
}

// ============================================================================
// TESTS
// ============================================================================
