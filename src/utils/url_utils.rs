//! URL manipulation utilities.
//!
//! Helpers for validating candidate link targets and resolving relative
//! hrefs against a page's origin.

use url::Url;

/// Check if a URL is a scrapeable http(s) target
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    // Skip data URLs, javascript URLs, and other non-http schemes
    if url.starts_with("data:") || url.starts_with("javascript:") || url.starts_with("mailto:") {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
        }
        Err(_) => false,
    }
}

/// Extract the origin (scheme + host + port) of a page URL as a base for
/// relative-link resolution.
///
/// Returns `None` when the URL cannot be parsed or has no host; callers drop
/// the link in that case rather than guessing a base.
#[must_use]
pub fn page_origin(page_url: &str) -> Option<Url> {
    let mut origin = Url::parse(page_url).ok()?;
    origin.host_str()?;

    origin.set_path("/");
    origin.set_query(None);
    origin.set_fragment(None);
    Some(origin)
}

/// Resolve an href found on a page to an absolute http(s) URL.
///
/// Absolute http(s) hrefs pass through unchanged. Relative hrefs resolve
/// against the page origin, not the page path: `about` on
/// `https://example.com/blog/post` becomes `https://example.com/about`.
/// Anything that fails to parse or resolves to a non-http scheme yields
/// `None`.
#[must_use]
pub fn resolve_href(origin: &Url, href: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        let parsed = Url::parse(href).ok()?;
        return Some(parsed.to_string());
    }

    let resolved = origin.join(href).ok()?;
    if !matches!(resolved.scheme(), "http" | "https") {
        return None;
    }
    Some(resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_urls() {
        assert!(is_valid_url("https://example.com/page"));
        assert!(is_valid_url("http://example.com"));
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("javascript:void(0)"));
        assert!(!is_valid_url("mailto:user@example.com"));
        assert!(!is_valid_url("data:text/plain,hello"));
        assert!(!is_valid_url("ftp://example.com/file"));
    }

    #[test]
    fn origin_strips_path_query_and_fragment() {
        let origin = page_origin("https://example.com/blog/post?ref=1#top").unwrap();
        assert_eq!(origin.as_str(), "https://example.com/");
    }

    #[test]
    fn origin_preserves_port() {
        let origin = page_origin("http://localhost:8080/deep/path").unwrap();
        assert_eq!(origin.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn origin_rejects_garbage() {
        assert!(page_origin("not a url").is_none());
        assert!(page_origin("/relative/only").is_none());
    }

    #[test]
    fn resolves_against_origin_not_path() {
        let origin = page_origin("https://example.com/blog/post").unwrap();
        assert_eq!(
            resolve_href(&origin, "/about").as_deref(),
            Some("https://example.com/about")
        );
        assert_eq!(
            resolve_href(&origin, "about").as_deref(),
            Some("https://example.com/about")
        );
    }

    #[test]
    fn absolute_hrefs_pass_through() {
        let origin = page_origin("https://example.com/").unwrap();
        assert_eq!(
            resolve_href(&origin, "https://other.org/page").as_deref(),
            Some("https://other.org/page")
        );
    }
}
