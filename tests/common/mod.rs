//! Test utilities and helper functions for the plethora test suite

use std::io::Write;

use mockito::{Mock, Server};

/// Creates a test HTML document with specified content
#[allow(dead_code)]
pub fn create_test_html(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
</head>
<body>
    {}
</body>
</html>"#,
        html_escape::encode_text(title),
        body
    )
}

/// Creates a DuckDuckGo-style result page with the given
/// (title, href, snippet) entries
#[allow(dead_code)]
pub fn create_result_page_html(entries: &[(&str, &str, &str)]) -> String {
    let mut rows = String::new();
    for (title, href, snippet) in entries {
        rows.push_str(&format!(
            r#"<div class="result results_links results_links_deep web-result">
  <div class="links_main links_deep result__body">
    <h2 class="result__title">
      <a rel="nofollow" class="result__a" href="{href}">{title}</a>
    </h2>
    <a class="result__snippet" href="{href}">{snippet}</a>
  </div>
</div>"#
        ));
    }
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>search results</title></head>
<body>
  <div id="links" class="results">
{rows}
  </div>
</body>
</html>"#
    )
}

/// Wrap a target URL the way DuckDuckGo redirect-wraps result hrefs
#[allow(dead_code)]
pub fn redirect_wrap(target: &str) -> String {
    format!(
        "//duckduckgo.com/l/?uddg={}&rut=0123456789abcdef",
        urlencoding::encode(target)
    )
}

/// Creates a mock endpoint that returns HTML content
#[allow(dead_code)]
pub async fn create_html_mock(server: &mut Server, path: &str, html: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(html)
        .create_async()
        .await
}

/// Creates a mock endpoint that returns an error status
#[allow(dead_code)]
pub async fn create_error_mock(server: &mut Server, path: &str, status: usize) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_body("Error")
        .create_async()
        .await
}

/// Creates a mock endpoint that stalls longer than the given delay before
/// responding, for deadline tests
#[allow(dead_code)]
pub async fn create_slow_mock(server: &mut Server, path: &str, delay_ms: u64) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_chunked_body(move |writer| {
            std::thread::sleep(std::time::Duration::from_millis(delay_ms));
            writer.write_all(b"<html><body>too late</body></html>")
        })
        .create_async()
        .await
}

/// Helper to create test URLs
#[allow(dead_code)]
pub fn test_url(server: &Server, path: &str) -> String {
    format!("{}{}", server.url(), path)
}
