//! Integration tests for single-page scraping and batch orchestration
//! against mock servers: sentinel containment, ordering guarantees, and the
//! relay transport.

mod common;

use std::io::Write;

use common::{create_error_mock, create_html_mock, create_slow_mock, create_test_html, test_url};
use mockito::Matcher;
use plethora::{EngineConfig, ResearchEngine};

fn engine_with_timeout(timeout_secs: u64) -> ResearchEngine {
    let config = EngineConfig::builder()
        .fetch_timeout_secs(timeout_secs)
        .build()
        .expect("test config");
    ResearchEngine::new(config).expect("test engine")
}

/// A body comfortably above the degenerate-response threshold
fn article_body(marker: &str) -> String {
    format!(
        "<main><h1>Heading for {marker}</h1>\
         <p>This is a longer paragraph of article text for {marker}, padded \
         out well past the minimum document length threshold so the content \
         gates let it through.</p>\
         <a href=\"/about\">About this website</a></main>"
    )
}

#[tokio::test]
async fn scrape_page_extracts_structure() {
    let mut server = mockito::Server::new_async().await;
    let html = create_test_html("Article Title", &article_body("alpha"));
    let _m = create_html_mock(&mut server, "/blog/post", &html).await;

    let engine = engine_with_timeout(5);
    let record = engine
        .scrape_page(&test_url(&server, "/blog/post"), 500)
        .await;

    assert_eq!(record.title, "Article Title");
    assert_eq!(record.headings, vec!["Heading for alpha".to_string()]);
    assert!(record.text.contains("longer paragraph of article text"));
    assert!(record.text.chars().count() <= 500);
    // Relative link resolved against the page origin, not the path
    assert_eq!(record.links.len(), 1);
    assert_eq!(record.links[0].url, format!("{}/about", server.url()));
}

#[tokio::test]
async fn batch_output_aligns_with_input_order() {
    let mut server = mockito::Server::new_async().await;

    // First URL responds slowest; completion order differs from input order
    let _slow = server
        .mock("GET", "/p0")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_chunked_body(move |writer| {
            std::thread::sleep(std::time::Duration::from_millis(400));
            writer.write_all(create_test_html("Page 0", &article_body("p0")).as_bytes())
        })
        .create_async()
        .await;

    let mut mocks = Vec::new();
    for i in 1..8 {
        let html = create_test_html(&format!("Page {i}"), &article_body(&format!("p{i}")));
        mocks.push(create_html_mock(&mut server, &format!("/p{i}"), &html).await);
    }

    let urls: Vec<String> = (0..8).map(|i| test_url(&server, &format!("/p{i}"))).collect();
    let engine = engine_with_timeout(5);
    let records = engine.scrape_batch(&urls, 500).await;

    assert_eq!(records.len(), urls.len());
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.title, format!("Page {i}"), "slot {i} out of order");
    }
}

#[tokio::test]
async fn failing_urls_fill_their_slots_without_aborting_the_batch() {
    let mut server = mockito::Server::new_async().await;

    let ok_html = create_test_html("Good Page", &article_body("good"));
    let _ok = create_html_mock(&mut server, "/good", &ok_html).await;
    let _missing = create_error_mock(&mut server, "/missing", 404).await;
    let _pdf = server
        .mock("GET", "/document.pdf")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body("%PDF-1.7".repeat(100))
        .create_async()
        .await;
    let _blocked = server
        .mock("GET", "/blocked")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html></html>")
        .create_async()
        .await;
    let ok2_html = create_test_html("Second Good Page", &article_body("second"));
    let _ok2 = create_html_mock(&mut server, "/good2", &ok2_html).await;

    let urls = vec![
        test_url(&server, "/good"),
        test_url(&server, "/missing"),
        test_url(&server, "/document.pdf"),
        test_url(&server, "/blocked"),
        test_url(&server, "/good2"),
    ];

    let engine = engine_with_timeout(5);
    let records = engine.scrape_batch(&urls, 500).await;

    assert_eq!(records.len(), 5);
    assert_eq!(records[0].title, "Good Page");
    assert!(records[1].text.starts_with("[Error: HTTP 404"));
    assert_eq!(records[2].text, "[Non-HTML content: application/pdf]");
    assert_eq!(records[3].text, "[Empty or blocked response]");
    assert_eq!(records[4].title, "Second Good Page");

    for failed in &records[1..4] {
        assert!(failed.title.is_empty());
        assert!(failed.headings.is_empty());
        assert!(failed.links.is_empty());
    }
}

#[tokio::test]
async fn deadline_overrun_becomes_timeout_sentinel() {
    let mut server = mockito::Server::new_async().await;
    let _slow = create_slow_mock(&mut server, "/stalls", 2500).await;

    let engine = engine_with_timeout(1);
    let record = engine.scrape_page(&test_url(&server, "/stalls"), 500).await;

    assert_eq!(record.text, "[Error: Timed out]");
    assert!(record.title.is_empty());
}

#[tokio::test]
async fn unparseable_url_still_fills_its_slot() {
    let mut server = mockito::Server::new_async().await;
    let ok_html = create_test_html("Only Page", &article_body("only"));
    let _ok = create_html_mock(&mut server, "/ok", &ok_html).await;

    let urls = vec!["not a url".to_string(), test_url(&server, "/ok")];
    let engine = engine_with_timeout(5);
    let records = engine.scrape_batch(&urls, 500).await;

    assert_eq!(records.len(), 2);
    assert!(records[0].text.starts_with("[Error:"));
    assert_eq!(records[1].title, "Only Page");
}

#[tokio::test]
async fn empty_batch_yields_empty_output() {
    let engine = engine_with_timeout(5);
    let records = engine.scrape_batch(&[], 500).await;
    assert!(records.is_empty());
}

#[tokio::test]
async fn relay_transport_forwards_target_as_parameter() {
    let mut server = mockito::Server::new_async().await;
    let html = create_test_html("Relayed Page", &article_body("relay"));
    let _relay = server
        .mock("GET", "/raw")
        .match_query(Matcher::UrlEncoded(
            "url".into(),
            "https://example.com/page".into(),
        ))
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(html)
        .create_async()
        .await;

    let config = EngineConfig::builder()
        .relay_prefix(format!("{}/raw?url=", server.url()))
        .fetch_timeout_secs(5)
        .build()
        .expect("relay config");
    let engine = ResearchEngine::new(config).expect("engine");

    let record = engine.scrape_page("https://example.com/page", 500).await;
    assert_eq!(record.title, "Relayed Page");
}
