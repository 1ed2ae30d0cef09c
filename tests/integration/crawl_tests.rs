//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end over real HTTP.

use breakpoint_crawler::config::{parse_config, Config, CrawlMode, CrawlerConfig, UserAgentConfig};
use breakpoint_crawler::crawler::{crawl, run_crawl, PageSummary};
use breakpoint_crawler::output::to_json;
use breakpoint_crawler::{CrawlError, ConfigError};
use std::collections::HashSet;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn html_page(title: &str, description: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!(
            r#"<html><head><title>{}</title><meta name="description" content="{}"></head><body>{}</body></html>"#,
            title, description, body
        ))
        .insert_header("content-type", "text/html")
}

/// Mounts a small site:
///
/// - `/` links to `/link.html` (site-relative) and to `/about` (absolute)
/// - `/link.html` links back to `/` and on to `/deep`
/// - `/about` links to `/missing`, which returns 404
/// - `/deep` has no links
async fn mount_site(mock_server: &MockServer) {
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "Index",
            "Index description",
            &format!(
                r#"<a href="/link.html">Link</a> <a href="{}/about">About</a> <a href="mailto:a@b.c">Mail</a>"#,
                base_url
            ),
        ))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/link.html"))
        .respond_with(html_page(
            "Link",
            "Link description",
            &format!(r#"<a href="{}/">Home</a> <a href="/deep">Deep</a>"#, base_url),
        ))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_page(
            "About",
            "About description",
            r#"<a href="/missing">Missing</a>"#,
        ))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/deep"))
        .respond_with(html_page("Deep", "Deep description", ""))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(mock_server)
        .await;
}

fn config_for(seeds: Vec<String>, depth: u32, mode: CrawlMode) -> Config {
    Config {
        seeds,
        crawler: CrawlerConfig {
            depth,
            mode,
            concurrency: Some(4),
            probe_timeout_ms: 1000,
            request_timeout_ms: 1000,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
        },
    }
}

/// Number of requests received for a path; a fetched page is hit twice
/// (availability probe, then full fetch)
async fn hits_for(mock_server: &MockServer, wanted: &str) -> usize {
    let requests: Vec<Request> = mock_server.received_requests().await.unwrap_or_default();
    requests.iter().filter(|r| r.url.path() == wanted).count()
}

#[tokio::test]
async fn test_depth_zero_returns_seed_only() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let root = format!("{}/", mock_server.uri());

    let pages = crawl(vec![root.clone()], 0, CrawlMode::Sequential, None)
        .await
        .expect("Crawl failed");

    assert_eq!(
        pages,
        vec![PageSummary::new("Index", "Index description", root)]
    );
    assert_eq!(hits_for(&mock_server, "/link.html").await, 0);
    assert_eq!(hits_for(&mock_server, "/about").await, 0);
}

#[tokio::test]
async fn test_depth_one_follows_links_once() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base_url = mock_server.uri();
    let root = format!("{}/", base_url);

    let pages = crawl(vec![root.clone()], 1, CrawlMode::Sequential, None)
        .await
        .expect("Crawl failed");

    assert_eq!(
        pages,
        vec![
            PageSummary::new("Index", "Index description", root),
            PageSummary::new("Link", "Link description", format!("{}/link.html", base_url)),
            PageSummary::new("About", "About description", format!("{}/about", base_url)),
        ]
    );

    // Probe + fetch for each page, and the back-link to "/" is never followed
    assert_eq!(hits_for(&mock_server, "/").await, 2);
    assert_eq!(hits_for(&mock_server, "/link.html").await, 2);
    assert_eq!(hits_for(&mock_server, "/deep").await, 0);
}

#[tokio::test]
async fn test_dead_link_is_probed_only() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let root = format!("{}/", mock_server.uri());

    let config = config_for(vec![root], 3, CrawlMode::Sequential);
    let report = run_crawl(&config).await.expect("Crawl failed");

    let urls: Vec<&str> = report.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls.len(), 4);
    assert!(!urls.iter().any(|u| u.ends_with("/missing")));
    assert_eq!(hits_for(&mock_server, "/missing").await, 1);
    assert_eq!(report.stats.unreachable, 1);
    assert_eq!(report.stats.fetch_failures, 0);
}

#[tokio::test]
async fn test_concurrent_and_sequential_agree() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let root = format!("{}/", mock_server.uri());

    for depth in 0..3 {
        let sequential = crawl(vec![root.clone()], depth, CrawlMode::Sequential, None)
            .await
            .expect("Sequential crawl failed");
        let concurrent = crawl(vec![root.clone()], depth, CrawlMode::Concurrent, Some(3))
            .await
            .expect("Concurrent crawl failed");

        let expected: HashSet<PageSummary> = sequential.into_iter().collect();
        let actual: HashSet<PageSummary> = concurrent.iter().cloned().collect();
        assert_eq!(actual, expected, "depth {}", depth);
        assert_eq!(concurrent.len(), expected.len(), "duplicates at depth {}", depth);
    }
}

#[tokio::test]
async fn test_unreachable_seed_yields_empty_result() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let pages = crawl(
        vec![format!("{}/", mock_server.uri())],
        2,
        CrawlMode::Concurrent,
        Some(2),
    )
    .await
    .expect("Crawl should not fail on unreachable seeds");

    assert!(pages.is_empty());
}

#[tokio::test]
async fn test_slow_page_is_skipped_after_timeout() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "Index",
            "Index description",
            r#"<a href="/slow">Slow</a>"#,
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html_page("Slow", "", "").set_delay(Duration::from_millis(2000)))
        .mount(&mock_server)
        .await;

    let mut config = config_for(vec![format!("{}/", base_url)], 1, CrawlMode::Concurrent);
    config.crawler.probe_timeout_ms = 200;
    config.crawler.request_timeout_ms = 200;

    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.pages[0].title, "Index");
    assert_eq!(report.stats.unreachable, 1);
}

#[tokio::test]
async fn test_empty_seed_list_returns_empty() {
    let pages = crawl(Vec::new(), 3, CrawlMode::Sequential, None)
        .await
        .expect("Empty crawl should succeed");
    assert!(pages.is_empty());
}

#[tokio::test]
async fn test_invalid_seed_is_rejected() {
    let result = crawl(vec!["not-a-url".to_string()], 0, CrawlMode::Sequential, None).await;
    assert!(matches!(
        result,
        Err(CrawlError::Config(ConfigError::InvalidUrl(_)))
    ));
}

#[tokio::test]
async fn test_crawl_from_config_file() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
seeds = ["{}/link.html"]

[crawler]
depth = 1
mode = "concurrent"
concurrency = 2
"#,
        mock_server.uri()
    )
    .unwrap();
    file.flush().unwrap();

    let content = std::fs::read_to_string(file.path()).unwrap();
    let config = parse_config(&content).expect("Config should be valid");
    let report = run_crawl(&config).await.expect("Crawl failed");

    let titles: HashSet<&str> = report.pages.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, HashSet::from(["Link", "Index", "Deep"]));
    assert_eq!(report.stats.levels_completed, 2);
}

#[tokio::test]
async fn test_json_output_shape() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let root = format!("{}/", mock_server.uri());

    let pages = crawl(vec![root.clone()], 0, CrawlMode::Sequential, None)
        .await
        .expect("Crawl failed");

    assert_eq!(
        to_json(&pages, false).unwrap(),
        format!(
            r#"[{{"title":"Index","desc":"Index description","url":"{}"}}]"#,
            root
        )
    );
}
