//! Integration tests for the analysis pipeline
//!
//! Every scenario runs against a local wiremock server. Requests that no
//! mock matches get a 404, which is how a missing robots.txt or a dead link
//! is simulated.

use seo_checker::analysis::Indexability;
use seo_checker::crawler::{build_http_client, fetch_with_retry, FetchPolicy, FetchResult};
use seo_checker::links::BrokenLinkSummary;
use seo_checker::output::{HttpStatus, PageStatus};
use seo_checker::{Config, Pipeline, RobotsVerdict};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> Config {
    let mut config = Config::default();
    config.crawler.concurrency = 4;
    config.fetch.attempts = 1;
    config.fetch.robots_attempts = 1;
    config.fetch.backoff_secs = 0.0;
    config.fetch.timeout_secs = 5;
    config.links.probe_timeout_secs = 5;
    config
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!(
            "<!DOCTYPE html><html><head><title>Test</title></head><body>{}</body></html>",
            body
        ),
        "text/html",
    )
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_robots(server: &MockServer, content: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(content))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_robots_longest_prefix_scenario() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nDisallow: /admin\nAllow: /admin/public\n").await;
    mount_page(&server, "/admin/public/page", html_page("<p>public</p>")).await;
    mount_page(&server, "/admin/secret", html_page("<p>secret</p>")).await;

    let pipeline = Pipeline::new(test_config()).unwrap();

    let public = pipeline
        .analyze(&format!("{}/admin/public/page", server.uri()))
        .await;
    let secret = pipeline
        .analyze(&format!("{}/admin/secret", server.uri()))
        .await;

    assert_eq!(public.robots_policy, Some(RobotsVerdict::Allowed));
    assert_eq!(secret.robots_policy, Some(RobotsVerdict::Disallowed));
}

#[tokio::test]
async fn test_missing_robots_is_not_found() {
    let server = MockServer::start().await;
    mount_page(&server, "/", html_page("<p>home</p>")).await;

    let pipeline = Pipeline::new(test_config()).unwrap();
    let record = pipeline.analyze(&format!("{}/", server.uri())).await;

    assert_eq!(record.robots_policy, Some(RobotsVerdict::NotFound));
}

#[tokio::test]
async fn test_robots_body_starting_with_404() {
    let server = MockServer::start().await;
    mount_robots(&server, "404 - page not found").await;
    mount_page(&server, "/", html_page("<p>home</p>")).await;

    let pipeline = Pipeline::new(test_config()).unwrap();
    let record = pipeline.analyze(&format!("{}/", server.uri())).await;

    assert_eq!(record.robots_policy, Some(RobotsVerdict::NotFound));
}

#[tokio::test]
async fn test_full_record_fields() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nDisallow:\n").await;
    mount_page(
        &server,
        "/article",
        ResponseTemplate::new(200).set_body_raw(
            r#"<!DOCTYPE html>
<html>
<head>
  <title> Rust Tips </title>
  <meta name="description" content="Ten tips for Rust">
  <link rel="stylesheet" href="/wp-content/themes/x.css">
</head>
<body>
  <h1>Rust   Tips</h1>
  <p>Borrow the value instead of cloning it.</p>
  <script>console.log("ignored words here")</script>
</body>
</html>"#,
            "text/html",
        ),
    )
    .await;

    let pipeline = Pipeline::new(test_config()).unwrap();
    let url = format!("{}/article", server.uri());
    let record = pipeline.analyze(&url).await;

    assert_eq!(record.url, url);
    assert_eq!(record.http_status, HttpStatus::Code(200));
    assert_eq!(record.status, PageStatus::Indexability(Indexability::Indexable));
    assert_eq!(record.robots_policy, Some(RobotsVerdict::Allowed));
    assert_eq!(record.title.as_deref(), Some("Rust Tips"));
    assert_eq!(record.meta_description.as_deref(), Some("Ten tips for Rust"));
    assert_eq!(record.h1.as_deref(), Some("Rust Tips"));
    assert_eq!(record.word_count, Some(9));
    assert_eq!(record.cms.as_deref(), Some("WordPress"));
    assert_eq!(record.broken_links, Some(BrokenLinkSummary::NothingToCheck));
}

#[tokio::test]
async fn test_noindex_follow_meta() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/hidden",
        ResponseTemplate::new(200).set_body_raw(
            r#"<html><head><meta name="robots" content="noindex,follow"></head><body>x</body></html>"#,
            "text/html",
        ),
    )
    .await;

    let pipeline = Pipeline::new(test_config()).unwrap();
    let record = pipeline.analyze(&format!("{}/hidden", server.uri())).await;

    assert_eq!(
        record.status,
        PageStatus::Indexability(Indexability::NoindexViaMeta)
    );
    assert_eq!(record.status.to_string(), "NOINDEX via Meta");
}

#[tokio::test]
async fn test_noindex_header() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/pdf-like",
        html_page("<p>content</p>").insert_header("X-Robots-Tag", "noindex, nofollow"),
    )
    .await;

    let pipeline = Pipeline::new(test_config()).unwrap();
    let record = pipeline.analyze(&format!("{}/pdf-like", server.uri())).await;

    assert_eq!(record.status.to_string(), "NOINDEX via Header");
}

#[tokio::test]
async fn test_single_broken_link_summary() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        html_page(r#"<a href="/broken">anchor</a><a href="/ok">fine</a>"#),
    )
    .await;
    Mock::given(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(test_config()).unwrap();
    let record = pipeline.analyze(&format!("{}/", server.uri())).await;

    let summary = record.broken_links.unwrap();
    assert_eq!(
        summary.to_string(),
        format!("{}/broken (Text: \"anchor\")", server.uri())
    );
    assert_eq!(summary.broken_links().len(), 1);
}

#[tokio::test]
async fn test_broken_link_without_text() {
    let server = MockServer::start().await;
    mount_page(&server, "/", html_page(r#"<a href="/gone"><img src="x.png"></a>"#)).await;

    let pipeline = Pipeline::new(test_config()).unwrap();
    let record = pipeline.analyze(&format!("{}/", server.uri())).await;

    assert_eq!(
        record.broken_links.unwrap().to_string(),
        format!("{}/gone (Text: [kein Text])", server.uri())
    );
}

#[tokio::test]
async fn test_head_rejected_get_succeeds() {
    let server = MockServer::start().await;
    mount_page(&server, "/", html_page(r#"<a href="/no-head">No HEAD</a>"#)).await;
    Mock::given(method("HEAD"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(test_config()).unwrap();
    let record = pipeline.analyze(&format!("{}/", server.uri())).await;

    assert_eq!(record.broken_links, Some(BrokenLinkSummary::AllHealthy));
    assert_eq!(record.broken_links.unwrap().to_string(), "Keine");
}

#[tokio::test]
async fn test_rate_limited_link_is_healthy() {
    let server = MockServer::start().await;
    mount_page(&server, "/", html_page(r#"<a href="/busy">Busy</a>"#)).await;
    Mock::given(path("/busy"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(test_config()).unwrap();
    let record = pipeline.analyze(&format!("{}/", server.uri())).await;

    assert_eq!(record.broken_links, Some(BrokenLinkSummary::AllHealthy));
}

#[tokio::test]
async fn test_link_check_is_repeatable() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        html_page(r#"<a href="/dead">Dead</a><a href="/alive">Alive</a>"#),
    )
    .await;
    Mock::given(path("/alive"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(test_config()).unwrap();
    let url = format!("{}/", server.uri());
    let first = pipeline.analyze(&url).await;
    let second = pipeline.analyze(&url).await;

    assert_eq!(first.broken_links, second.broken_links);
}

#[tokio::test]
async fn test_out_of_scope_links_not_probed() {
    let server = MockServer::start().await;
    let port = server.address().port();
    mount_page(
        &server,
        "/",
        html_page(&format!(
            r#"<a href="http://localhost:{}/missing">Elsewhere</a><a href="mailto:a@b.example">Mail</a>"#,
            port
        )),
    )
    .await;

    let pipeline = Pipeline::new(test_config()).unwrap();
    let record = pipeline.analyze(&format!("{}/", server.uri())).await;

    assert_eq!(record.broken_links, Some(BrokenLinkSummary::NothingToCheck));
}

#[tokio::test]
async fn test_http_error_page_is_still_analyzed() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/missing",
        ResponseTemplate::new(404).set_body_raw(
            "<html><head><title>Not Found</title></head><body>gone</body></html>",
            "text/html",
        ),
    )
    .await;

    let pipeline = Pipeline::new(test_config()).unwrap();
    let record = pipeline.analyze(&format!("{}/missing", server.uri())).await;

    assert_eq!(record.http_status, HttpStatus::Code(404));
    assert_eq!(record.title.as_deref(), Some("Not Found"));
    assert!(record.is_http_error());
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500).set_body_raw(
            "<html><head><title>Oops</title></head><body>down</body></html>",
            "text/html",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = test_config();
    config.fetch.attempts = 3;
    let pipeline = Pipeline::new(config).unwrap();
    let record = pipeline.analyze(&format!("{}/flaky", server.uri())).await;

    assert_eq!(record.http_status, HttpStatus::Code(500));
    assert_eq!(record.title.as_deref(), Some("Oops"));
}

#[tokio::test]
async fn test_timeouts_use_every_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .expect(3)
        .mount(&server)
        .await;

    let client = build_http_client("TestCrawler/1.0", Duration::from_millis(200), false).unwrap();
    let policy = FetchPolicy::new(3, Duration::ZERO);
    let result = fetch_with_retry(&client, &format!("{}/slow", server.uri()), &policy).await;

    match result {
        FetchResult::TransportError { error, attempts } => {
            assert_eq!(attempts, 3);
            assert_eq!(error, "Request timeout");
        }
        other => panic!("expected a transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_page_short_circuits() {
    let pipeline = Pipeline::new(test_config()).unwrap();
    let record = pipeline.analyze("http://127.0.0.1:9/nothing").await;

    assert_eq!(record.http_status, HttpStatus::FetchFailed);
    assert!(record.status.to_string().starts_with("Error: "));
    assert!(record.robots_policy.is_none());
    assert!(record.title.is_none());
    assert!(record.meta_description.is_none());
    assert!(record.h1.is_none());
    assert!(record.word_count.is_none());
    assert!(record.cms.is_none());
    assert!(record.broken_links.is_none());

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["HTTP Status"], "-");
    assert!(json["Title"].is_null());
}

#[tokio::test]
async fn test_batch_keeps_input_order() {
    let server = MockServer::start().await;
    mount_page(&server, "/one", html_page("<h1>One</h1>")).await;
    mount_page(&server, "/two", html_page("<h1>Two</h1>")).await;
    mount_page(&server, "/three", html_page("<h1>Three</h1>")).await;

    let mut config = test_config();
    config.crawler.concurrency = 1;
    let pipeline = Pipeline::new(config).unwrap();

    let urls = vec![
        format!("{}/one", server.uri()),
        "http://127.0.0.1:9/down".to_string(),
        format!("{}/two", server.uri()),
        format!("{}/three", server.uri()),
    ];
    let records = pipeline.analyze_all(&urls).await;

    let result_urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(result_urls, urls.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(records[0].h1.as_deref(), Some("One"));
    assert!(records[1].is_fetch_error());
    assert_eq!(records[2].h1.as_deref(), Some("Two"));
    assert_eq!(records[3].h1.as_deref(), Some("Three"));
    assert_eq!(pipeline.gate().available(), 1);
}
