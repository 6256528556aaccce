//! Integration tests for the domain spider and the sitemap loader

use seo_checker::crawler::{build_http_client, FetchPolicy};
use seo_checker::input::load_sitemap;
use seo_checker::{Config, Spider};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> Config {
    let mut config = Config::default();
    config.spider.fetch_timeout_secs = 5;
    config.spider.resolve_timeout_secs = 5;
    config
}

fn links_page(hrefs: &[&str]) -> ResponseTemplate {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><body>{}</body></html>", anchors),
        "text/html; charset=utf-8",
    )
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_cyclic_graph_terminates_sorted() {
    let server = MockServer::start().await;
    mount(&server, "/", links_page(&["/b", "/a"])).await;
    mount(&server, "/a", links_page(&["/", "/b"])).await;
    mount(&server, "/b", links_page(&["/a", "/"])).await;

    let spider = Spider::new(&test_config()).unwrap();
    let urls = spider.crawl_domain(&server.uri(), 100).await.unwrap();

    let base = server.uri();
    assert_eq!(
        urls,
        vec![base.clone(), format!("{}/a", base), format!("{}/b", base)]
    );
}

#[tokio::test]
async fn test_page_budget_is_respected() {
    let server = MockServer::start().await;
    let hrefs: Vec<String> = (1..=10).map(|i| format!("/p{}", i)).collect();
    let href_refs: Vec<&str> = hrefs.iter().map(String::as_str).collect();
    mount(&server, "/", links_page(&href_refs)).await;
    for href in &hrefs {
        mount(&server, href, links_page(&["/"])).await;
    }

    let spider = Spider::new(&test_config()).unwrap();
    let urls = spider.crawl_domain(&server.uri(), 3).await.unwrap();

    assert!(!urls.is_empty());
    assert!(urls.len() <= 3);
    assert!(urls.contains(&server.uri()));

    let mut sorted = urls.clone();
    sorted.sort();
    assert_eq!(urls, sorted);
}

#[tokio::test]
async fn test_non_html_and_errors_not_reported() {
    let server = MockServer::start().await;
    mount(&server, "/", links_page(&["/page", "/doc.pdf", "/missing"])).await;
    mount(&server, "/page", links_page(&[])).await;
    mount(
        &server,
        "/doc.pdf",
        ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"),
    )
    .await;

    let spider = Spider::new(&test_config()).unwrap();
    let urls = spider.crawl_domain(&server.uri(), 50).await.unwrap();

    assert_eq!(urls, vec![server.uri(), format!("{}/page", server.uri())]);
}

#[tokio::test]
async fn test_fragments_and_trailing_slashes_deduplicated() {
    let server = MockServer::start().await;
    mount(&server, "/", links_page(&["/about/", "/about#team", "/about", "#top"])).await;
    mount(&server, "/about", links_page(&[])).await;

    let spider = Spider::new(&test_config()).unwrap();
    let urls = spider.crawl_domain(&server.uri(), 50).await.unwrap();

    assert_eq!(urls, vec![server.uri(), format!("{}/about", server.uri())]);
}

#[tokio::test]
async fn test_other_hosts_not_followed() {
    let server = MockServer::start().await;
    let port = server.address().port();
    let foreign = format!("http://localhost:{}/foreign", port);
    let hrefs = [foreign.as_str(), "mailto:x@example.com", "javascript:void(0)"];
    mount(&server, "/", links_page(&hrefs)).await;
    mount(&server, "/foreign", links_page(&[])).await;

    let spider = Spider::new(&test_config()).unwrap();
    let urls = spider.crawl_domain(&server.uri(), 50).await.unwrap();

    assert_eq!(urls, vec![server.uri()]);
}

#[tokio::test]
async fn test_www_start_traverses_bare_host_without_reporting_it() {
    let server = MockServer::start().await;
    let addr = *server.address();
    let port = addr.port();
    let www = format!("http://www.site.test:{}", port);
    let bare_page = format!("http://site.test:{}/bare", port);
    let deep_page = format!("{}/deep", www);

    // Both names point at the mock server, which ignores the Host header
    mount(&server, "/", links_page(&[bare_page.as_str()])).await;
    mount(&server, "/bare", links_page(&[deep_page.as_str()])).await;
    mount(&server, "/deep", links_page(&[])).await;

    let client = reqwest::Client::builder()
        .resolve("www.site.test", addr)
        .resolve("site.test", addr)
        .build()
        .unwrap();
    let spider = Spider::with_client(client, &test_config());
    let urls = spider.crawl_domain(&www, 50).await.unwrap();

    assert_eq!(urls, vec![www, deep_page]);
}

#[tokio::test]
async fn test_unreachable_start_yields_empty_result() {
    let spider = Spider::new(&test_config()).unwrap();
    let urls = spider.crawl_domain("http://127.0.0.1:9", 10).await.unwrap();

    assert!(urls.is_empty());
}

#[tokio::test]
async fn test_sitemap_keeps_html_urls() {
    let server = MockServer::start().await;
    let sitemap = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{0}/</loc></url>
  <url><loc>{0}/blog/post.html</loc></url>
  <url><loc>{0}/files/report.pdf</loc></url>
  <url><loc>{0}/contact</loc></url>
</urlset>"#,
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(sitemap, "application/xml"))
        .mount(&server)
        .await;

    let client = build_http_client("TestCrawler/1.0", Duration::from_secs(5), false).unwrap();
    let policy = FetchPolicy::new(1, Duration::ZERO);
    let urls = load_sitemap(&client, &format!("{}/sitemap.xml", server.uri()), &policy).await;

    assert_eq!(
        urls,
        vec![
            format!("{}/", server.uri()),
            format!("{}/blog/post.html", server.uri()),
            format!("{}/contact", server.uri()),
        ]
    );
}

#[tokio::test]
async fn test_missing_sitemap_is_empty() {
    let server = MockServer::start().await;

    let client = build_http_client("TestCrawler/1.0", Duration::from_secs(5), false).unwrap();
    let policy = FetchPolicy::new(1, Duration::ZERO);
    let urls = load_sitemap(&client, &format!("{}/sitemap.xml", server.uri()), &policy).await;

    assert!(urls.is_empty());
}
