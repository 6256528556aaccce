//! XML sitemap loading
//!
//! Sitemaps are fetched with the usual retry policy, gunzipped when the URL
//! ends in `.gz`, and reduced to the `<loc>` URLs that look like HTML pages.

use crate::crawler::{retry_transport, FetchPolicy};
use flate2::read::GzDecoder;
use reqwest::Client;
use scraper::{Html, Selector};
use std::io::Read;
use url::Url;

/// Extensions that mark a URL as an HTML document
const HTML_EXTENSIONS: &[&str] = &["html", "htm", "php", "asp", "aspx"];

/// Loads the HTML page URLs listed in a sitemap
///
/// Failures never propagate: an unreachable sitemap, an HTTP error status
/// or undecodable content yields an empty list and a log entry.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `sitemap_url` - Location of the sitemap (`.xml` or `.xml.gz`)
/// * `policy` - Attempt budget and backoff for the download
pub async fn load_sitemap(client: &Client, sitemap_url: &str, policy: &FetchPolicy) -> Vec<String> {
    let fetched = retry_transport(sitemap_url, policy, || async move {
        let response = client.get(sitemap_url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok::<_, reqwest::Error>((status, body))
    })
    .await;

    let (status, body) = match fetched {
        Ok(result) => result,
        Err(failure) => {
            tracing::error!(
                "Failed to fetch sitemap {} after {} attempts: {}",
                sitemap_url,
                failure.attempts,
                failure.error
            );
            return Vec::new();
        }
    };

    if !status.is_success() {
        tracing::error!("Sitemap {} returned {}", sitemap_url, status);
        return Vec::new();
    }

    let content = if sitemap_url.ends_with(".gz") {
        gunzip_or_raw(&body)
    } else {
        String::from_utf8_lossy(&body).into_owned()
    };

    let urls: Vec<String> = extract_locs(&content)
        .into_iter()
        .filter(|url| is_html_url(url))
        .collect();

    tracing::info!("Loaded {} page URLs from sitemap {}", urls.len(), sitemap_url);
    urls
}

/// Decompresses gzip content, keeping the raw bytes when they are not gzip
///
/// Servers that send `Content-Encoding: gzip` have already been decoded by
/// the client.
fn gunzip_or_raw(bytes: &[u8]) -> String {
    let mut decoded = Vec::new();
    match GzDecoder::new(bytes).read_to_end(&mut decoded) {
        Ok(_) => String::from_utf8_lossy(&decoded).into_owned(),
        Err(e) => {
            tracing::debug!("Sitemap body is not gzip ({}), using it as is", e);
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

/// Collects the trimmed text of every `<loc>` element
pub fn extract_locs(xml: &str) -> Vec<String> {
    let document = Html::parse_document(xml);
    let selector = match Selector::parse("loc") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .map(|loc| loc.text().collect::<String>().trim().to_string())
        .filter(|loc| !loc.is_empty())
        .collect()
}

/// Returns true if a URL's path looks like an HTML document
///
/// That is an empty path, a trailing `/`, a last segment without extension,
/// or one of the extensions `.html .htm .php .asp .aspx`. Unparseable URLs
/// are rejected.
///
/// # Examples
///
/// ```
/// use seo_checker::input::is_html_url;
///
/// assert!(is_html_url("https://example.com/about/"));
/// assert!(is_html_url("https://example.com/contact"));
/// assert!(is_html_url("https://example.com/index.PHP"));
/// assert!(!is_html_url("https://example.com/logo.png"));
/// ```
pub fn is_html_url(url: &str) -> bool {
    let url = match Url::parse(url) {
        Ok(url) => url,
        Err(_) => return false,
    };

    let path = url.path().to_lowercase();
    if path.is_empty() || path.ends_with('/') {
        return true;
    }

    let last_segment = path.rsplit('/').next().unwrap_or_default();
    match last_segment.rsplit_once('.') {
        Some((_, extension)) => HTML_EXTENSIONS.contains(&extension),
        None => true,
    }
}
