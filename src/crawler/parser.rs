//! HTML link extraction
//!
//! Two extraction modes share the anchor walk:
//! - [`extract_link_candidates`] keeps anchor text and feeds the broken-link checker
//! - [`extract_spider_links`] yields frontier-ready URL strings for the domain spider

use crate::url::strip_fragment_and_trailing_slash;
use scraper::{Html, Selector};
use std::collections::HashMap;
use url::Url;

/// A resolved link and the text of the anchor it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    /// Absolute URL
    pub url: Url,
    /// Whitespace-collapsed anchor text (may be empty)
    pub anchor_text: String,
}

/// Extracts the links a broken-link check should consider
///
/// # Link Extraction Rules
///
/// **Include:** every `<a href="...">` that resolves to an http(s) URL
///
/// **Exclude:**
/// - `mailto:` and `tel:` links
/// - Fragment-only links (`#section`)
/// - Hrefs that fail to resolve against `base_url`
///
/// Links are deduplicated by absolute URL. A duplicate keeps the position of
/// its first occurrence and the anchor text of its last.
///
/// # Example
///
/// ```
/// use scraper::Html;
/// use seo_checker::crawler::extract_link_candidates;
/// use url::Url;
///
/// let html = Html::parse_document(r#"<a href="/a">One</a><a href="/a">Two</a>"#);
/// let base = Url::parse("https://example.com/").unwrap();
/// let links = extract_link_candidates(&html, &base);
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].anchor_text, "Two");
/// ```
pub fn extract_link_candidates(document: &Html, base_url: &Url) -> Vec<LinkCandidate> {
    let mut candidates: Vec<LinkCandidate> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    let a_selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return candidates,
    };

    for element in document.select(&a_selector) {
        let href = match element.value().attr("href") {
            Some(href) => href.trim(),
            None => continue,
        };

        if href.starts_with("mailto:") || href.starts_with("tel:") || href.starts_with('#') {
            continue;
        }

        let url = match resolve_http_link(href, base_url) {
            Some(url) => url,
            None => continue,
        };

        let anchor_text = element
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        match positions.get(url.as_str()) {
            Some(&index) => candidates[index].anchor_text = anchor_text,
            None => {
                positions.insert(url.as_str().to_string(), candidates.len());
                candidates.push(LinkCandidate { url, anchor_text });
            }
        }
    }

    candidates
}

/// Extracts the links the domain spider may follow
///
/// Skips `mailto:`, `tel:` and `javascript:` hrefs, resolves the rest against
/// `base_url`, and renders each without fragment or trailing slash. No host
/// filtering happens here.
pub fn extract_spider_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                let href = href.trim();
                if href.starts_with("mailto:")
                    || href.starts_with("tel:")
                    || href.starts_with("javascript:")
                {
                    continue;
                }

                if let Some(url) = resolve_http_link(href, base_url) {
                    links.push(strip_fragment_and_trailing_slash(&url));
                }
            }
        }
    }

    links
}

/// Resolves an href against a base URL, accepting only HTTP and HTTPS results
fn resolve_http_link(href: &str, base_url: &Url) -> Option<Url> {
    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url)
    } else {
        None
    }
}
