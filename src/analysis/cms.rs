//! CMS fingerprinting

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

/// Label reported when no signature matches
pub const UNKNOWN_CMS: &str = "Unbekannt";

/// Ordered signature table, first match wins
static CMS_SIGNATURES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)wp-content|wp-includes", "WordPress"),
        (r"(?i)/administrator/", "Joomla"),
        (r"(?i)/sites/default/", "Drupal"),
        (r"(?i)/typo3conf/", "TYPO3"),
        (r"(?i)cdn\.shopify\.com", "Shopify"),
    ]
    .into_iter()
    .filter_map(|(pattern, label)| Regex::new(pattern).ok().map(|re| (re, label)))
    .collect()
});

/// Identifies the CMS behind a page
///
/// A non-empty `<meta name="generator">` wins and yields its first token
/// (`"WordPress 6.4.2"` becomes `"WordPress"`). Otherwise each signature is
/// tested against the raw HTML and then the URL.
///
/// # Arguments
///
/// * `document` - The parsed page
/// * `html` - The raw page source
/// * `url` - The page URL
pub fn detect_cms(document: &Html, html: &str, url: &str) -> String {
    if let Some(generator) = generator_token(document) {
        return generator;
    }

    CMS_SIGNATURES
        .iter()
        .find(|(pattern, _)| pattern.is_match(html) || pattern.is_match(url))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| UNKNOWN_CMS.to_string())
}

fn generator_token(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"meta[name="generator"]"#).ok()?;
    let content = document.select(&selector).next()?.value().attr("content")?;
    content.split_whitespace().next().map(str::to_string)
}
