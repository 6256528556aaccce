//! Page analysis module
//!
//! Extracts the SEO signals of one fetched page. The HTML is parsed once
//! and every extractor works on the same document.
//!
//! Everything here is synchronous: `scraper::Html` is not `Send`, so the
//! parsed document must never live across an `.await` in the pipeline.

mod cms;
mod content;
mod indexability;

pub use cms::{detect_cms, UNKNOWN_CMS};
pub use content::{extract_h1, extract_meta_description, extract_title, word_count};
pub use indexability::{detect_indexability, Indexability};

use reqwest::header::HeaderMap;
use scraper::Html;

/// SEO signals of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAnalysis {
    pub indexability: Indexability,
    pub title: String,
    pub meta_description: String,
    pub h1: String,
    pub word_count: usize,
    pub cms: String,
}

/// Analyzes a fetched page
///
/// Malformed HTML never fails: missing elements yield empty strings and a
/// word count of zero.
///
/// # Arguments
///
/// * `html` - The response body
/// * `headers` - The response headers (for `X-Robots-Tag`)
/// * `url` - The requested URL (for CMS signatures)
pub fn analyze_page(html: &str, headers: &HeaderMap, url: &str) -> PageAnalysis {
    let document = Html::parse_document(html);

    PageAnalysis {
        indexability: detect_indexability(&document, headers),
        title: extract_title(&document),
        meta_description: extract_meta_description(&document),
        h1: extract_h1(&document),
        word_count: word_count(&document),
        cms: detect_cms(&document, html, url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_full_page() {
        let html = r#"<!DOCTYPE html>
<html>
<head>
  <title>Example Shop</title>
  <meta name="description" content="Cheap widgets">
  <meta name="robots" content="noindex,follow">
  <meta name="generator" content="Shopware 6">
</head>
<body>
  <h1>Widgets</h1>
  <p>We sell widgets of all sizes.</p>
  <script>trackVisitor();</script>
</body>
</html>"#;

        let analysis = analyze_page(html, &HeaderMap::new(), "https://shop.example.com/");
        assert_eq!(analysis.indexability, Indexability::NoindexViaMeta);
        assert_eq!(analysis.title, "Example Shop");
        assert_eq!(analysis.meta_description, "Cheap widgets");
        assert_eq!(analysis.h1, "Widgets");
        assert_eq!(analysis.word_count, 7);
        assert_eq!(analysis.cms, "Shopware");
    }

    #[test]
    fn test_analyze_garbage() {
        let analysis = analyze_page("<<<not html", &HeaderMap::new(), "https://example.com/");
        assert_eq!(analysis.indexability, Indexability::Indexable);
        assert_eq!(analysis.title, "");
        assert_eq!(analysis.cms, UNKNOWN_CMS);
    }
}
