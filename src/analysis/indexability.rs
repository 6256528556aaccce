use reqwest::header::HeaderMap;
use scraper::{Html, Selector};
use serde::{Serialize, Serializer};
use std::fmt;

/// Whether search engines may index a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indexability {
    Indexable,
    /// An `X-Robots-Tag` response header contains `noindex`
    NoindexViaHeader,
    /// The robots meta tag contains `noindex`
    NoindexViaMeta,
}

impl Indexability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indexable => "Indexable",
            Self::NoindexViaHeader => "NOINDEX via Header",
            Self::NoindexViaMeta => "NOINDEX via Meta",
        }
    }

    pub fn is_indexable(&self) -> bool {
        matches!(self, Self::Indexable)
    }
}

impl fmt::Display for Indexability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Indexability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Determines indexability from the response headers and the document
///
/// The header wins over the meta tag. Only the first `<meta name="robots">`
/// is consulted.
pub fn detect_indexability(document: &Html, headers: &HeaderMap) -> Indexability {
    let header_noindex = headers
        .get_all("x-robots-tag")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(contains_noindex);

    if header_noindex {
        return Indexability::NoindexViaHeader;
    }

    let meta_noindex = Selector::parse(r#"meta[name="robots"]"#)
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .and_then(|meta| meta.value().attr("content"))
                .map(contains_noindex)
        })
        .unwrap_or(false);

    if meta_noindex {
        Indexability::NoindexViaMeta
    } else {
        Indexability::Indexable
    }
}

fn contains_noindex(value: &str) -> bool {
    value.to_ascii_lowercase().contains("noindex")
}
