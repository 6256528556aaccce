//! The per-URL result record

use crate::analysis::{Indexability, PageAnalysis};
use crate::links::BrokenLinkSummary;
use crate::robots::RobotsVerdict;
use serde::{Serialize, Serializer};
use std::fmt;

/// Content of the HTTP Status column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatus {
    Code(u16),
    /// The page could not be fetched at all, shown as `-`
    FetchFailed,
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{}", code),
            Self::FetchFailed => f.write_str("-"),
        }
    }
}

impl Serialize for HttpStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Code(code) => serializer.serialize_u16(*code),
            Self::FetchFailed => serializer.serialize_str("-"),
        }
    }
}

/// Content of the Status column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    Indexability(Indexability),
    /// Transport failure message, shown as `Error: <message>`
    Error(String),
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Indexability(indexability) => write!(f, "{}", indexability),
            Self::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

impl Serialize for PageStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One row of the report
///
/// A record for a page that could not be fetched carries only the URL, the
/// `-` status marker and the error; every other column is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    #[serde(rename = "URL")]
    pub url: String,

    #[serde(rename = "HTTP Status")]
    pub http_status: HttpStatus,

    #[serde(rename = "Status")]
    pub status: PageStatus,

    #[serde(rename = "Robots Policy")]
    pub robots_policy: Option<RobotsVerdict>,

    #[serde(rename = "Title")]
    pub title: Option<String>,

    #[serde(rename = "Meta Description")]
    pub meta_description: Option<String>,

    #[serde(rename = "H1")]
    pub h1: Option<String>,

    #[serde(rename = "WordCount")]
    pub word_count: Option<usize>,

    #[serde(rename = "CMS")]
    pub cms: Option<String>,

    #[serde(rename = "Broken Links")]
    pub broken_links: Option<BrokenLinkSummary>,
}

impl PageRecord {
    /// Column names in output order
    pub const COLUMNS: [&'static str; 10] = [
        "URL",
        "HTTP Status",
        "Status",
        "Robots Policy",
        "Title",
        "Meta Description",
        "H1",
        "WordCount",
        "CMS",
        "Broken Links",
    ];

    /// Builds the record for a page whose fetch failed after all attempts
    pub fn fetch_error(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http_status: HttpStatus::FetchFailed,
            status: PageStatus::Error(message.into()),
            robots_policy: None,
            title: None,
            meta_description: None,
            h1: None,
            word_count: None,
            cms: None,
            broken_links: None,
        }
    }

    /// Builds the record for a page that returned a response
    pub fn analyzed(
        url: impl Into<String>,
        status_code: u16,
        analysis: PageAnalysis,
        robots_policy: RobotsVerdict,
        broken_links: BrokenLinkSummary,
    ) -> Self {
        Self {
            url: url.into(),
            http_status: HttpStatus::Code(status_code),
            status: PageStatus::Indexability(analysis.indexability),
            robots_policy: Some(robots_policy),
            title: Some(analysis.title),
            meta_description: Some(analysis.meta_description),
            h1: Some(analysis.h1),
            word_count: Some(analysis.word_count),
            cms: Some(analysis.cms),
            broken_links: Some(broken_links),
        }
    }

    pub fn is_fetch_error(&self) -> bool {
        matches!(self.http_status, HttpStatus::FetchFailed)
    }

    /// Returns true for a response status of 400 or above
    pub fn is_http_error(&self) -> bool {
        matches!(self.http_status, HttpStatus::Code(code) if code >= 400)
    }

    pub fn is_noindex(&self) -> bool {
        matches!(&self.status, PageStatus::Indexability(i) if !i.is_indexable())
    }

    pub fn is_disallowed(&self) -> bool {
        self.robots_policy == Some(RobotsVerdict::Disallowed)
    }

    pub fn has_broken_links(&self) -> bool {
        self.broken_links
            .as_ref()
            .is_some_and(BrokenLinkSummary::has_broken)
    }

    /// Returns the record's cells as display strings in column order
    ///
    /// Missing values render as empty strings.
    pub fn cells(&self) -> [String; 10] {
        fn opt<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(ToString::to_string).unwrap_or_default()
        }

        [
            self.url.clone(),
            self.http_status.to_string(),
            self.status.to_string(),
            opt(&self.robots_policy),
            opt(&self.title),
            opt(&self.meta_description),
            opt(&self.h1),
            opt(&self.word_count),
            opt(&self.cms),
            opt(&self.broken_links),
        ]
    }
}
