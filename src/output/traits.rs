//! Output writer traits and types
//!
//! This module defines the trait interface for report writers and the
//! report structure they render.

use super::record::PageRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Run metadata shown at the top of a report
#[derive(Debug, Clone, Serialize)]
pub struct ReportHeader {
    pub generated_at: DateTime<Utc>,
    /// Where the URLs came from (list file, spider start URL, sitemap URL)
    pub source: String,
    /// SHA-256 of the configuration file, if one was loaded
    pub config_hash: Option<String>,
}

impl ReportHeader {
    pub fn new(source: impl Into<String>, config_hash: Option<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            source: source.into(),
            config_hash,
        }
    }
}

/// Summary statistics for a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total_pages: usize,
    pub fetch_errors: usize,
    pub http_errors: usize,
    pub noindex_pages: usize,
    pub disallowed_pages: usize,
    pub pages_with_broken_links: usize,
}

impl RunSummary {
    /// Tallies a record set
    pub fn from_records(records: &[PageRecord]) -> Self {
        let count = |pred: fn(&PageRecord) -> bool| records.iter().filter(|r| pred(r)).count();

        Self {
            total_pages: records.len(),
            fetch_errors: count(PageRecord::is_fetch_error),
            http_errors: count(PageRecord::is_http_error),
            noindex_pages: count(PageRecord::is_noindex),
            disallowed_pages: count(PageRecord::is_disallowed),
            pages_with_broken_links: count(PageRecord::has_broken_links),
        }
    }

    /// Pages that returned a response below 400, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        let ok = self.total_pages - self.fetch_errors - self.http_errors;
        (ok as f64 / self.total_pages as f64) * 100.0
    }
}

/// A complete report: header, records in output order, and their summary
#[derive(Debug, Clone)]
pub struct Report {
    pub header: ReportHeader,
    pub summary: RunSummary,
    pub records: Vec<PageRecord>,
}

impl Report {
    pub fn new(header: ReportHeader, records: Vec<PageRecord>) -> Self {
        let summary = RunSummary::from_records(&records);
        Self {
            header,
            summary,
            records,
        }
    }
}

/// Trait for report writers
pub trait RecordWriter {
    /// Renders a report into the given sink
    ///
    /// # Arguments
    ///
    /// * `report` - The report to render
    /// * `out` - The destination (file or stdout)
    fn write_report(&self, report: &Report, out: &mut dyn Write) -> OutputResult<()>;
}
