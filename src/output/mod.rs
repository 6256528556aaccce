//! Output module for result records and reports
//!
//! This module handles:
//! - The per-URL `PageRecord` and its fixed column names
//! - Report summaries
//! - Rendering reports as Markdown or JSON to a file or stdout

mod json;
mod markdown;
mod record;
mod traits;

pub use json::JsonWriter;
pub use markdown::{format_markdown_report, MarkdownWriter};
pub use record::{HttpStatus, PageRecord, PageStatus};
pub use traits::{
    OutputError, OutputResult, RecordWriter, Report, ReportHeader, RunSummary,
};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Report format selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    #[default]
    Markdown,
}

impl OutputFormat {
    /// Returns the writer for this format
    pub fn writer(&self) -> Box<dyn RecordWriter> {
        match self {
            Self::Json => Box::new(JsonWriter),
            Self::Markdown => Box::new(MarkdownWriter),
        }
    }
}

/// Writes a report to a file, or to stdout when no path is given
///
/// # Arguments
///
/// * `report` - The report to write
/// * `format` - Output format
/// * `path` - Destination file; stdout if `None`
pub fn write_report(
    report: &Report,
    format: OutputFormat,
    path: Option<&Path>,
) -> OutputResult<()> {
    let writer = format.writer();

    match path {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            writer.write_report(report, &mut out)?;
            out.flush()?;
            tracing::info!("Report written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            writer.write_report(report, &mut out)?;
            out.flush()?;
        }
    }

    Ok(())
}
