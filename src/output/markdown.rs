//! Markdown report generation
//!
//! This module renders a human-readable report: run information, summary
//! statistics, and one table row per analyzed URL.

use crate::output::record::PageRecord;
use crate::output::traits::{OutputResult, RecordWriter, Report};
use std::io::Write;

/// Writes reports as Markdown
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownWriter;

impl RecordWriter for MarkdownWriter {
    fn write_report(&self, report: &Report, out: &mut dyn Write) -> OutputResult<()> {
        out.write_all(format_markdown_report(report).as_bytes())?;
        Ok(())
    }
}

/// Formats a report as markdown
///
/// # Arguments
///
/// * `report` - The report data
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_report(report: &Report) -> String {
    let mut md = String::new();
    let summary = &report.summary;

    // Title
    md.push_str("# SEO-Checker Report\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!(
        "- **Generated**: {}\n",
        report.header.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!("- **Source**: {}\n", report.header.source));
    if let Some(hash) = &report.header.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Overall statistics
    md.push_str("## Summary\n\n");
    md.push_str(&format!("- **Total Pages**: {}\n", summary.total_pages));
    md.push_str(&format!("- **Fetch Errors**: {}\n", summary.fetch_errors));
    md.push_str(&format!("- **HTTP Errors**: {}\n", summary.http_errors));
    md.push_str(&format!("- **Noindex Pages**: {}\n", summary.noindex_pages));
    md.push_str(&format!(
        "- **Disallowed by robots.txt**: {}\n",
        summary.disallowed_pages
    ));
    md.push_str(&format!(
        "- **Pages with Broken Links**: {}\n",
        summary.pages_with_broken_links
    ));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        summary.success_rate()
    ));

    // Results table
    md.push_str("## Pages\n\n");
    if report.records.is_empty() {
        md.push_str("*No pages analyzed*\n");
        return md;
    }

    md.push_str(&table_row(PageRecord::COLUMNS.iter().map(|c| c.to_string())));
    md.push_str(&table_row(PageRecord::COLUMNS.iter().map(|_| "---".to_string())));
    for record in &report.records {
        md.push_str(&table_row(record.cells().into_iter().map(|c| escape_cell(&c))));
    }

    md
}

fn table_row(cells: impl Iterator<Item = String>) -> String {
    let mut row = String::from("|");
    for cell in cells {
        row.push(' ');
        row.push_str(&cell);
        row.push_str(" |");
    }
    row.push('\n');
    row
}

/// Escapes pipes and flattens line breaks so a value stays in its cell
fn escape_cell(value: &str) -> String {
    value
        .replace('|', "\\|")
        .replace(['\r', '\n'], " ")
}
