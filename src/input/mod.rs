//! URL sources
//!
//! Besides the domain spider, URLs come from a newline-delimited list file
//! or from an XML sitemap.

mod sitemap;

pub use sitemap::{extract_locs, is_html_url, load_sitemap};

use std::path::Path;

/// Reads a newline-delimited URL list
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Trimmed, non-blank lines in file order
/// * `Err(CheckerError)` - The file could not be read
pub fn read_url_list(path: &Path) -> crate::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let urls = parse_url_list(&content);
    tracing::info!("Loaded {} URLs from {}", urls.len(), path.display());
    Ok(urls)
}

/// Splits list content into URLs, skipping blank lines
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
