//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - HTML link extraction
//! - The concurrency gate bounding primary fetches
//! - The per-URL analysis pipeline
//! - The domain spider that discovers a site's pages

mod fetcher;
mod gate;
mod parser;
mod pipeline;
mod spider;

pub use fetcher::{
    build_http_client, describe_error, fetch_with_retry, retry_transport, FetchPolicy,
    FetchResult, FetchedPage, TransportFailure,
};
pub use gate::{ConcurrencyGate, GatePermit};
pub use parser::{extract_link_candidates, extract_spider_links, LinkCandidate};
pub use pipeline::{run_analysis, Pipeline};
pub use spider::{in_crawl_scope, is_internal, Spider};
