//! State module for tracking crawl progress
//!
//! The domain spider keeps its visited and pending URL sets in a
//! [`Frontier`] owned by the traversal loop. Nothing here outlives one
//! invocation.

mod frontier;

pub use frontier::Frontier;
