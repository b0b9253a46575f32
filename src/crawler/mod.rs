//! Crawl engine
//!
//! This module contains the concurrent core of linkrank:
//! - the shared URL frontier with visited-set deduplication
//! - HTTP fetching behind the [`Fetcher`] seam
//! - HTML link extraction
//! - the worker fetch/parse/record/enqueue loop
//! - the coordinator that runs the pool and drives merge and ranking

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod worker;

pub use coordinator::{Coordinator, CrawlOutcome};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
pub use frontier::UrlFrontier;
pub use parser::extract_links;
