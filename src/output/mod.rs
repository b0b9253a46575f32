//! Output module: CSV reports and run metrics
//!
//! Two reports are written after every crawl:
//! - the pages report (`domain,outgoing_links,visit_count`), one row per
//!   crawled domain
//! - the rank report (`domain,pagerank_score`), one row per ranked domain
//!
//! plus a one-row metrics append to a shared metrics file. Row order is
//! unspecified; consumers must compare as sets.

mod metrics;
mod report;

pub use metrics::{append_metrics, RunMetrics};
pub use report::{export_pages_report, export_rank_report, export_reports};

use thiserror::Error;

/// Errors that can occur while writing output files
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
