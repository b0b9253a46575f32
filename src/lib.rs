//! Linkrank: a concurrent inter-domain link crawler and ranker
//!
//! This crate implements a multithreaded web crawler that, starting from a
//! single seed URL, fetches pages, extracts outbound links, builds a directed
//! graph between domains, and scores every discovered domain with PageRank.

pub mod config;
pub mod crawler;
pub mod output;
pub mod rank;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for linkrank operations
#[derive(Debug, Error)]
pub enum LinkrankError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Seed URL must start with http:// or https:// and contain a host: {0}")]
    InvalidSeedUrl(String),

    #[error("max_pages must be positive")]
    InvalidPageBudget,

    #[error("num_threads must be between 1 and {max}, got {got}")]
    InvalidThreadCount { got: usize, max: usize },
}

/// Result type alias for linkrank operations
pub type Result<T> = std::result::Result<T, LinkrankError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{Coordinator, CrawlOutcome, Fetcher, HttpFetcher, UrlFrontier};
pub use storage::{LinkGraph, ShardBuffer};
pub use url::{extract_domain, is_valid_url, normalize_url, resolve_relative};
