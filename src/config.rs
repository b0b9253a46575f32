//! Crawl configuration and validation
//!
//! The configuration is built from the three positional command-line
//! arguments plus defaults for everything else (PageRank iteration count and
//! output file locations). Output paths are plain fields so that callers and
//! tests can redirect reports away from the working directory.

use crate::url::is_valid_url;
use crate::ConfigError;
use std::path::PathBuf;

/// Default name of the per-domain pages report
pub const DEFAULT_PAGES_REPORT: &str = "crawled_pages.csv";

/// Default name of the PageRank report
pub const DEFAULT_RANK_REPORT: &str = "pagerank_results.csv";

/// Default name of the shared run-metrics file
pub const DEFAULT_METRICS_FILE: &str = "metrics.csv";

/// Upper bound on the worker pool size
pub const MAX_WORKER_THREADS: usize = 64;

/// Configuration for a single crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Starting URL of the crawl
    pub seed_url: String,

    /// Global page budget; workers stop once this many pages are recorded
    pub max_pages: usize,

    /// Number of worker threads (1..=64)
    pub num_threads: usize,

    /// Number of PageRank iterations to run after the merge
    pub pagerank_iterations: usize,

    /// Where to write the per-domain pages report
    pub pages_report_path: PathBuf,

    /// Where to write the PageRank report
    pub rank_report_path: PathBuf,

    /// Where to append the per-run metrics row
    pub metrics_path: PathBuf,
}

impl CrawlConfig {
    /// Creates a configuration from the command-line arguments, filling the
    /// remaining fields with defaults.
    pub fn new(seed_url: String, max_pages: usize, num_threads: usize) -> Self {
        Self {
            seed_url,
            max_pages,
            num_threads,
            pagerank_iterations: crate::rank::DEFAULT_ITERATIONS,
            pages_report_path: PathBuf::from(DEFAULT_PAGES_REPORT),
            rank_report_path: PathBuf::from(DEFAULT_RANK_REPORT),
            metrics_path: PathBuf::from(DEFAULT_METRICS_FILE),
        }
    }

    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The configuration is usable
    /// * `Err(ConfigError)` - The first validation failure encountered
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_url(&self.seed_url) {
            return Err(ConfigError::InvalidSeedUrl(self.seed_url.clone()));
        }

        if self.max_pages == 0 {
            return Err(ConfigError::InvalidPageBudget);
        }

        if self.num_threads == 0 || self.num_threads > MAX_WORKER_THREADS {
            return Err(ConfigError::InvalidThreadCount {
                got: self.num_threads,
                max: MAX_WORKER_THREADS,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CrawlConfig {
        CrawlConfig::new("https://example.com".to_string(), 100, 4)
    }

    #[test]
    fn test_valid_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_default_paths_and_iterations() {
        let config = base_config();
        assert_eq!(config.pagerank_iterations, 30);
        assert_eq!(config.pages_report_path, PathBuf::from("crawled_pages.csv"));
        assert_eq!(
            config.rank_report_path,
            PathBuf::from("pagerank_results.csv")
        );
        assert_eq!(config.metrics_path, PathBuf::from("metrics.csv"));
    }

    #[test]
    fn test_rejects_seed_without_scheme() {
        let mut config = base_config();
        config.seed_url = "example.com".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSeedUrl(_))
        ));
    }

    #[test]
    fn test_rejects_seed_without_host() {
        let mut config = base_config();
        config.seed_url = "https://".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSeedUrl(_))
        ));
    }

    #[test]
    fn test_rejects_zero_budget() {
        let mut config = base_config();
        config.max_pages = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPageBudget)
        ));
    }

    #[test]
    fn test_rejects_zero_threads() {
        let mut config = base_config();
        config.num_threads = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreadCount { got: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_too_many_threads() {
        let mut config = base_config();
        config.num_threads = 65;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreadCount { got: 65, max: 64 })
        ));
    }
}
