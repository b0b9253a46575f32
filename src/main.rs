//! Linkrank entry point
//!
//! Command-line interface for the concurrent crawler: parse the three
//! positional arguments, run the crawl, write the two CSV reports, and
//! append the run metrics.

use clap::Parser;
use linkrank::config::CrawlConfig;
use linkrank::crawler::{Coordinator, HttpFetcher};
use linkrank::output::{self, RunMetrics};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Concurrent web crawler that ranks discovered domains with PageRank
///
/// Starting from the seed URL, linkrank fetches pages with a pool of worker
/// threads, records which domains link to which, and writes two CSV
/// reports: one describing every crawled domain, one ranking every
/// discovered domain by PageRank score.
#[derive(Parser, Debug)]
#[command(name = "linkrank")]
#[command(version)]
#[command(about = "Concurrent web crawler with PageRank scoring", long_about = None)]
struct Cli {
    /// Starting URL (e.g. https://example.com)
    #[arg(value_name = "SEED_URL")]
    seed_url: String,

    /// Maximum number of pages to crawl
    #[arg(value_name = "MAX_PAGES", value_parser = clap::value_parser!(u64).range(1..))]
    max_pages: u64,

    /// Number of worker threads
    #[arg(value_name = "NUM_THREADS", value_parser = clap::value_parser!(u64).range(1..=64))]
    num_threads: u64,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> linkrank::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = CrawlConfig::new(
        cli.seed_url,
        cli.max_pages as usize,
        cli.num_threads as usize,
    );

    if let Err(error) = config.validate() {
        tracing::error!("{}", error);
        return Err(error.into());
    }

    let fetcher = Arc::new(HttpFetcher::new()?);
    let coordinator = Coordinator::new(config.clone());
    let outcome = coordinator.run(fetcher)?;

    output::export_reports(&outcome.graph, &config);

    let metrics = RunMetrics {
        seed_url: config.seed_url.clone(),
        max_pages: config.max_pages,
        num_threads: config.num_threads,
        total_ms: outcome.crawl_duration.as_millis() as u64,
        pages_crawled: outcome.pages_crawled,
    };

    match output::append_metrics(&metrics, &config.metrics_path) {
        Ok(()) => tracing::info!(
            path = %config.metrics_path.display(),
            "metrics appended"
        ),
        Err(error) => tracing::error!(%error, "metrics append failed"),
    }

    tracing::info!(
        pages = outcome.pages_crawled,
        domains = outcome.graph.graph().len(),
        ranked = outcome.graph.rank().len(),
        "crawl finished"
    );

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkrank=info,warn"),
            1 => EnvFilter::new("linkrank=debug,info"),
            2 => EnvFilter::new("linkrank=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
