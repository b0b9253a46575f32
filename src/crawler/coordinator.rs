//! Crawl coordination
//!
//! The coordinator owns the whole run: it seeds the frontier, spawns the
//! worker pool and a progress logger, joins the workers, merges their shard
//! buffers in shard-index order, and drives PageRank over the merged
//! graph. The happens-before edges the storage layer relies on (workers
//! finish writing before the merge reads) come from the thread joins.

use crate::config::CrawlConfig;
use crate::crawler::worker::{run_worker, CrawlShared};
use crate::crawler::{Fetcher, UrlFrontier};
use crate::storage::{LinkGraph, ShardBuffer};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Interval between progress log lines
const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// Everything a finished crawl produces
pub struct CrawlOutcome {
    /// Merged graph with visit counts and PageRank scores
    pub graph: LinkGraph,

    /// Pages recorded across all workers
    pub pages_crawled: usize,

    /// Wall-clock time of the crawl phase (excludes merge and ranking)
    pub crawl_duration: Duration,
}

/// Owns the worker pool and runs a crawl to completion
pub struct Coordinator {
    config: CrawlConfig,
}

impl Coordinator {
    pub fn new(config: CrawlConfig) -> Self {
        Self { config }
    }

    /// Runs the full pipeline: crawl, merge, rank.
    ///
    /// The page budget is shared by all workers through an atomic counter;
    /// because the check and increment are not one transaction, the final
    /// count may exceed the budget by up to `num_threads - 1` pages.
    ///
    /// # Errors
    ///
    /// Fails only when a worker thread cannot be spawned. Worker panics are
    /// logged and cost that worker's shard, never the run.
    pub fn run<F>(&self, fetcher: Arc<F>) -> crate::Result<CrawlOutcome>
    where
        F: Fetcher + Send + Sync + 'static,
    {
        let shared = Arc::new(CrawlShared {
            frontier: UrlFrontier::new(&self.config.seed_url),
            pages_crawled: AtomicUsize::new(0),
            budget: self.config.max_pages,
            idle_workers: AtomicUsize::new(0),
            num_workers: self.config.num_threads,
        });

        tracing::info!(
            seed = %self.config.seed_url,
            max_pages = self.config.max_pages,
            threads = self.config.num_threads,
            "starting crawl"
        );

        let crawl_start = Instant::now();

        let mut handles = Vec::with_capacity(self.config.num_threads);
        for thread_id in 0..self.config.num_threads {
            let shared = Arc::clone(&shared);
            let fetcher = Arc::clone(&fetcher);

            let handle = thread::Builder::new()
                .name(format!("crawl-worker-{}", thread_id))
                .spawn(move || run_worker(thread_id, shared, fetcher, ShardBuffer::new()))?;
            handles.push(handle);
        }

        let progress_stop = Arc::new(AtomicBool::new(false));
        let progress_handle = spawn_progress_logger(Arc::clone(&shared), Arc::clone(&progress_stop));

        // Joining in spawn order keeps the buffers in shard-index order,
        // which the merge policy depends on.
        let mut buffers = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.join() {
                Ok(buffer) => buffers.push(buffer),
                Err(_) => tracing::error!("worker thread panicked; its shard is lost"),
            }
        }

        shared.frontier.mark_done();
        progress_stop.store(true, Ordering::Relaxed);
        if progress_handle.join().is_err() {
            tracing::error!("progress logger thread panicked");
        }

        let crawl_duration = crawl_start.elapsed();
        let pages_crawled = shared.pages_crawled.load(Ordering::Relaxed);
        tracing::info!(
            pages = pages_crawled,
            visited = shared.frontier.visited_count(),
            elapsed_ms = crawl_duration.as_millis() as u64,
            "crawling completed"
        );

        let merge_start = Instant::now();
        let mut graph = LinkGraph::merge_shards(buffers);
        tracing::info!(
            elapsed_ms = merge_start.elapsed().as_millis() as u64,
            "merge completed"
        );

        let rank_start = Instant::now();
        graph.compute_pagerank(self.config.pagerank_iterations);
        tracing::info!(
            elapsed_ms = rank_start.elapsed().as_millis() as u64,
            "pagerank completed"
        );

        Ok(CrawlOutcome {
            graph,
            pages_crawled,
            crawl_duration,
        })
    }
}

/// Logs pages/queue/visited once a second until told to stop.
fn spawn_progress_logger(
    shared: Arc<CrawlShared>,
    stop: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        thread::sleep(PROGRESS_INTERVAL);
        if stop.load(Ordering::Relaxed) {
            break;
        }

        tracing::info!(
            pages = shared.pages_crawled.load(Ordering::Relaxed),
            budget = shared.budget,
            queue = shared.frontier.queue_size(),
            visited = shared.frontier.visited_count(),
            "progress"
        );
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapFetcher(HashMap<String, String>);

    impl Fetcher for MapFetcher {
        fn fetch(&self, url: &str) -> Option<String> {
            self.0.get(url).cloned()
        }
    }

    fn config(seed: &str, max_pages: usize, num_threads: usize) -> CrawlConfig {
        CrawlConfig::new(seed.to_string(), max_pages, num_threads)
    }

    #[test]
    fn test_run_single_page() {
        let mut pages = HashMap::new();
        pages.insert("https://a.test".to_string(), "<html></html>".to_string());

        let coordinator = Coordinator::new(config("https://a.test", 1, 1));
        let outcome = coordinator.run(Arc::new(MapFetcher(pages))).unwrap();

        assert_eq!(outcome.pages_crawled, 1);
        assert_eq!(outcome.graph.graph()["a.test"], Vec::<String>::new());
        assert_eq!(outcome.graph.visit_count_of("a.test"), 1);
    }

    #[test]
    fn test_run_terminates_with_unmet_budget() {
        // Two fetchable pages, budget of 100: quiescence must end the run.
        let mut pages = HashMap::new();
        pages.insert(
            "https://a.test".to_string(),
            r#"<a href="https://b.test">b</a>"#.to_string(),
        );
        pages.insert("https://b.test".to_string(), "<html></html>".to_string());

        let coordinator = Coordinator::new(config("https://a.test", 100, 4));
        let outcome = coordinator.run(Arc::new(MapFetcher(pages))).unwrap();

        assert_eq!(outcome.pages_crawled, 2);
    }

    #[test]
    fn test_visit_counts_sum_to_pages_crawled() {
        let mut pages = HashMap::new();
        for i in 0..20 {
            pages.insert(
                format!("https://a.test/{}", i),
                format!(r#"<a href="https://a.test/{}">next</a>"#, i + 1),
            );
        }

        let coordinator = Coordinator::new(config("https://a.test/0", 10, 3));
        let outcome = coordinator.run(Arc::new(MapFetcher(pages))).unwrap();

        assert_eq!(outcome.graph.total_visits(), outcome.pages_crawled);
    }
}
