//! Worker loop: dequeue, fetch, parse, record, enqueue
//!
//! Workers run on plain OS threads. Each one owns a private shard buffer
//! (moved in at spawn, handed back at join) and shares the frontier, the
//! page counter, and the idle-worker count with the rest of the pool.

use crate::crawler::{extract_links, Fetcher, UrlFrontier};
use crate::storage::ShardBuffer;
use crate::url::extract_domain;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Backoff floor when the queue runs dry
pub(crate) const INITIAL_BACKOFF: Duration = Duration::from_millis(10);

/// Backoff ceiling
pub(crate) const MAX_BACKOFF: Duration = Duration::from_millis(500);

/// State shared by the whole worker pool
pub(crate) struct CrawlShared {
    pub frontier: UrlFrontier,
    pub pages_crawled: AtomicUsize,
    pub budget: usize,
    pub idle_workers: AtomicUsize,
    pub num_workers: usize,
}

/// Runs one worker until the budget is met or the frontier is marked done.
///
/// The budget check is a best-effort atomic read: the check and the
/// increment are separate operations, so the pool as a whole may record up
/// to `num_workers - 1` pages beyond the budget. That slack is accepted in
/// exchange for a lock-free hot path.
///
/// A failed fetch skips the URL entirely: no visit is recorded and the
/// budget is not consumed. Backoff is per-worker, doubling from 10ms to a
/// 500ms cap while the queue stays empty, and resetting after any
/// successful dequeue.
pub(crate) fn run_worker<F>(
    thread_id: usize,
    shared: Arc<CrawlShared>,
    fetcher: Arc<F>,
    mut shard: ShardBuffer,
) -> ShardBuffer
where
    F: Fetcher + Send + Sync + 'static,
{
    let mut backoff = INITIAL_BACKOFF;

    loop {
        if shared.pages_crawled.load(Ordering::Relaxed) >= shared.budget {
            break;
        }

        if shared.frontier.is_done() {
            break;
        }

        match shared.frontier.try_dequeue() {
            Some(url) => {
                backoff = INITIAL_BACKOFF;
                tracing::debug!(thread_id, url = %url, "downloading");

                let html = match fetcher.fetch(&url) {
                    Some(html) if !html.is_empty() => html,
                    _ => {
                        tracing::debug!(thread_id, url = %url, "fetch failed, skipping");
                        continue;
                    }
                };

                let domain = match extract_domain(&url) {
                    Some(domain) => domain,
                    None => continue,
                };

                let links = extract_links(&html, &url);
                tracing::debug!(
                    thread_id,
                    domain = %domain,
                    bytes = html.len(),
                    links = links.len(),
                    "page fetched"
                );

                shard.add_page(&domain, &links);

                let admitted = shared.frontier.batch_enqueue(&links);
                if admitted > 0 {
                    tracing::trace!(thread_id, admitted, "enqueued new urls");
                }

                shared.pages_crawled.fetch_add(1, Ordering::Relaxed);
            }
            None => {
                if shared.frontier.queue_size() == 0 {
                    idle_backoff(&shared, &mut backoff);
                }
            }
        }
    }

    tracing::debug!(thread_id, pages = shard.page_count(), "worker finished");
    shard
}

/// Sleeps through one backoff interval, registering as idle for its
/// duration.
///
/// The idle count doubles as a quiescence detector: the worker that brings
/// it up to the full pool size while the queue is still empty knows that no
/// peer can produce further URLs, and marks the frontier done so the whole
/// pool exits instead of backing off forever under an unmet budget.
fn idle_backoff(shared: &CrawlShared, backoff: &mut Duration) {
    let idle = shared.idle_workers.fetch_add(1, Ordering::SeqCst) + 1;

    if idle == shared.num_workers && shared.frontier.queue_size() == 0 {
        tracing::debug!("frontier drained with all workers idle, marking done");
        shared.frontier.mark_done();
    }

    if !shared.frontier.is_done() {
        thread::sleep(*backoff);
        *backoff = (*backoff * 2).min(MAX_BACKOFF);
    }

    shared.idle_workers.fetch_sub(1, Ordering::SeqCst);
}
