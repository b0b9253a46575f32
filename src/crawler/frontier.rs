//! The URL frontier: a shared FIFO work queue with visited-set deduplication
//!
//! One mutex guards the queue and the visited set together, so every
//! mutating operation is a single small critical section (a push/pop plus a
//! set probe). The queue length is mirrored into an atomic at the end of
//! each mutating call, letting workers poll for emptiness without taking
//! the lock; the mirrored value and the real length agree at quiescence.
//!
//! Deduplication is URL-level, not domain-level: distinct URLs of one
//! domain are all admitted and each contributes to that domain's visit
//! count. Promoting this to domain-level deduplication would break the
//! visit-count semantics.

use crate::url::MAX_URL_LEN;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct FrontierInner {
    queue: VecDeque<String>,
    visited: HashSet<String>,
}

/// Thread-safe FIFO of pending URLs plus the set of all URLs ever admitted
#[derive(Debug)]
pub struct UrlFrontier {
    inner: Mutex<FrontierInner>,
    queue_size: AtomicUsize,
    done: AtomicBool,
}

impl UrlFrontier {
    /// Creates a frontier seeded with a single URL.
    pub fn new(seed_url: &str) -> Self {
        let mut inner = FrontierInner::default();
        inner.queue.push_back(seed_url.to_string());
        inner.visited.insert(seed_url.to_string());

        Self {
            inner: Mutex::new(inner),
            queue_size: AtomicUsize::new(1),
            done: AtomicBool::new(false),
        }
    }

    /// Atomically removes and returns the head of the queue.
    pub fn try_dequeue(&self) -> Option<String> {
        let mut inner = self.inner.lock().expect("frontier lock poisoned");
        let url = inner.queue.pop_front();
        self.queue_size.store(inner.queue.len(), Ordering::Relaxed);
        url
    }

    /// Admits a URL if it has never been admitted before.
    ///
    /// Empty and oversized URLs are rejected outright. Admission inserts
    /// into the visited set and appends to the queue; a URL is therefore
    /// delivered to at most one worker over the frontier's lifetime.
    ///
    /// # Returns
    ///
    /// `true` when the URL was admitted, `false` when it was rejected or
    /// already known.
    pub fn add_if_new(&self, url: &str) -> bool {
        if url.is_empty() || url.len() > MAX_URL_LEN {
            return false;
        }

        let mut inner = self.inner.lock().expect("frontier lock poisoned");
        if !inner.visited.insert(url.to_string()) {
            return false;
        }

        inner.queue.push_back(url.to_string());
        self.queue_size.store(inner.queue.len(), Ordering::Relaxed);
        true
    }

    /// Applies [`add_if_new`](Self::add_if_new) to every URL in order.
    ///
    /// # Returns
    ///
    /// The number of URLs admitted.
    pub fn batch_enqueue(&self, urls: &[String]) -> usize {
        urls.iter().filter(|url| self.add_if_new(url)).count()
    }

    /// Last published queue length. Lock-free; eventually consistent while
    /// mutations are in flight.
    pub fn queue_size(&self) -> usize {
        self.queue_size.load(Ordering::Relaxed)
    }

    /// Number of URLs ever admitted.
    pub fn visited_count(&self) -> usize {
        self.inner
            .lock()
            .expect("frontier lock poisoned")
            .visited
            .len()
    }

    /// Signals that crawling is complete. Terminal: there is no way back.
    pub fn mark_done(&self) {
        self.done.store(true, Ordering::SeqCst);
    }

    /// Whether [`mark_done`](Self::mark_done) has been called.
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }

    /// Whether there are URLs left to process and the crawl is still live.
    pub fn has_work(&self) -> bool {
        self.queue_size() > 0 && !self.is_done()
    }
}
