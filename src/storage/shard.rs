//! Per-worker shard buffers
//!
//! Every worker owns exactly one [`ShardBuffer`] for the lifetime of the
//! crawl. The buffer is moved into the worker thread at spawn and handed
//! back through the join handle, so no locking is needed on the hot path:
//! exclusive ownership is enforced by the type system rather than by a
//! mutex.

use crate::url::extract_domain;
use std::collections::{HashMap, HashSet};

/// A single worker's private slice of the link graph
#[derive(Debug, Default)]
pub struct ShardBuffer {
    /// Source domain -> outbound destination domains for the most recently
    /// recorded page of that domain (last writer within the shard wins)
    graph: HashMap<String, Vec<String>>,

    /// Source domain -> number of pages recorded for it by this worker
    visit_count: HashMap<String, usize>,

    /// Distinct source domains this worker has touched
    domains: HashSet<String>,
}

impl ShardBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one successfully fetched page.
    ///
    /// The outbound adjacency is the domain of each link, in link order,
    /// with undecodable links dropped. A page linking to the same domain
    /// several times produces that domain several times; multi-edges are
    /// kept because PageRank weights them individually.
    pub fn add_page(&mut self, source_domain: &str, links: &[String]) {
        let outbound: Vec<String> = links
            .iter()
            .filter_map(|link| extract_domain(link))
            .collect();

        self.graph.insert(source_domain.to_string(), outbound);
        *self
            .visit_count
            .entry(source_domain.to_string())
            .or_insert(0) += 1;
        self.domains.insert(source_domain.to_string());
    }

    /// Outbound adjacency recorded for a domain, if any
    pub fn outbound(&self, domain: &str) -> Option<&[String]> {
        self.graph.get(domain).map(Vec::as_slice)
    }

    /// Number of pages this shard recorded for a domain
    pub fn visit_count(&self, domain: &str) -> usize {
        self.visit_count.get(domain).copied().unwrap_or(0)
    }

    /// Distinct source domains touched by this shard
    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }

    /// Total pages recorded in this shard
    pub fn page_count(&self) -> usize {
        self.visit_count.values().sum()
    }

    /// Consumes the buffer for merging.
    pub(crate) fn into_parts(
        self,
    ) -> (
        HashMap<String, Vec<String>>,
        HashMap<String, usize>,
        HashSet<String>,
    ) {
        (self.graph, self.visit_count, self.domains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_page_records_outbound_domains() {
        let mut shard = ShardBuffer::new();
        shard.add_page(
            "a.test",
            &[
                "https://b.test/page".to_string(),
                "https://c.test".to_string(),
            ],
        );

        assert_eq!(
            shard.outbound("a.test"),
            Some(&["b.test".to_string(), "c.test".to_string()][..])
        );
        assert_eq!(shard.visit_count("a.test"), 1);
        assert_eq!(shard.domain_count(), 1);
    }

    #[test]
    fn test_add_page_drops_undecodable_links() {
        let mut shard = ShardBuffer::new();
        shard.add_page(
            "a.test",
            &[
                "https://b.test".to_string(),
                "not-a-url".to_string(),
                "https://".to_string(),
            ],
        );

        assert_eq!(shard.outbound("a.test"), Some(&["b.test".to_string()][..]));
    }

    #[test]
    fn test_add_page_keeps_multi_edges() {
        let mut shard = ShardBuffer::new();
        let links: Vec<String> = (0..10)
            .map(|i| format!("https://x.test/page{}", i))
            .collect();
        shard.add_page("a.test", &links);

        let outbound = shard.outbound("a.test").unwrap();
        assert_eq!(outbound.len(), 10);
        assert!(outbound.iter().all(|d| d == "x.test"));
    }

    #[test]
    fn test_second_page_overwrites_adjacency_but_sums_visits() {
        let mut shard = ShardBuffer::new();
        shard.add_page("a.test", &["https://b.test".to_string()]);
        shard.add_page("a.test", &["https://c.test".to_string()]);

        assert_eq!(shard.outbound("a.test"), Some(&["c.test".to_string()][..]));
        assert_eq!(shard.visit_count("a.test"), 2);
        assert_eq!(shard.page_count(), 2);
    }

    #[test]
    fn test_empty_link_list_records_empty_adjacency() {
        let mut shard = ShardBuffer::new();
        shard.add_page("a.test", &[]);

        assert_eq!(shard.outbound("a.test"), Some(&[][..]));
        assert_eq!(shard.visit_count("a.test"), 1);
    }
}
