//! The merged inter-domain link graph
//!
//! Built once, after every worker has exited, by folding the shard buffers
//! together in shard-index order. The merge policy is deliberate and must
//! stay deterministic:
//!
//! * adjacency lists overwrite, so the final list for a domain is the one
//!   recorded by the highest-indexed shard that saw it (edges are
//!   categorical, they do not sum);
//! * visit counts add up across shards (counts are cardinal).

use crate::rank;
use crate::storage::ShardBuffer;
use std::collections::HashMap;

/// The global graph produced by the post-crawl merge
#[derive(Debug, Default)]
pub struct LinkGraph {
    graph: HashMap<String, Vec<String>>,
    visits: HashMap<String, usize>,
    rank: HashMap<String, f64>,
}

impl LinkGraph {
    /// Merges the per-worker buffers into one graph.
    ///
    /// `buffers` must be in shard-index order; the caller (the coordinator)
    /// collects them from the worker join handles in spawn order.
    pub fn merge_shards(buffers: Vec<ShardBuffer>) -> Self {
        let mut graph: HashMap<String, Vec<String>> = HashMap::new();
        let mut visits: HashMap<String, usize> = HashMap::new();

        for buffer in buffers {
            let (shard_graph, shard_visits, _domains) = buffer.into_parts();

            for (domain, outbound) in shard_graph {
                graph.insert(domain, outbound);
            }

            for (domain, count) in shard_visits {
                *visits.entry(domain).or_insert(0) += count;
            }
        }

        tracing::info!(domains = graph.len(), "merged shard buffers");

        Self {
            graph,
            visits,
            rank: HashMap::new(),
        }
    }

    /// Runs PageRank over the merged graph and stores the scores.
    pub fn compute_pagerank(&mut self, iterations: usize) {
        self.rank = rank::compute(&self.graph, iterations);
    }

    /// The adjacency map: source domain -> destination domains
    pub fn graph(&self) -> &HashMap<String, Vec<String>> {
        &self.graph
    }

    /// Visit counts per crawled domain
    pub fn visits(&self) -> &HashMap<String, usize> {
        &self.visits
    }

    /// PageRank scores; empty until [`compute_pagerank`](Self::compute_pagerank) runs
    pub fn rank(&self) -> &HashMap<String, f64> {
        &self.rank
    }

    /// All crawled source domains
    pub fn domains(&self) -> Vec<&str> {
        self.graph.keys().map(String::as_str).collect()
    }

    /// PageRank score for a domain, 0.0 when unranked
    pub fn pagerank_of(&self, domain: &str) -> f64 {
        self.rank.get(domain).copied().unwrap_or(0.0)
    }

    /// Visit count for a domain, 0 for destination-only domains
    pub fn visit_count_of(&self, domain: &str) -> usize {
        self.visits.get(domain).copied().unwrap_or(0)
    }

    /// Total pages recorded across all domains
    pub fn total_visits(&self) -> usize {
        self.visits.values().sum()
    }
}
