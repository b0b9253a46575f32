//! Iterative PageRank over the merged domain graph
//!
//! The node set is the union of the graph's source domains and every
//! destination appearing in any adjacency list, so rank flowing into
//! domains that were never crawled is not lost. Nodes without outgoing
//! edges (destination-only domains included) are dangling: their rank is
//! collected each iteration and redistributed uniformly.

use std::collections::{HashMap, HashSet};

/// Damping factor: probability of following a link instead of teleporting
pub const DAMPING: f64 = 0.85;

/// Default number of iterations
pub const DEFAULT_ITERATIONS: usize = 30;

/// Computes PageRank scores for every node reachable in `graph`.
///
/// Each iteration:
/// 1. seeds every node with the teleport term `(1 - d) / n`
/// 2. collects the dangling mass (rank held by nodes with no outgoing
///    edges)
/// 3. pushes `d * rank / outdegree` along every edge; a source linking to
///    the same destination k times contributes k shares
/// 4. spreads `d * dangling / n` to every node
/// 5. renormalizes so the scores sum to exactly 1, absorbing float drift
///
/// # Returns
///
/// Scores summing to 1.0, or an empty map when the graph has no nodes
/// (logged as a warning).
pub fn compute(graph: &HashMap<String, Vec<String>>, iterations: usize) -> HashMap<String, f64> {
    let mut nodes: HashSet<&str> = HashSet::new();
    for (source, outbound) in graph {
        nodes.insert(source.as_str());
        for destination in outbound {
            nodes.insert(destination.as_str());
        }
    }

    let n = nodes.len();
    if n == 0 {
        tracing::warn!("no nodes to rank");
        return HashMap::new();
    }

    tracing::info!(nodes = n, iterations, "computing pagerank");

    let uniform = 1.0 / n as f64;
    let mut rank: HashMap<&str, f64> = nodes.iter().map(|&node| (node, uniform)).collect();

    let teleport = (1.0 - DAMPING) / n as f64;

    for _ in 0..iterations {
        let mut next: HashMap<&str, f64> = nodes.iter().map(|&node| (node, teleport)).collect();

        let dangling_mass: f64 = nodes
            .iter()
            .filter(|&&node| graph.get(node).map_or(true, |out| out.is_empty()))
            .map(|&node| rank[node])
            .sum();

        for (source, outbound) in graph {
            if outbound.is_empty() {
                continue;
            }

            let contribution = DAMPING * rank[source.as_str()] / outbound.len() as f64;
            for destination in outbound {
                if let Some(score) = next.get_mut(destination.as_str()) {
                    *score += contribution;
                }
            }
        }

        let dangling_share = DAMPING * dangling_mass / n as f64;
        for score in next.values_mut() {
            *score += dangling_share;
        }

        let total: f64 = next.values().sum();
        if total > 0.0 {
            for score in next.values_mut() {
                *score /= total;
            }
        }

        rank = next;
    }

    rank.into_iter()
        .map(|(node, score)| (node.to_string(), score))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUM_TOLERANCE: f64 = 1e-9;

    fn graph_from(edges: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
        edges
            .iter()
            .map(|(source, outbound)| {
                (
                    source.to_string(),
                    outbound.iter().map(|d| d.to_string()).collect(),
                )
            })
            .collect()
    }

    fn assert_sums_to_one(rank: &HashMap<String, f64>) {
        let total: f64 = rank.values().sum();
        assert!(
            (total - 1.0).abs() < SUM_TOLERANCE,
            "rank sum {} not within tolerance of 1.0",
            total
        );
    }

    #[test]
    fn test_empty_graph_yields_empty_rank() {
        let rank = compute(&HashMap::new(), 30);
        assert!(rank.is_empty());
    }

    #[test]
    fn test_single_node_gets_full_rank() {
        let graph = graph_from(&[("a.test", &[][..])]);
        let rank = compute(&graph, 30);

        assert_eq!(rank.len(), 1);
        assert!((rank["a.test"] - 1.0).abs() < SUM_TOLERANCE);
    }

    #[test]
    fn test_sum_is_one_after_every_iteration_count() {
        let graph = graph_from(&[
            ("a.test", &["b.test", "c.test"][..]),
            ("b.test", &["c.test"][..]),
            ("c.test", &[][..]),
        ]);

        for iterations in 1..=10 {
            let rank = compute(&graph, iterations);
            assert_sums_to_one(&rank);
        }
    }

    #[test]
    fn test_destination_only_nodes_are_ranked() {
        let graph = graph_from(&[("a.test", &["b.test"][..])]);
        let rank = compute(&graph, 30);

        assert_eq!(rank.len(), 2);
        assert!(rank.contains_key("a.test"));
        assert!(rank.contains_key("b.test"));
        assert_sums_to_one(&rank);
    }

    #[test]
    fn test_every_adjacency_destination_has_a_rank_entry() {
        let graph = graph_from(&[
            ("a.test", &["b.test", "c.test", "d.test"][..]),
            ("b.test", &["e.test"][..]),
        ]);
        let rank = compute(&graph, 5);

        for outbound in graph.values() {
            for destination in outbound {
                assert!(rank.contains_key(destination));
            }
        }
    }

    #[test]
    fn test_two_node_chain_favors_sink() {
        let graph = graph_from(&[("a.test", &["b.test"][..]), ("b.test", &[][..])]);
        let rank = compute(&graph, 30);

        assert!(rank["b.test"] > rank["a.test"]);
        assert_sums_to_one(&rank);
    }

    #[test]
    fn test_multi_edge_contributions_are_not_split() {
        // Ten parallel edges a -> x: x must receive the full damped rank of
        // a, exactly as if the outdegree were one.
        let multi = graph_from(&[("a.test", &["x.test"; 10][..])]);
        let single = graph_from(&[("a.test", &["x.test"][..])]);

        let rank_multi = compute(&multi, 1);
        let rank_single = compute(&single, 1);

        assert!((rank_multi["x.test"] - rank_single["x.test"]).abs() < SUM_TOLERANCE);
        assert_sums_to_one(&rank_multi);
    }

    #[test]
    fn test_dangling_mass_is_recycled() {
        // b has no outgoing edges; its rank must flow back into the graph
        // instead of draining the total.
        let graph = graph_from(&[
            ("a.test", &["b.test"][..]),
            ("c.test", &["a.test"][..]),
        ]);

        for iterations in 1..=20 {
            let rank = compute(&graph, iterations);
            assert_sums_to_one(&rank);
            assert!(rank.values().all(|&score| score >= 0.0));
        }
    }

    #[test]
    fn test_symmetric_pair_ranks_equally() {
        let graph = graph_from(&[("a.test", &["b.test"][..]), ("b.test", &["a.test"][..])]);
        let rank = compute(&graph, 30);

        assert!((rank["a.test"] - rank["b.test"]).abs() < SUM_TOLERANCE);
        assert!((rank["a.test"] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_iterations_returns_uniform() {
        let graph = graph_from(&[("a.test", &["b.test"][..])]);
        let rank = compute(&graph, 0);

        assert!((rank["a.test"] - 0.5).abs() < SUM_TOLERANCE);
        assert!((rank["b.test"] - 0.5).abs() < SUM_TOLERANCE);
    }
}
