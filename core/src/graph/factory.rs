// Random topology generation
//
// G(n, m) model: every simple graph on n labelled nodes with exactly m edges
// is equally likely.

use rand::Rng;

use super::{Edge, Graph, NodeId};
use crate::{Result, TopologyError};

/// Number of distinct unordered pairs among `num_nodes` nodes, or `None` if
/// it does not fit in a `usize`
pub fn max_edge_count(num_nodes: usize) -> Option<usize> {
    if num_nodes < 2 {
        return Some(0);
    }
    // One of n, n-1 is even; halve it first so the product only overflows
    // when the result itself would.
    if num_nodes % 2 == 0 {
        (num_nodes / 2).checked_mul(num_nodes - 1)
    } else {
        num_nodes.checked_mul((num_nodes - 1) / 2)
    }
}

/// Build a graph with nodes `0..num_nodes` and `num_edges` distinct edges
/// drawn uniformly without replacement from all node pairs.
pub fn create_random_topology<R: Rng + ?Sized>(
    num_nodes: usize,
    num_edges: usize,
    rng: &mut R,
) -> Result<Graph> {
    let max_edges = max_edge_count(num_nodes).ok_or_else(|| {
        TopologyError::InvalidArgument(format!("{} nodes is too many to enumerate pairs", num_nodes))
    })?;
    if num_edges > max_edges {
        return Err(TopologyError::InvalidArgument(format!(
            "{} edges requested but {} nodes allow at most {}",
            num_edges, num_nodes, max_edges
        )));
    }

    let mut graph = Graph::with_nodes(num_nodes);
    for rank in rand::seq::index::sample(rng, max_edges, num_edges) {
        graph.add_edge(unrank_pair(rank, num_nodes));
    }

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Created random topology"
    );
    Ok(graph)
}

/// Map a rank in `0..max_edge_count(n)` to a distinct pair `(u, v)` with
/// `u < v`. Ranks enumerate pairs row by row: (0,1), (0,2), .., (1,2), ..
fn unrank_pair(mut rank: usize, num_nodes: usize) -> Edge {
    let mut u = 0;
    let mut row_len = num_nodes - 1;
    while rank >= row_len {
        rank -= row_len;
        u += 1;
        row_len -= 1;
    }
    let v = u + 1 + rank;
    Edge::new(NodeId::new(u as u64), NodeId::new(v as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_max_edge_count() {
        assert_eq!(max_edge_count(0), Some(0));
        assert_eq!(max_edge_count(1), Some(0));
        assert_eq!(max_edge_count(2), Some(1));
        assert_eq!(max_edge_count(5), Some(10));
        assert_eq!(max_edge_count(20), Some(190));
        assert_eq!(max_edge_count(usize::MAX), None);
    }

    #[test]
    fn test_unrank_pair_enumerates_all_pairs() {
        let n = 6;
        let pairs: HashSet<Edge> = (0..max_edge_count(n).unwrap())
            .map(|rank| unrank_pair(rank, n))
            .collect();
        assert_eq!(pairs.len(), 15);
        assert!(pairs.iter().all(|e| !e.is_self_loop()));
        assert_eq!(unrank_pair(0, n), Edge::between(0, 1));
        assert_eq!(unrank_pair(5, n), Edge::between(1, 2));
        assert_eq!(unrank_pair(14, n), Edge::between(4, 5));
    }

    #[test]
    fn test_create_random_topology_counts() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = create_random_topology(20, 30, &mut rng).unwrap();
        assert_eq!(graph.node_count(), 20);
        assert_eq!(graph.edge_count(), 30);
        assert!(graph.edges().all(|e| !e.is_self_loop()));
    }

    #[test]
    fn test_create_complete_graph() {
        let mut rng = StdRng::seed_from_u64(1);
        let graph = create_random_topology(6, 15, &mut rng).unwrap();
        assert_eq!(graph.edge_count(), 15);
        for node in graph.nodes() {
            assert_eq!(graph.degree(node), 5);
        }
    }

    #[test]
    fn test_create_empty_graphs() {
        let mut rng = StdRng::seed_from_u64(1);
        let empty = create_random_topology(0, 0, &mut rng).unwrap();
        assert!(empty.is_empty());

        let isolated = create_random_topology(4, 0, &mut rng).unwrap();
        assert_eq!(isolated.node_count(), 4);
        assert_eq!(isolated.edge_count(), 0);
    }

    #[test]
    fn test_too_many_edges_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = create_random_topology(5, 11, &mut rng).unwrap_err();
        assert!(matches!(err, TopologyError::InvalidArgument(_)));

        let err = create_random_topology(1, 1, &mut rng).unwrap_err();
        assert!(matches!(err, TopologyError::InvalidArgument(_)));
    }

    #[test]
    fn test_same_seed_same_topology() {
        let a = create_random_topology(30, 40, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = create_random_topology(30, 40, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }
}
