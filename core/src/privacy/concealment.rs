// Concealment: Hiding a random fraction of the topology
//
// Node and edge samples are drawn independently from the original graph. A
// hidden edge may therefore touch a hidden node; removing it again is a no-op.
// Edges that disappear only because an endpoint was hidden are recorded
// separately so restoration can put them back.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::graph::{Edge, Graph, NodeId};
use crate::privacy::restore_topology;
use crate::{Result, TopologyError};

/// Output of [`apply_anonymous_routing`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcealmentResult {
    /// Copy of the input with the hidden elements removed
    pub anonymous: Graph,
    /// Nodes drawn for hiding, in draw order
    pub hidden_nodes: Vec<NodeId>,
    /// Edges drawn for hiding, in draw order
    pub hidden_edges: Vec<Edge>,
    /// Edges not drawn for hiding that were removed along with a hidden
    /// endpoint, in graph order
    #[serde(default)]
    pub detached_edges: Vec<Edge>,
}

impl ConcealmentResult {
    /// Every edge missing from the anonymous graph: drawn edges first, then
    /// detached ones
    pub fn removed_edges(&self) -> Vec<Edge> {
        self.hidden_edges
            .iter()
            .chain(&self.detached_edges)
            .copied()
            .collect()
    }

    /// Rebuild the pre-concealment topology from the anonymous graph
    pub fn restore(&self) -> Graph {
        restore_topology(&self.anonymous, &self.hidden_nodes, &self.removed_edges())
    }
}

/// `floor(ratio * total)`, clamped to `total`
pub fn hidden_count(hide_ratio: f64, total: usize) -> usize {
    ((hide_ratio * total as f64).floor() as usize).min(total)
}

fn validate_ratio(hide_ratio: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&hide_ratio) {
        return Err(TopologyError::InvalidArgument(format!(
            "hide ratio must be within [0, 1], got {}",
            hide_ratio
        )));
    }
    Ok(())
}

/// Hide `floor(hide_ratio * |V|)` nodes and `floor(hide_ratio * |E|)` edges,
/// each sampled uniformly without replacement.
///
/// The anonymous graph is a copy of `graph` with the hidden nodes removed
/// (taking their incident edges with them) and then the hidden edges removed.
/// `graph` itself is left untouched.
pub fn apply_anonymous_routing<R: Rng + ?Sized>(
    graph: &Graph,
    hide_ratio: f64,
    rng: &mut R,
) -> Result<ConcealmentResult> {
    validate_ratio(hide_ratio)?;

    let nodes: Vec<NodeId> = graph.nodes().collect();
    let edges: Vec<Edge> = graph.edges().collect();
    let k_nodes = hidden_count(hide_ratio, nodes.len());
    let k_edges = hidden_count(hide_ratio, edges.len());

    let hidden_nodes: Vec<NodeId> = nodes.choose_multiple(rng, k_nodes).copied().collect();
    let hidden_edges: Vec<Edge> = edges.choose_multiple(rng, k_edges).copied().collect();

    let hidden_set: HashSet<NodeId> = hidden_nodes.iter().copied().collect();
    let drawn_set: HashSet<Edge> = hidden_edges.iter().copied().collect();
    let detached_edges: Vec<Edge> = edges
        .iter()
        .filter(|edge| {
            let (u, v) = edge.endpoints();
            (hidden_set.contains(&u) || hidden_set.contains(&v)) && !drawn_set.contains(edge)
        })
        .copied()
        .collect();

    let mut anonymous = graph.clone();
    anonymous.remove_nodes_from(&hidden_nodes);
    for edge in &hidden_edges {
        anonymous.remove_edge(edge);
    }

    tracing::debug!(
        hide_ratio,
        hidden_nodes = hidden_nodes.len(),
        hidden_edges = hidden_edges.len(),
        detached_edges = detached_edges.len(),
        remaining_nodes = anonymous.node_count(),
        remaining_edges = anonymous.edge_count(),
        "Applied anonymous routing"
    );

    Ok(ConcealmentResult {
        anonymous,
        hidden_nodes,
        hidden_edges,
        detached_edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::create_random_topology;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_graph(seed: u64) -> Graph {
        create_random_topology(20, 30, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_hidden_count() {
        assert_eq!(hidden_count(0.3, 20), 6);
        assert_eq!(hidden_count(0.3, 30), 9);
        assert_eq!(hidden_count(0.0, 30), 0);
        assert_eq!(hidden_count(1.0, 30), 30);
        assert_eq!(hidden_count(0.5, 0), 0);
    }

    #[test]
    fn test_sample_sizes() {
        let graph = sample_graph(3);
        let mut rng = StdRng::seed_from_u64(4);
        let result = apply_anonymous_routing(&graph, 0.3, &mut rng).unwrap();

        assert_eq!(result.hidden_nodes.len(), 6);
        assert_eq!(result.hidden_edges.len(), 9);

        let unique_nodes: HashSet<_> = result.hidden_nodes.iter().collect();
        let unique_edges: HashSet<_> = result.hidden_edges.iter().collect();
        assert_eq!(unique_nodes.len(), 6);
        assert_eq!(unique_edges.len(), 9);
        assert!(result.hidden_nodes.iter().all(|n| graph.contains_node(*n)));
        assert!(result.hidden_edges.iter().all(|e| graph.contains_edge(e)));
    }

    #[test]
    fn test_anonymous_graph_excludes_hidden() {
        let graph = sample_graph(5);
        let result = apply_anonymous_routing(&graph, 0.4, &mut StdRng::seed_from_u64(6)).unwrap();

        assert_eq!(result.anonymous.node_count(), 20 - result.hidden_nodes.len());
        for node in &result.hidden_nodes {
            assert!(!result.anonymous.contains_node(*node));
            assert_eq!(result.anonymous.degree(*node), 0);
        }
        for edge in &result.hidden_edges {
            assert!(!result.anonymous.contains_edge(edge));
        }
        // Surviving edges only connect surviving nodes
        for edge in result.anonymous.edges() {
            let (u, v) = edge.endpoints();
            assert!(result.anonymous.contains_node(u));
            assert!(result.anonymous.contains_node(v));
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let graph = sample_graph(8);
        let before = graph.clone();
        let _ = apply_anonymous_routing(&graph, 0.7, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(graph, before);
    }

    #[test]
    fn test_detached_edges_recorded() {
        let mut graph = Graph::with_nodes(2);
        graph.add_edge(Edge::between(0, 1));

        // One node hidden, no edges drawn: the only edge goes with its endpoint
        let result = apply_anonymous_routing(&graph, 0.98, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(result.hidden_nodes.len(), 1);
        assert!(result.hidden_edges.is_empty());
        assert_eq!(result.detached_edges, vec![Edge::between(0, 1)]);
        assert_eq!(result.anonymous.edge_count(), 0);

        let restored = result.restore();
        assert!(restored.same_structure(&graph));
    }

    #[test]
    fn test_detached_edges_exclude_drawn() {
        let graph = sample_graph(5);
        let result = apply_anonymous_routing(&graph, 0.4, &mut StdRng::seed_from_u64(6)).unwrap();

        let drawn: HashSet<_> = result.hidden_edges.iter().collect();
        for edge in &result.detached_edges {
            let (u, v) = edge.endpoints();
            assert!(result.hidden_nodes.contains(&u) || result.hidden_nodes.contains(&v));
            assert!(!drawn.contains(edge));
        }

        // Drawn and detached edges together account for every missing edge
        let missing: HashSet<_> = graph
            .edges()
            .filter(|e| !result.anonymous.contains_edge(e))
            .collect();
        let removed: HashSet<_> = result.removed_edges().into_iter().collect();
        assert_eq!(missing, removed);
        assert!(result.restore().same_structure(&graph));
    }

    #[test]
    fn test_invalid_ratio_rejected() {
        let graph = sample_graph(1);
        let mut rng = StdRng::seed_from_u64(1);
        for ratio in [-0.1, 1.01, f64::NAN, f64::INFINITY] {
            let err = apply_anonymous_routing(&graph, ratio, &mut rng).unwrap_err();
            assert!(matches!(err, TopologyError::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_zero_ratio_hides_nothing() {
        let graph = sample_graph(2);
        let result = apply_anonymous_routing(&graph, 0.0, &mut StdRng::seed_from_u64(2)).unwrap();
        assert!(result.hidden_nodes.is_empty());
        assert!(result.hidden_edges.is_empty());
        assert_eq!(result.anonymous, graph);
    }

    #[test]
    fn test_full_ratio_hides_everything() {
        let graph = sample_graph(2);
        let result = apply_anonymous_routing(&graph, 1.0, &mut StdRng::seed_from_u64(2)).unwrap();
        let hidden: HashSet<_> = result.hidden_nodes.iter().copied().collect();
        let all: HashSet<_> = graph.nodes().collect();
        assert_eq!(hidden, all);
        assert_eq!(result.hidden_edges.len(), 30);
        assert!(result.anonymous.is_empty());
        assert_eq!(result.anonymous.edge_count(), 0);
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::new();
        let result = apply_anonymous_routing(&graph, 0.5, &mut StdRng::seed_from_u64(0)).unwrap();
        assert!(result.hidden_nodes.is_empty());
        assert!(result.anonymous.is_empty());
    }

    #[test]
    fn test_result_serialization() {
        let graph = sample_graph(11);
        let result = apply_anonymous_routing(&graph, 0.3, &mut StdRng::seed_from_u64(12)).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: ConcealmentResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
