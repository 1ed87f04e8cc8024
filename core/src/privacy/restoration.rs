// Restoration: Reinserting hidden elements

use crate::graph::{Edge, Graph, NodeId};

/// Return a copy of `anonymous` with the hidden nodes and edges added back.
///
/// Re-adding something already present is a no-op, and an edge whose
/// endpoint is missing brings that endpoint with it. Given the exact lists a
/// concealment removed, the result has the pre-concealment node and edge
/// sets.
pub fn restore_topology(anonymous: &Graph, hidden_nodes: &[NodeId], hidden_edges: &[Edge]) -> Graph {
    let mut restored = anonymous.clone();

    let added_nodes = hidden_nodes
        .iter()
        .filter(|node| restored.add_node(**node))
        .count();
    let added_edges = hidden_edges
        .iter()
        .filter(|edge| restored.add_edge(**edge))
        .count();

    tracing::debug!(added_nodes, added_edges, "Restored topology");
    restored
}
