// Annotation: Flagging hidden elements on the full topology

use crate::graph::{Edge, Graph, NodeId};
use crate::{Result, TopologyError};

/// Return a copy of `graph` with `hidden = true` set on every listed node
/// and edge. Marks already present on `graph` are dropped first, so the
/// listed elements are the only hidden ones; other attributes are kept.
///
/// Fails with [`TopologyError::NodeNotFound`] / [`TopologyError::EdgeNotFound`]
/// on the first listed element missing from `graph`; no partially marked
/// graph is returned.
pub fn mark_anonymous_routes(
    graph: &Graph,
    hidden_nodes: &[NodeId],
    hidden_edges: &[Edge],
) -> Result<Graph> {
    let mut marked = graph.clone();
    marked.clear_hidden_marks();

    for node in hidden_nodes {
        marked
            .node_attributes_mut(*node)
            .ok_or(TopologyError::NodeNotFound(*node))?
            .set_hidden(true);
    }

    for edge in hidden_edges {
        marked
            .edge_attributes_mut(edge)
            .ok_or(TopologyError::EdgeNotFound(*edge))?
            .set_hidden(true);
    }

    tracing::debug!(
        marked_nodes = hidden_nodes.len(),
        marked_edges = hidden_edges.len(),
        "Marked anonymous routes"
    );
    Ok(marked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Graph {
        let mut graph = Graph::with_nodes(4);
        graph.add_edge(Edge::between(0, 1));
        graph.add_edge(Edge::between(1, 2));
        graph.add_edge(Edge::between(2, 3));
        graph.add_edge(Edge::between(3, 0));
        graph
    }

    #[test]
    fn test_marks_exactly_listed_elements() {
        let graph = square();
        let marked = mark_anonymous_routes(
            &graph,
            &[NodeId::new(2)],
            &[Edge::between(1, 0), Edge::between(2, 3)],
        )
        .unwrap();

        assert_eq!(marked.hidden_nodes().collect::<Vec<_>>(), vec![NodeId::new(2)]);
        assert_eq!(
            marked.hidden_edges().collect::<Vec<_>>(),
            vec![Edge::between(0, 1), Edge::between(2, 3)]
        );
        assert!(marked.same_structure(&graph));
    }

    #[test]
    fn test_input_not_mutated() {
        let graph = square();
        let _ = mark_anonymous_routes(&graph, &[NodeId::new(0)], &[Edge::between(0, 1)]).unwrap();
        assert_eq!(graph.hidden_nodes().count(), 0);
        assert_eq!(graph.hidden_edges().count(), 0);
    }

    #[test]
    fn test_empty_lists_mark_nothing() {
        let graph = square();
        let marked = mark_anonymous_routes(&graph, &[], &[]).unwrap();
        assert_eq!(marked, graph);
    }

    #[test]
    fn test_missing_node_fails() {
        let graph = square();
        let err = mark_anonymous_routes(&graph, &[NodeId::new(9)], &[]).unwrap_err();
        assert_eq!(err, TopologyError::NodeNotFound(NodeId::new(9)));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_missing_edge_fails() {
        let graph = square();
        let err = mark_anonymous_routes(&graph, &[], &[Edge::between(0, 2)]).unwrap_err();
        assert_eq!(err, TopologyError::EdgeNotFound(Edge::between(0, 2)));
    }

    #[test]
    fn test_remarking_replaces_earlier_marks() {
        let graph = square();
        let first = mark_anonymous_routes(&graph, &[NodeId::new(0)], &[Edge::between(0, 1)]).unwrap();
        let second =
            mark_anonymous_routes(&first, &[NodeId::new(2)], &[Edge::between(1, 2)]).unwrap();

        assert_eq!(second.hidden_nodes().collect::<Vec<_>>(), vec![NodeId::new(2)]);
        assert_eq!(second.hidden_edges().collect::<Vec<_>>(), vec![Edge::between(1, 2)]);
        assert_eq!(first.hidden_nodes().collect::<Vec<_>>(), vec![NodeId::new(0)]);
    }

    #[test]
    fn test_unrelated_attributes_survive() {
        let mut graph = square();
        graph.node_attributes_mut(NodeId::new(3)).unwrap().set("label", "exit");
        graph.node_attributes_mut(NodeId::new(3)).unwrap().set_hidden(true);

        let marked = mark_anonymous_routes(&graph, &[], &[]).unwrap();
        let attrs = marked.node_attributes(NodeId::new(3)).unwrap();
        assert!(!attrs.is_hidden());
        assert_eq!(attrs.get_text("label"), Some("exit"));
    }

    #[test]
    fn test_duplicate_entries_are_harmless() {
        let graph = square();
        let marked =
            mark_anonymous_routes(&graph, &[NodeId::new(1), NodeId::new(1)], &[]).unwrap();
        assert_eq!(marked.hidden_nodes().count(), 1);
    }
}
