// Graph Model: Undirected topology with attributed nodes and edges
//
// Nodes and edges live in ordered maps so iteration order is stable. Seeded
// sampling over a graph therefore picks the same elements on every run.

pub mod attributes;
pub mod factory;

pub use attributes::{AttrValue, Attributes, HIDDEN};
pub use factory::{create_random_topology, max_edge_count};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::{Result, TopologyError};

/// Opaque node identifier, stable across copies of a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    pub const fn new(id: u64) -> Self {
        NodeId(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Undirected edge. Endpoints are stored smaller-first, so `(a, b)` and
/// `(b, a)` compare and hash the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(NodeId, NodeId)", into = "(NodeId, NodeId)")]
pub struct Edge {
    a: NodeId,
    b: NodeId,
}

impl Edge {
    pub fn new(u: NodeId, v: NodeId) -> Self {
        if u <= v {
            Edge { a: u, b: v }
        } else {
            Edge { a: v, b: u }
        }
    }

    /// Edge between two raw node labels
    pub fn between(u: u64, v: u64) -> Self {
        Edge::new(NodeId(u), NodeId(v))
    }

    /// Both endpoints, smaller first
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.a, self.b)
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.a == node || self.b == node
    }

    pub fn is_self_loop(&self) -> bool {
        self.a == self.b
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((u, v): (NodeId, NodeId)) -> Self {
        Edge::new(u, v)
    }
}

impl From<Edge> for (NodeId, NodeId) {
    fn from(edge: Edge) -> Self {
        edge.endpoints()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}

/// Undirected graph with an attribute map on every node and edge.
///
/// Value-like: the transformations in [`crate::privacy`] take `&Graph` and
/// hand back a freshly built graph, never touching their input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "GraphDocument", into = "GraphDocument")]
pub struct Graph {
    nodes: BTreeMap<NodeId, Attributes>,
    edges: BTreeMap<Edge, Attributes>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edgeless graph with nodes `0..count`
    pub fn with_nodes(count: usize) -> Self {
        let mut graph = Graph::new();
        for id in 0..count as u64 {
            graph.add_node(NodeId(id));
        }
        graph
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.edges.contains_key(edge)
    }

    /// Insert a node. Returns false (and keeps its attributes) if it exists.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        if self.nodes.contains_key(&node) {
            return false;
        }
        self.nodes.insert(node, Attributes::new());
        true
    }

    /// Insert an edge, adding missing endpoints. Returns false if it exists.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        let (u, v) = edge.endpoints();
        self.add_node(u);
        self.add_node(v);
        if self.edges.contains_key(&edge) {
            return false;
        }
        self.edges.insert(edge, Attributes::new());
        true
    }

    /// Remove a node and every edge incident to it
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        if self.nodes.remove(&node).is_none() {
            return false;
        }
        self.edges.retain(|edge, _| !edge.touches(node));
        true
    }

    /// Remove a batch of nodes with one pass over the edge map.
    /// Absent nodes are skipped. Returns how many nodes were removed.
    pub fn remove_nodes_from<'a, I>(&mut self, nodes: I) -> usize
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        let mut removed = BTreeSet::new();
        for node in nodes {
            if self.nodes.remove(node).is_some() {
                removed.insert(*node);
            }
        }
        if !removed.is_empty() {
            self.edges.retain(|edge, _| {
                let (u, v) = edge.endpoints();
                !removed.contains(&u) && !removed.contains(&v)
            });
        }
        removed.len()
    }

    /// Remove an edge; no-op if it is already gone
    pub fn remove_edge(&mut self, edge: &Edge) -> bool {
        self.edges.remove(edge).is_some()
    }

    /// Node identifiers in ascending order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Edges in ascending order
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.keys().copied()
    }

    pub fn node_attributes(&self, node: NodeId) -> Option<&Attributes> {
        self.nodes.get(&node)
    }

    pub fn node_attributes_mut(&mut self, node: NodeId) -> Option<&mut Attributes> {
        self.nodes.get_mut(&node)
    }

    pub fn edge_attributes(&self, edge: &Edge) -> Option<&Attributes> {
        self.edges.get(edge)
    }

    pub fn edge_attributes_mut(&mut self, edge: &Edge) -> Option<&mut Attributes> {
        self.edges.get_mut(edge)
    }

    /// Number of incident edges; a self-loop counts twice
    pub fn degree(&self, node: NodeId) -> usize {
        self.edges
            .keys()
            .map(|edge| {
                let (u, v) = edge.endpoints();
                (u == node) as usize + (v == node) as usize
            })
            .sum()
    }

    /// Drop the `hidden` attribute from every node and edge
    pub fn clear_hidden_marks(&mut self) {
        for attrs in self.nodes.values_mut().chain(self.edges.values_mut()) {
            attrs.clear_hidden();
        }
    }

    /// Nodes whose `hidden` attribute is true
    pub fn hidden_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, attrs)| attrs.is_hidden())
            .map(|(node, _)| *node)
    }

    /// Edges whose `hidden` attribute is true
    pub fn hidden_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges
            .iter()
            .filter(|(_, attrs)| attrs.is_hidden())
            .map(|(edge, _)| *edge)
    }

    /// Same node set and edge set, attributes ignored
    pub fn same_structure(&self, other: &Graph) -> bool {
        self.nodes.keys().eq(other.nodes.keys()) && self.edges.keys().eq(other.edges.keys())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TopologyError::Serialization(format!("graph: {}", e)))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| TopologyError::Serialization(format!("graph document: {}", e)))
    }
}

// ============================================================================
// NODE-LINK DOCUMENT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeRecord {
    id: NodeId,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    attributes: Attributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EdgeRecord {
    source: NodeId,
    target: NodeId,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    attributes: Attributes,
}

/// Wire shape of a [`Graph`]: plain lists, since JSON map keys must be strings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GraphDocument {
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
}

impl From<Graph> for GraphDocument {
    fn from(graph: Graph) -> Self {
        GraphDocument {
            nodes: graph
                .nodes
                .into_iter()
                .map(|(id, attributes)| NodeRecord { id, attributes })
                .collect(),
            edges: graph
                .edges
                .into_iter()
                .map(|(edge, attributes)| {
                    let (source, target) = edge.endpoints();
                    EdgeRecord {
                        source,
                        target,
                        attributes,
                    }
                })
                .collect(),
        }
    }
}

impl From<GraphDocument> for Graph {
    fn from(doc: GraphDocument) -> Self {
        let mut graph = Graph::new();
        for record in doc.nodes {
            graph.nodes.insert(record.id, record.attributes);
        }
        for record in doc.edges {
            let edge = Edge::new(record.source, record.target);
            graph.add_edge(edge);
            graph.edges.insert(edge, record.attributes);
        }
        graph
    }
}
