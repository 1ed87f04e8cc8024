// anonroute core: Topology concealment model
//
// Builds random network topologies, hides a fraction of their nodes and
// edges to simulate anonymous routing hops, marks what was hidden, and puts
// the hidden elements back.

pub mod config;
pub mod graph;
pub mod privacy;
pub mod render;
pub mod simulation;

use thiserror::Error;

pub use config::SimulationConfig;
pub use graph::{create_random_topology, max_edge_count, AttrValue, Attributes, Edge, Graph, NodeId};
pub use privacy::{
    apply_anonymous_routing, mark_anonymous_routes, restore_topology, ConcealmentResult,
};
pub use render::{Color, DotRenderer, RenderRequest, TopologyRenderer};
pub use simulation::{Simulation, SimulationReport};

// ============================================================================
// ERROR TYPES
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),
    #[error("Edge {0} not found")]
    EdgeNotFound(Edge),
    #[error("Render failed: {0}")]
    Render(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TopologyError {
    /// True for either missing-element variant
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NodeNotFound(_) | Self::EdgeNotFound(_))
    }
}

impl From<std::io::Error> for TopologyError {
    fn from(err: std::io::Error) -> Self {
        TopologyError::Render(err.to_string())
    }
}

impl From<serde_json::Error> for TopologyError {
    fn from(err: serde_json::Error) -> Self {
        TopologyError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TopologyError>;
