// Simulation configuration
//
// Parameters for one create → conceal → mark → restore run.

use serde::{Deserialize, Serialize};

use crate::graph::max_edge_count;
use crate::{Result, TopologyError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of nodes in the generated topology
    pub num_nodes: usize,
    /// Number of edges in the generated topology
    pub num_edges: usize,
    /// Fraction of nodes and edges to hide (0.0 to 1.0)
    pub hide_ratio: f64,
    /// RNG seed; a fresh one is drawn when unset
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_nodes: 20,
            num_edges: 30,
            hide_ratio: 0.3,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Validate simulation configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.hide_ratio) {
            return Err(TopologyError::InvalidArgument(format!(
                "hide_ratio must be within [0, 1], got {}",
                self.hide_ratio
            )));
        }
        match max_edge_count(self.num_nodes) {
            Some(max) if self.num_edges <= max => Ok(()),
            Some(max) => Err(TopologyError::InvalidArgument(format!(
                "num_edges {} exceeds the {} possible pairs of {} nodes",
                self.num_edges, max, self.num_nodes
            ))),
            None => Err(TopologyError::InvalidArgument(format!(
                "num_nodes {} is too large",
                self.num_nodes
            ))),
        }
    }
}
