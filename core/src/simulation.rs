// Simulation: End-to-end anonymous routing run
//
// create → conceal → mark → restore, with each stage handed to a renderer.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::graph::{create_random_topology, Edge, Graph, NodeId};
use crate::privacy::{apply_anonymous_routing, mark_anonymous_routes};
use crate::render::{RenderRequest, TopologyRenderer};
use crate::Result;

pub const ORIGINAL_TITLE: &str = "Original Topology";
pub const MARKED_TITLE: &str = "Topology with Marked Anonymous Routes";
pub const RESTORED_TITLE: &str = "Restored Topology";

pub fn anonymous_title(hide_ratio: f64) -> String {
    format!("Topology After Anonymous Routing (Hide Ratio: {})", hide_ratio)
}

/// Everything one run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Seed that reproduces this run
    pub seed: u64,
    pub hide_ratio: f64,
    pub original: Graph,
    pub anonymous: Graph,
    pub marked: Graph,
    pub restored: Graph,
    pub hidden_nodes: Vec<NodeId>,
    pub hidden_edges: Vec<Edge>,
    /// Edges removed only because an endpoint was hidden
    #[serde(default)]
    pub detached_edges: Vec<Edge>,
}

impl SimulationReport {
    /// Restored graph has the original node and edge sets
    pub fn restored_matches_original(&self) -> bool {
        self.restored.same_structure(&self.original)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A seeded, validated simulation run
pub struct Simulation {
    config: SimulationConfig,
    seed: u64,
    rng: StdRng,
}

impl Simulation {
    /// Validate the config and seed the RNG (drawing a seed if none is set)
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        Ok(Self {
            config,
            seed,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run every stage, rendering the original, anonymous, marked and
    /// restored topologies in that order
    pub fn run<T: TopologyRenderer + ?Sized>(&mut self, renderer: &mut T) -> Result<SimulationReport> {
        let ratio = self.config.hide_ratio;
        tracing::info!(
            seed = self.seed,
            nodes = self.config.num_nodes,
            edges = self.config.num_edges,
            hide_ratio = ratio,
            "Starting simulation"
        );

        let original =
            create_random_topology(self.config.num_nodes, self.config.num_edges, &mut self.rng)?;
        renderer.render(&RenderRequest::new(&original, ORIGINAL_TITLE))?;

        let concealment = apply_anonymous_routing(&original, ratio, &mut self.rng)?;
        renderer.render(&RenderRequest::new(&concealment.anonymous, anonymous_title(ratio)))?;

        let marked = mark_anonymous_routes(
            &original,
            &concealment.hidden_nodes,
            &concealment.hidden_edges,
        )?;
        renderer.render(
            &RenderRequest::new(&marked, MARKED_TITLE)
                .with_hidden(&concealment.hidden_nodes, &concealment.hidden_edges),
        )?;

        let restored = concealment.restore();
        renderer.render(&RenderRequest::new(&restored, RESTORED_TITLE))?;

        let report = SimulationReport {
            seed: self.seed,
            hide_ratio: ratio,
            original,
            anonymous: concealment.anonymous,
            marked,
            restored,
            hidden_nodes: concealment.hidden_nodes,
            hidden_edges: concealment.hidden_edges,
            detached_edges: concealment.detached_edges,
        };

        if !report.restored_matches_original() {
            tracing::warn!(seed = self.seed, "Restored topology differs from original");
        }
        tracing::info!("Simulation finished");
        Ok(report)
    }
}
