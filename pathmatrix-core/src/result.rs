//! Path search result.

use serde::{Deserialize, Serialize};

use crate::cost::{Cost, Mode};
use crate::graph::Graph;
use crate::step::Step;

/// Outcome of a path search from the first to the last node.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PathResult {
    pub mode: Mode,

    /// Final matrix cost from the first node to the last one, `Unreachable` if there is no path.
    pub cost: Cost,

    /// Node ordinals from the first node to the last one. Empty if there is no path,
    /// or if the cost is finite but the path could not be rebuilt.
    pub path: Vec<usize>,

    /// Matrix after every round, the initial one first.
    pub steps: Vec<Step>,
}

impl PathResult {
    pub(crate) fn not_found(mode: Mode, cost: Cost, steps: Vec<Step>) -> Self {
        PathResult {
            mode,
            cost,
            path: Vec::new(),
            steps,
        }
    }

    /// Whether the path itself is known.
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Whether the last node is reachable from the first one at all.
    /// Can be true without a path, see `Demoucron`.
    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }

    /// Cost formatted for display: `5`, `+∞` or `-∞`.
    pub fn display_cost(&self) -> String {
        self.mode.format(self.cost)
    }

    /// Labels of the nodes along the path.
    pub fn path_labels<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
        self.path.iter().filter_map(|&i| graph.nodes().get(i)).map(|n| n.label.as_str()).collect()
    }

    /// Ids of the nodes along the path.
    pub fn path_ids<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
        self.path.iter().filter_map(|&i| graph.nodes().get(i)).map(|n| n.id.as_str()).collect()
    }

    /// Human-readable path, e.g. `X1 → X2 → X4`.
    pub fn describe_path(&self, graph: &Graph) -> String {
        self.path_labels(graph).join(" → ")
    }

    pub fn initial_step(&self) -> Option<&Step> {
        self.steps.first()
    }

    pub fn final_step(&self) -> Option<&Step> {
        self.steps.last()
    }
}
