//! Path solver trait.

use crate::cost::Mode;
use crate::graph::Graph;
use crate::result::PathResult;

/// Path finding functions.
pub trait GraphSolver {
    /// Find the best path from the first node of `graph` to its last node.
    fn solve(&self, graph: &Graph, mode: Mode) -> PathResult;

    /// Find the minimum-cost path from the first node to the last one.
    fn shortest_path(&self, graph: &Graph) -> PathResult {
        self.solve(graph, Mode::Minimize)
    }

    /// Find the maximum-cost path from the first node to the last one.
    fn longest_path(&self, graph: &Graph) -> PathResult {
        self.solve(graph, Mode::Maximize)
    }
}
