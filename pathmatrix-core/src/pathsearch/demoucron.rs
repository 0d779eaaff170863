//! Demoucron path search implementation.

use log::debug;

use crate::cost::{Cost, Mode};
use crate::graph::Graph;
use crate::matrix::CostMatrix;
use crate::result::PathResult;
use crate::step::Step;

use super::relaxation::Relaxation;
use super::solver::GraphSolver;

/// Demoucron path search: all-pairs relaxation through every intermediate node,
/// then path reconstruction from the first node to the last one.
///
/// Results are undefined for graphs with negative cycles; `Graph` rejects
/// negative weights when edges are added.
///
/// The result cost is always the final matrix cell from the first node to the
/// last one. When that cost is finite but the predecessors loop (maximizing
/// over a graph with cycles), the result has the cost and an empty path.
#[derive(Clone, Debug)]
pub struct Demoucron {
    /// Whether to keep a snapshot of the matrix after every round.
    record_steps: bool,
}

impl Demoucron {
    /// Create new solver which records every step.
    pub fn new() -> Self {
        Demoucron { record_steps: true }
    }

    /// Solver which only keeps the final result, without step snapshots.
    pub fn without_steps() -> Self {
        Demoucron { record_steps: false }
    }

    /// Run every relaxation round on the initial matrix, handing each resulting
    /// state to `on_round` together with the round index (0 being the initial state).
    pub fn relax<F: FnMut(usize, &Relaxation)>(&self, initial: CostMatrix, mode: Mode, mut on_round: F) -> Relaxation {
        let mut relaxation = Relaxation::new(initial, mode);
        on_round(0, &relaxation);
        for k in relaxation.intermediates() {
            let improved = relaxation.round(k);
            debug!("{} round {}: {} cells improved", mode, k, improved);
            on_round(k, &relaxation);
        }
        relaxation
    }
}

impl Default for Demoucron {
    fn default() -> Self {
        Demoucron::new()
    }
}

impl GraphSolver for Demoucron {
    fn solve(&self, graph: &Graph, mode: Mode) -> PathResult {
        // Don't run when we don't have nodes set
        if graph.is_empty() {
            return PathResult::not_found(mode, Cost::Unreachable, Vec::new());
        }

        let mut steps = Vec::new();
        let relaxation = self.relax(CostMatrix::from_graph(graph), mode, |round, r| {
            if self.record_steps {
                steps.push(Step::snapshot(round, r.costs(), mode));
            }
        });

        let cost = relaxation.end_to_end_cost();
        match relaxation.reconstruct() {
            Some(path) => {
                debug!("{} path {:?} with cost {:?}", mode, path, cost);
                PathResult { mode, cost, path, steps }
            }
            None => {
                debug!("{}: no path from first to last node, cost {:?}", mode, cost);
                PathResult::not_found(mode, cost, steps)
            }
        }
    }
}
