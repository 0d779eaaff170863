//! Relaxation state: cost and predecessor matrices, advanced round by round.

use std::ops::Range;

use log::{trace, warn};

use crate::cost::{Cost, Mode};
use crate::matrix::{CostMatrix, PredMatrix};

/// Cost and predecessor matrices during the relaxation.
///
/// Invariant: `predecessors[(i, j)]` is set iff `costs[(i, j)]` is finite.
#[derive(Clone, PartialEq, Debug)]
pub struct Relaxation {
    mode: Mode,
    costs: CostMatrix,
    preds: PredMatrix,
}

impl Relaxation {
    /// Start from the initial cost matrix, with predecessors set for direct edges.
    pub fn new(costs: CostMatrix, mode: Mode) -> Self {
        let preds = PredMatrix::from_costs(&costs);
        Relaxation { mode, costs, preds }
    }

    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }

    pub fn predecessors(&self) -> &PredMatrix {
        &self.preds
    }

    /// Ordinals to route through: everything except the first and the last node.
    pub fn intermediates(&self) -> Range<usize> {
        1..self.costs.size().saturating_sub(1)
    }

    /// Run one round through intermediate node `k`.
    ///
    /// All candidates are computed from the matrices as they were before the round.
    /// A candidate replaces the current cost only if strictly better, so on ties
    /// the path found first is kept. Returns the number of improved cells.
    pub fn round(&mut self, k: usize) -> usize {
        let n = self.costs.size();
        let mut next_costs = self.costs.clone();
        let mut next_preds = self.preds.clone();
        let mut improved = 0;

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let candidate = self.costs[(i, k)] + self.costs[(k, j)];
                if self.mode.improves(candidate, self.costs[(i, j)]) {
                    debug_assert!(self.preds[(k, j)].is_some(), "invariant broken");
                    trace!("round {}: ({}, {}) {:?} -> {:?}", k, i, j, self.costs[(i, j)], candidate);
                    next_costs[(i, j)] = candidate;
                    next_preds[(i, j)] = self.preds[(k, j)];
                    improved += 1;
                }
            }
        }

        self.costs = next_costs;
        self.preds = next_preds;
        improved
    }

    /// Best known cost from the first node to the last one.
    pub fn end_to_end_cost(&self) -> Cost {
        match self.costs.size() {
            0 => Cost::Unreachable,
            n => self.costs[(0, n - 1)],
        }
    }

    /// Walk the predecessors back from the last node to the first one.
    ///
    /// Returns node ordinals in path order, or `None` if the last node can not
    /// be reached. A graph of one node has no path: the start can not be its own end.
    /// A chain looping back on itself before reaching the first node also gives `None`,
    /// even though `end_to_end_cost` is finite then.
    pub fn reconstruct(&self) -> Option<Vec<usize>> {
        let n = self.costs.size();
        if n < 2 {
            return None;
        }

        let mut path = vec![n - 1];
        let mut current = n - 1;
        while current != 0 {
            current = self.preds[(0, current)]?;
            path.push(current);
            // A path visiting more than `n` nodes means the predecessor chain loops
            if path.len() > n {
                warn!("predecessor chain from {} loops, no path reported", n - 1);
                return None;
            }
        }

        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use crate::cost::{Cost, Mode};
    use crate::matrix::Matrix;

    use super::Relaxation;

    fn matrix(n: usize, edges: &[(usize, usize, f64)]) -> Matrix<Cost> {
        let mut m = Matrix::filled(n, Cost::Unreachable);
        for &(i, j, w) in edges {
            m[(i, j)] = Cost::Finite(w);
        }
        m
    }

    #[test]
    fn test_intermediates() {
        let r = |n| Relaxation::new(matrix(n, &[]), Mode::Minimize).intermediates();
        assert_eq!(r(0), 1..0);
        assert_eq!(r(1), 1..0);
        assert_eq!(r(2), 1..1);
        assert_eq!(r(5), 1..4);
        assert_eq!(r(0).count(), 0);
        assert_eq!(r(1).count(), 0);
    }

    #[test]
    fn test_round_splices_predecessor() {
        let mut r = Relaxation::new(matrix(3, &[(0, 1, 2.0), (1, 2, 3.0)]), Mode::Minimize);
        assert_eq!(r.round(1), 1);
        assert_eq!(r.costs()[(0, 2)], Cost::Finite(5.0));
        assert_eq!(r.predecessors()[(0, 2)], Some(1));
        assert_eq!(r.reconstruct(), Some(vec![0, 1, 2]));
    }

    #[test]
    fn test_rounds_compose() {
        // 0 -> 1 -> 2 -> 3: the full path needs both rounds
        let mut r = Relaxation::new(matrix(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)]), Mode::Minimize);
        r.round(1);
        assert_eq!(r.costs()[(0, 2)], Cost::Finite(2.0));
        assert_eq!(r.costs()[(0, 3)], Cost::Unreachable);
        r.round(2);
        assert_eq!(r.costs()[(0, 3)], Cost::Finite(3.0));
        assert_eq!(r.reconstruct(), Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn test_round_keeps_ties() {
        // Direct 0 -> 2 costs as much as 0 -> 1 -> 2
        let mut r = Relaxation::new(matrix(3, &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 2.0)]), Mode::Minimize);
        assert_eq!(r.round(1), 0);
        assert_eq!(r.predecessors()[(0, 2)], Some(0));
        assert_eq!(r.reconstruct(), Some(vec![0, 2]));
    }

    #[test]
    fn test_round_maximize() {
        let mut r = Relaxation::new(matrix(3, &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 1.5)]), Mode::Maximize);
        assert_eq!(r.round(1), 1);
        assert_eq!(r.end_to_end_cost(), Cost::Finite(2.0));
        assert_eq!(r.reconstruct(), Some(vec![0, 1, 2]));
    }

    #[test]
    fn test_reconstruct_without_path() {
        assert_eq!(Relaxation::new(matrix(0, &[]), Mode::Minimize).reconstruct(), None);
        assert_eq!(Relaxation::new(matrix(1, &[]), Mode::Minimize).reconstruct(), None);
        assert_eq!(Relaxation::new(matrix(2, &[(1, 0, 1.0)]), Mode::Minimize).reconstruct(), None);
        assert_eq!(Relaxation::new(matrix(0, &[]), Mode::Maximize).end_to_end_cost(), Cost::Unreachable);
    }

    #[test]
    fn test_reconstruct_looping_chain() {
        // 1 <-> 2 is a positive cycle on the way from 0 to 3
        let mut r = Relaxation::new(matrix(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 1, 1.0), (2, 3, 1.0)]), Mode::Maximize);
        for k in r.intermediates() {
            r.round(k);
        }
        // The walk goes 3 -> 2 -> 1 -> 2 -> ...
        assert_eq!(r.predecessors()[(0, 3)], Some(2));
        assert_eq!(r.predecessors()[(0, 2)], Some(1));
        assert_eq!(r.predecessors()[(0, 1)], Some(2));
        assert_eq!(r.end_to_end_cost(), Cost::Finite(3.0));
        assert_eq!(r.reconstruct(), None);
    }
}
