//! Step snapshots of the cost matrix, for showing the algorithm progress.

use serde::{Deserialize, Serialize};

use crate::cost::{Cost, Mode};
use crate::matrix::CostMatrix;

/// One matrix cell as displayed.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Formatted value: a number, `+∞` or `-∞`.
    pub value: String,

    /// The cost the value was formatted from.
    pub original_value: Cost,
}

/// Immutable copy of the cost matrix taken after a relaxation round.
/// Round 0 is the initial matrix.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Step {
    pub round: usize,
    pub matrix: Vec<Vec<Cell>>,
}

impl Step {
    pub fn snapshot(round: usize, costs: &CostMatrix, mode: Mode) -> Self {
        let matrix = costs
            .rows()
            .map(|row| {
                row.iter()
                    .map(|&cost| Cell { value: mode.format(cost), original_value: cost })
                    .collect()
            })
            .collect();
        Step { round, matrix }
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.matrix.len()
    }

    /// Cost of the path from `i` to `j` after this round.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is not below `size()`.
    pub fn cost(&self, i: usize, j: usize) -> Cost {
        self.matrix[i][j].original_value
    }

    /// Cells whose cost differs from the same cell of `reference`.
    /// Cells missing from `reference` are not reported.
    pub fn changed_cells(&self, reference: &Step) -> Vec<(usize, usize)> {
        let mut changed = Vec::new();
        for (i, row) in self.matrix.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                let ref_cell = reference.matrix.get(i).and_then(|r| r.get(j));
                if matches!(ref_cell, Some(r) if r.original_value != cell.original_value) {
                    changed.push((i, j));
                }
            }
        }
        changed
    }
}
