//! Square matrices indexed by node ordinal.

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use log::{debug, trace};

use crate::cost::Cost;
use crate::graph::Graph;

/// Dense `n x n` matrix, stored row by row, indexed by `(row, column)`.
///
/// # Panics
///
/// Indexing panics if either coordinate is not below the matrix size.
#[derive(Clone, PartialEq, Debug)]
pub struct Matrix<T> {
    size: usize,
    cells: Vec<T>,
}

/// Best known path cost for every ordered node pair.
pub type CostMatrix = Matrix<Cost>;

/// Ordinal of the node right before `j` on the best known path from `i` to `j`.
pub type PredMatrix = Matrix<Option<usize>>;

impl<T: Clone> Matrix<T> {
    /// Matrix of the given size with every cell set to `value`.
    pub fn filled(size: usize, value: T) -> Self {
        Matrix {
            size,
            cells: vec![value; size * size],
        }
    }
}

impl<T> Matrix<T> {
    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // `chunks(0)` panics, while an empty matrix has no cells to chunk anyway
        self.cells.chunks(self.size.max(1))
    }

    /// Build a new matrix of the same size, computing each cell from its coordinates and value.
    pub fn map<U, F: Fn(usize, usize, &T) -> U>(&self, f: F) -> Matrix<U> {
        let size = self.size;
        let cells = self.cells.iter().enumerate().map(|(idx, v)| f(idx / size, idx % size, v)).collect();
        Matrix { size, cells }
    }

    fn offset(&self, (i, j): (usize, usize)) -> usize {
        assert!(i < self.size && j < self.size, "matrix index ({}, {}) out of range for size {}", i, j, self.size);
        i * self.size + j
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, idx: (usize, usize)) -> &T {
        &self.cells[self.offset(idx)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut T {
        let offset = self.offset(idx);
        &mut self.cells[offset]
    }
}

impl CostMatrix {
    /// Initial cost matrix of a graph: direct edge weights, `Unreachable` elsewhere.
    ///
    /// The diagonal is always `Unreachable`, never zero, so a path can not
    /// return to its own start through a trivial loop. Edges referencing
    /// unknown node ids are skipped.
    pub fn from_graph(graph: &Graph) -> Self {
        let n = graph.len();
        let ordinals = graph.nodes().iter().enumerate().map(|(i, node)| (node.id.as_str(), i)).collect::<HashMap<_, _>>();

        let mut m = Matrix::filled(n, Cost::Unreachable);
        for edge in graph.edges() {
            match (ordinals.get(edge.source.as_str()), ordinals.get(edge.target.as_str())) {
                (Some(&i), Some(&j)) if i != j => m[(i, j)] = Cost::Finite(edge.weight),
                (Some(_), Some(_)) => trace!("self-loop on {} left out of the matrix", edge.source),
                _ => trace!("edge {} -> {} skipped: unknown node", edge.source, edge.target),
            }
        }

        debug!("built {}x{} cost matrix from {} edges", n, n, graph.edges().len());
        m
    }
}

impl PredMatrix {
    /// Initial predecessors: `i` for every direct edge `i -> j`, nothing elsewhere.
    pub fn from_costs(costs: &CostMatrix) -> Self {
        costs.map(|i, j, c| if i != j && c.is_finite() { Some(i) } else { None })
    }
}

#[cfg(test)]
mod tests {
    use crate::cost::Cost;
    use crate::graph::Graph;

    use super::{CostMatrix, Matrix, PredMatrix};

    fn chain() -> Graph {
        let mut g = Graph::with_nodes(3);
        g.add_edge("node-1", "node-2", 2.0).expect("edge");
        g.add_edge("node-2", "node-3", 3.0).expect("edge");
        g
    }

    #[test]
    fn test_filled_and_index() {
        let mut m = Matrix::filled(2, 0);
        m[(1, 0)] = 5;
        assert_eq!(m[(1, 0)], 5);
        assert_eq!(m[(0, 1)], 0);
        assert_eq!(m.rows().collect::<Vec<_>>(), vec![&[0, 0][..], &[5, 0][..]]);
    }

    #[test]
    fn test_empty() {
        let m = Matrix::filled(0, Cost::Unreachable);
        assert!(m.is_empty());
        assert_eq!(m.rows().count(), 0);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range() {
        let m = Matrix::filled(2, 0);
        let _ = m[(2, 0)];
    }

    #[test]
    fn test_from_graph() {
        let m = CostMatrix::from_graph(&chain());
        let u = Cost::Unreachable;
        let f = Cost::Finite;
        assert_eq!(m.rows().map(<[Cost]>::to_vec).collect::<Vec<_>>(), vec![
            vec![u, f(2.0), u],
            vec![u, u, f(3.0)],
            vec![u, u, u],
        ]);
    }

    #[test]
    fn test_from_graph_skips_self_loops_and_dangling_edges() {
        let g: Graph = serde_json::from_str(r#"{
            "nodes": [{"id": "a"}, {"id": "b"}],
            "edges": [{"source": "a", "target": "a", "weight": 1}, {"source": "a", "target": "q", "weight": 1}]
        }"#).expect("bad test data");
        let m = CostMatrix::from_graph(&g);
        assert!(m.rows().flatten().all(|c| *c == Cost::Unreachable));
    }

    #[test]
    fn test_initial_predecessors() {
        let p = PredMatrix::from_costs(&CostMatrix::from_graph(&chain()));
        assert_eq!(p[(0, 1)], Some(0));
        assert_eq!(p[(1, 2)], Some(1));
        assert_eq!(p[(0, 2)], None);
        assert_eq!(p[(0, 0)], None);
    }
}
