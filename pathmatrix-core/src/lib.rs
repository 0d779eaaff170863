//! Minimum and maximum cost paths in a directed weighted graph.
//!
//! The path always runs from the first node of the graph to its last one.
//! Costs are found by an all-pairs relaxation (Demoucron's scheme) which keeps
//! a snapshot of the cost matrix after every round, so the progress of the
//! algorithm can be shown step by step.

pub use self::cost::{Cost, Mode};
pub use self::errors::GraphError;
pub use self::graph::{Edge, Graph, Node, DEFAULT_WEIGHT};
pub use self::history::{PathHistory, PathRecord};
pub use self::matrix::{CostMatrix, Matrix, PredMatrix};
pub use self::pathsearch::{Demoucron, GraphSolver, Relaxation};
pub use self::result::PathResult;
pub use self::step::{Cell, Step};

mod cost;
mod errors;
mod graph;
mod history;
mod matrix;
mod result;
mod step;

pub mod pathsearch;
