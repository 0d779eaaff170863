//! History of found paths.
//!
//! Whoever runs the solver publishes its results here, and whoever draws
//! the graph reads the latest one back, e.g. to highlight the path edges.

use log::debug;
use serde::Serialize;

use crate::cost::{Cost, Mode};
use crate::graph::Graph;
use crate::result::PathResult;

/// A found path, with nodes referenced by id.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct PathRecord {
    pub mode: Mode,
    pub path: Vec<String>,
    pub cost: Cost,
}

impl PathRecord {
    /// Whether the two nodes are next to each other on the path, in either direction.
    pub fn links(&self, a: &str, b: &str) -> bool {
        self.path.windows(2).any(|w| (w[0] == a && w[1] == b) || (w[0] == b && w[1] == a))
    }
}

/// Found paths in publication order.
#[derive(Clone, Default, Debug)]
pub struct PathHistory {
    records: Vec<PathRecord>,
}

impl PathHistory {
    pub fn new() -> Self {
        PathHistory::default()
    }

    /// Record the result if it holds a path. Results without a path are not recorded.
    pub fn publish(&mut self, result: &PathResult, graph: &Graph) -> Option<&PathRecord> {
        if !result.is_found() {
            return None;
        }
        let record = PathRecord {
            mode: result.mode,
            path: result.path_ids(graph).into_iter().map(str::to_string).collect(),
            cost: result.cost,
        };
        debug!("publishing {} path {:?}", record.mode, record.path);
        self.records.push(record);
        self.records.last()
    }

    /// Most recently published path.
    pub fn last(&self) -> Option<&PathRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear()
    }
}
