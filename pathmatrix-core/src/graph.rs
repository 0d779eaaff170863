//! Directed weighted graph.
//!
//! Node order matters: a node's position in the node list is its ordinal,
//! which is its row and column in every cost matrix. The first node is the
//! path origin and the last node is the destination.

use std::convert::TryFrom;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::{GraphError, Result};

/// Weight used when an edge is declared without one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Graph node.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Node {
    /// Unique, stable identifier.
    pub id: String,

    /// Display label, `X1`, `X2`, ... unless given explicitly.
    pub label: String,
}

/// Directed weighted edge between two nodes, referenced by id.
#[derive(Clone, PartialEq, Debug)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// Directed weighted graph with at most one edge per ordered node pair.
#[derive(Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "GraphDoc", into = "GraphDoc")]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

fn default_label(ordinal: usize) -> String {
    format!("X{}", ordinal + 1)
}

fn default_id(seq: usize) -> String {
    format!("node-{}", seq)
}

fn check_weight(weight: f64) -> Result<()> {
    if !weight.is_finite() {
        Err(GraphError::InvalidWeight(weight))
    } else if weight < 0.0 {
        Err(GraphError::NegativeWeight(weight))
    } else {
        Ok(())
    }
}

impl Graph {
    /// Empty graph.
    pub fn new() -> Self {
        Graph::default()
    }

    /// Graph with `count` unconnected nodes `node-1` .. `node-{count}`, labelled `X1` .. `X{count}`.
    pub fn with_nodes(count: usize) -> Self {
        let nodes = (0..count)
            .map(|i| Node { id: default_id(i + 1), label: default_label(i) })
            .collect();
        Graph { nodes, edges: Vec::new() }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Position of the node in the node list.
    pub fn ordinal_of(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    /// Weight of the edge `source -> target`, if any.
    pub fn weight(&self, source: &str, target: &str) -> Option<f64> {
        self.edges.iter().find(|e| e.source == source && e.target == target).map(|e| e.weight)
    }

    /// Append a node with a fresh id and a fresh default label, starting from
    /// the ones for its position and counting up past any still in use.
    /// Returns the new node id.
    pub fn add_node(&mut self) -> String {
        let mut seq = self.nodes.len() + 1;
        while self.node(&default_id(seq)).is_some() {
            seq += 1;
        }
        let mut ordinal = self.nodes.len();
        while self.nodes.iter().any(|n| n.label == default_label(ordinal)) {
            ordinal += 1;
        }
        let id = default_id(seq);
        self.nodes.push(Node { id: id.clone(), label: default_label(ordinal) });
        id
    }

    /// Append a node with the given id and label.
    pub fn add_named_node(&mut self, id: &str, label: &str) -> Result<()> {
        if self.node(id).is_some() {
            return Err(GraphError::DuplicateNode(id.to_string()));
        }
        self.nodes.push(Node { id: id.to_string(), label: label.to_string() });
        Ok(())
    }

    /// Remove a node along with every edge going into or out of it.
    /// Nodes after it move one ordinal down.
    pub fn remove_node(&mut self, id: &str) -> Result<Node> {
        let pos = self.ordinal_of(id).ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
        let node = self.nodes.remove(pos);
        self.edges.retain(|e| e.source != id && e.target != id);
        Ok(node)
    }

    /// Add the edge `source -> target`. An existing edge between the same
    /// ordered pair gets its weight overwritten.
    pub fn add_edge(&mut self, source: &str, target: &str, weight: f64) -> Result<()> {
        for id in &[source, target] {
            if self.node(id).is_none() {
                return Err(GraphError::UnknownNode(id.to_string()));
            }
        }
        check_weight(weight)?;
        self.put_edge(Edge { source: source.to_string(), target: target.to_string(), weight });
        Ok(())
    }

    /// Remove the edge `source -> target`. Returns `false` if there was none.
    pub fn remove_edge(&mut self, source: &str, target: &str) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| !(e.source == source && e.target == target));
        self.edges.len() != before
    }

    fn put_edge(&mut self, edge: Edge) {
        if let Some(existing) = self.edges.iter_mut().find(|e| e.source == edge.source && e.target == edge.target) {
            debug!("overwriting edge {} -> {}: {} replaced by {}", edge.source, edge.target, existing.weight, edge.weight);
            existing.weight = edge.weight;
        } else {
            self.edges.push(edge);
        }
    }
}

// Wire form of the graph, as read from and written to JSON documents.

#[derive(Serialize, Deserialize)]
struct GraphDoc {
    #[serde(default)]
    nodes: Vec<NodeDoc>,
    #[serde(default)]
    edges: Vec<EdgeDoc>,
}

#[derive(Serialize, Deserialize)]
struct NodeDoc {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct EdgeDoc {
    source: String,
    target: String,
    #[serde(default = "default_weight")]
    weight: f64,
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

impl TryFrom<GraphDoc> for Graph {
    type Error = GraphError;

    fn try_from(doc: GraphDoc) -> Result<Self> {
        let mut graph = Graph::new();
        for (i, node) in doc.nodes.into_iter().enumerate() {
            let label = node.label.unwrap_or_else(|| default_label(i));
            graph.add_named_node(&node.id, &label)?;
        }
        for edge in doc.edges {
            check_weight(edge.weight)?;
            if graph.node(&edge.source).is_none() || graph.node(&edge.target).is_none() {
                warn!("edge {} -> {} references an unknown node and will be ignored", edge.source, edge.target);
            }
            graph.put_edge(Edge { source: edge.source, target: edge.target, weight: edge.weight });
        }
        Ok(graph)
    }
}

impl From<Graph> for GraphDoc {
    fn from(graph: Graph) -> Self {
        GraphDoc {
            nodes: graph.nodes.into_iter().map(|n| NodeDoc { id: n.id, label: Some(n.label) }).collect(),
            edges: graph.edges.into_iter().map(|e| EdgeDoc { source: e.source, target: e.target, weight: e.weight }).collect(),
        }
    }
}
