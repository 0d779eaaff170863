//! Edges given on the command line, e.g. `X1->X2=5`, `1->3:2.5` or `node-1->node-4`.

use std::str::FromStr;

use regex::Regex;
use thiserror::Error;

use pathmatrix_core::{Graph, GraphError, DEFAULT_WEIGHT};

#[derive(Error, Clone, PartialEq, Debug)]
pub enum EdgeSpecError {
    #[error("Malformed edge [{0}], expected FROM->TO, FROM->TO=WEIGHT or FROM->TO:WEIGHT")]
    Malformed(String),

    #[error("Bad weight [{0}] in edge [{1}]")]
    BadWeight(String, String),

    #[error("Edge refers to unknown node [{0}]")]
    UnknownNode(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Parsed edge, with both ends still unresolved.
#[derive(Clone, PartialEq, Debug)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

impl FromStr for EdgeSpec {
    type Err = EdgeSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref RE: Regex = Regex::new(
                r"^\s*(\S+?)\s*->\s*(\S+?)\s*(?:[=:]\s*(\S+))?\s*$"
            ).expect("invalid regexp");
        }

        let caps = RE.captures(s).ok_or_else(|| EdgeSpecError::Malformed(s.to_string()))?;
        let from = caps[1].to_string();
        let to = caps[2].to_string();
        let weight = match caps.get(3) {
            Some(w) => w.as_str().parse().map_err(|_| EdgeSpecError::BadWeight(w.as_str().to_string(), s.to_string()))?,
            None => DEFAULT_WEIGHT,
        };

        Ok(EdgeSpec { from, to, weight })
    }
}

impl EdgeSpec {
    /// Add this edge to the graph.
    pub fn apply(&self, graph: &mut Graph) -> Result<(), EdgeSpecError> {
        let from = resolve_node(graph, &self.from)?;
        let to = resolve_node(graph, &self.to)?;
        graph.add_edge(&from, &to, self.weight)?;
        Ok(())
    }
}

/// Find the id of a node referenced by id, by label, or by its 1-based position.
fn resolve_node(graph: &Graph, reference: &str) -> Result<String, EdgeSpecError> {
    let by_id = graph.node(reference);
    let by_label = || graph.nodes().iter().find(|n| n.label == reference);
    let by_position = || {
        reference
            .parse::<usize>()
            .ok()
            .and_then(|pos| pos.checked_sub(1))
            .and_then(|i| graph.nodes().get(i))
    };

    by_id
        .or_else(by_label)
        .or_else(by_position)
        .map(|n| n.id.clone())
        .ok_or_else(|| EdgeSpecError::UnknownNode(reference.to_string()))
}

#[cfg(test)]
mod tests {
    use pathmatrix_core::{Graph, GraphError};

    use super::{EdgeSpec, EdgeSpecError};

    fn e(from: &str, to: &str, weight: f64) -> EdgeSpec {
        EdgeSpec { from: from.to_string(), to: to.to_string(), weight }
    }

    #[test]
    fn test_parse() -> Result<(), EdgeSpecError> {
        assert_eq!("X1->X2=5".parse::<EdgeSpec>()?, e("X1", "X2", 5.0));
        assert_eq!("1->3:2.5".parse::<EdgeSpec>()?, e("1", "3", 2.5));
        assert_eq!(" X1 -> X2 ".parse::<EdgeSpec>()?, e("X1", "X2", 1.0));
        assert_eq!("node-1->node-4".parse::<EdgeSpec>()?, e("node-1", "node-4", 1.0));
        assert_eq!("node-1->node-4 = 7".parse::<EdgeSpec>()?, e("node-1", "node-4", 7.0));
        Ok(())
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("X1X2".parse::<EdgeSpec>(), Err(EdgeSpecError::Malformed("X1X2".to_string())));
        assert_eq!("->X2".parse::<EdgeSpec>(), Err(EdgeSpecError::Malformed("->X2".to_string())));
        assert_eq!("X1->X2=abc".parse::<EdgeSpec>(), Err(EdgeSpecError::BadWeight("abc".to_string(), "X1->X2=abc".to_string())));
    }

    #[test]
    fn test_apply() -> Result<(), EdgeSpecError> {
        let mut g = Graph::with_nodes(4);
        e("X1", "X2", 2.0).apply(&mut g)?;
        e("2", "4", 3.0).apply(&mut g)?;
        e("node-1", "node-3", 1.0).apply(&mut g)?;
        assert_eq!(g.weight("node-1", "node-2"), Some(2.0));
        assert_eq!(g.weight("node-2", "node-4"), Some(3.0));
        assert_eq!(g.weight("node-1", "node-3"), Some(1.0));

        assert_eq!(e("X1", "X9", 1.0).apply(&mut g), Err(EdgeSpecError::UnknownNode("X9".to_string())));
        assert_eq!(e("0", "X2", 1.0).apply(&mut g), Err(EdgeSpecError::UnknownNode("0".to_string())));
        assert_eq!(e("X1", "X2", -1.0).apply(&mut g), Err(EdgeSpecError::Graph(GraphError::NegativeWeight(-1.0))));
        Ok(())
    }
}
