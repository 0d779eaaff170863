//! Errors.

use thiserror::Error;

/// Error building or editing a graph.
#[derive(Error, Clone, PartialEq, Debug)]
pub enum GraphError {
    #[error("Unknown node id [{0}]")]
    UnknownNode(String),

    #[error("Node id [{0}] is already in use")]
    DuplicateNode(String),

    #[error("Edge weight must be a finite number, got {0}")]
    InvalidWeight(f64),

    #[error("Negative edge weight {0} is not supported")]
    NegativeWeight(f64),
}

pub type Result<T> = std::result::Result<T, GraphError>;
