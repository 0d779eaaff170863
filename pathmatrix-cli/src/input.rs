//! Graph input: a JSON document from a file or stdin, or generated nodes, plus command line edges.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Error};
use log::{debug, info};

use pathmatrix_core::Graph;

use crate::edgespec::EdgeSpec;

/// Where the graph comes from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GraphSource<'a> {
    /// `N` nodes `X1`..`XN` with no edges.
    Generated(usize),

    /// JSON document in a file.
    File(&'a Path),

    /// JSON document on stdin.
    Stdin,
}

impl<'a> GraphSource<'a> {
    pub fn new(path: Option<&'a Path>, nodes: Option<usize>) -> Self {
        match (nodes, path) {
            (Some(n), _) => GraphSource::Generated(n),
            (None, Some(p)) if p != Path::new("-") => GraphSource::File(p),
            (None, _) => GraphSource::Stdin,
        }
    }
}

/// Build the graph from its source, then add the command line edges in order.
pub fn load_graph(source: &GraphSource, edges: &[String]) -> Result<Graph, Error> {
    let mut graph = match *source {
        GraphSource::Generated(n) => Graph::with_nodes(n),
        GraphSource::File(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open graph file [{}]", path.display()))?;
            parse_graph(BufReader::new(file)).with_context(|| format!("Bad graph file [{}]", path.display()))?
        }
        GraphSource::Stdin => parse_graph(io::stdin().lock()).context("Bad graph on stdin")?,
    };

    for spec in edges {
        let edge = spec.parse::<EdgeSpec>()?;
        edge.apply(&mut graph)?;
        debug!("added edge {:?}", edge);
    }

    info!("Loaded graph with {} nodes and {} edges", graph.len(), graph.edges().len());
    Ok(graph)
}

fn parse_graph<R: Read>(reader: R) -> Result<Graph, Error> {
    Ok(serde_json::from_reader(reader)?)
}
