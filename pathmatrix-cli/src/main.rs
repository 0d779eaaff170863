//! pathmatrix: minimum and maximum cost paths, with every step of the cost matrix.

#[macro_use]
extern crate lazy_static;

use std::path::PathBuf;

use anyhow::Error;
use clap::Parser;
use log::debug;

use pathmatrix_core::{Demoucron, GraphSolver, PathHistory};

use crate::config::{Format, ModeSel, Opts};
use crate::input::GraphSource;

mod config;
mod edgespec;
mod input;
mod render;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let args = Args::parse();
    let settings = Opts::load(args.config.as_deref())?.into_settings(args.mode, args.format, args.steps);
    debug!("{:?}", settings);

    let source = GraphSource::new(args.graph.as_deref(), args.nodes);
    let graph = input::load_graph(&source, &args.edges)?;

    let solver = Demoucron::new();
    let mut history = PathHistory::new();
    let results = settings
        .mode
        .modes()
        .iter()
        .map(|&mode| {
            let result = solver.solve(&graph, mode);
            history.publish(&result, &graph);
            result
        })
        .collect::<Vec<_>>();

    match settings.format {
        Format::Json => println!("{}", render::render_json(&results, &graph, history.last())?),
        Format::Text => {
            let text = results
                .iter()
                .map(|result| render::render_text(result, &graph, settings.show_steps))
                .collect::<Vec<_>>()
                .join("\n");
            print!("{}", text);
            if results.len() > 1 {
                if let Some(last) = history.last() {
                    let labels = last.path.iter().filter_map(|id| graph.node(id)).map(|n| n.label.as_str()).collect::<Vec<_>>();
                    println!("\nLast path: {}", labels.join(" → "));
                }
            }
        }
    }

    Ok(())
}

/// Minimum and maximum cost paths from the first to the last node of a weighted digraph.
#[derive(Parser)]
#[command(version, author = "The pathmatrix developers", about)]
struct Args {
    /// JSON graph file, `-` for stdin (the default unless `--nodes` is given)
    #[arg(value_name = "GRAPH")]
    graph: Option<PathBuf>,

    /// Start from N unconnected nodes X1..XN instead of a graph file
    #[arg(short = 'n', long = "nodes", value_name = "N", conflicts_with = "graph")]
    nodes: Option<usize>,

    /// Add an edge: FROM->TO, FROM->TO=WEIGHT or FROM->TO:WEIGHT. Nodes are given by label, position or id
    #[arg(short = 'e', long = "edge", value_name = "SPEC")]
    edges: Vec<String>,

    /// Which path to look for (default `min`)
    #[arg(short = 'm', long = "mode", value_enum)]
    mode: Option<ModeSel>,

    /// Print the cost matrix after every round, changed cells marked with `*`
    #[arg(short = 's', long = "steps")]
    steps: bool,

    /// Output format (default `text`)
    #[arg(short = 'f', long = "format", value_enum)]
    format: Option<Format>,

    /// Config file path (default `~/.pathmatrix`)
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,
}

#[test]
fn test_args() {
    let args = Args::try_parse_from(&["pathmatrix", "-n", "3", "-e", "X1->X2=2", "-e", "X2->X3", "-m", "both", "-s"]).expect("bad test args");
    assert_eq!(args.nodes, Some(3));
    assert_eq!(args.edges, vec!["X1->X2=2", "X2->X3"]);
    assert_eq!(args.mode, Some(ModeSel::Both));
    assert!(args.steps);
    assert!(args.graph.is_none());

    let args = Args::try_parse_from(&["pathmatrix", "graph.json", "--format", "json"]).expect("bad test args");
    assert_eq!(args.graph, Some(PathBuf::from("graph.json")));
    assert_eq!(args.format, Some(Format::Json));

    assert!(Args::try_parse_from(&["pathmatrix", "graph.json", "-n", "3"]).is_err());
    assert!(Args::try_parse_from(&["pathmatrix", "-m", "sideways"]).is_err());
}
