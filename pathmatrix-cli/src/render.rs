//! Text and JSON rendering of path search results.

use std::fmt::Write;

use serde::Serialize;

use pathmatrix_core::{Graph, Mode, PathRecord, PathResult, Step};

/// Marks a cell which differs from the initial matrix.
const CHANGED_MARK: char = '*';

fn title(mode: Mode) -> &'static str {
    match mode {
        Mode::Minimize => "Minimum path",
        Mode::Maximize => "Maximum path",
    }
}

/// Result summary, optionally followed by every step matrix.
pub fn render_text(result: &PathResult, graph: &Graph, show_steps: bool) -> String {
    let mut out = String::new();
    writeln!(out, "{}", title(result.mode)).ok();
    writeln!(out, "Cost: {}", result.display_cost()).ok();
    if result.is_found() {
        writeln!(out, "Path: {}", result.describe_path(graph)).ok();
    } else if result.is_reachable() {
        writeln!(out, "Path could not be rebuilt: the predecessors loop").ok();
    } else {
        writeln!(out, "No path found").ok();
    }

    if show_steps {
        let initial = result.initial_step();
        for step in &result.steps {
            out.push('\n');
            // The initial matrix is the reference, so it never shows changes
            let reference = initial.filter(|_| step.round > 0);
            out.push_str(&render_step(step, reference));
        }
    }

    out
}

/// Step matrix as a table with 1-based row and column headers.
/// Cells changed relative to `reference` get a trailing `*`.
pub fn render_step(step: &Step, reference: Option<&Step>) -> String {
    let changed = reference.map(|r| step.changed_cells(r)).unwrap_or_default();
    let n = step.size();

    let cells = step
        .matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.iter()
                .enumerate()
                .map(|(j, cell)| {
                    if changed.contains(&(i, j)) {
                        format!("{}{}", cell.value, CHANGED_MARK)
                    } else {
                        cell.value.clone()
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let width = cells
        .iter()
        .flatten()
        .map(|s| s.chars().count())
        .chain(std::iter::once(n.to_string().len()))
        .max()
        .unwrap_or(1);
    let head_width = n.to_string().len();

    let mut out = String::new();
    writeln!(out, "D{}", step.round).ok();
    if n == 0 {
        return out;
    }

    write!(out, "{:>w$}", "", w = head_width).ok();
    for j in 1..=n {
        write!(out, " {:>w$}", j, w = width).ok();
    }
    out.push('\n');

    for (i, row) in cells.iter().enumerate() {
        write!(out, "{:>w$}", i + 1, w = head_width).ok();
        for cell in row {
            // `{:>w$}` pads by chars, which keeps `∞` cells aligned
            write!(out, " {:>w$}", cell, w = width).ok();
        }
        out.push('\n');
    }
    out
}

/// JSON report over every result.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    results: Vec<ResultReport<'a>>,
    last_path: Option<&'a PathRecord>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultReport<'a> {
    #[serde(flatten)]
    result: &'a PathResult,
    path_labels: Vec<&'a str>,
}

pub fn render_json(results: &[PathResult], graph: &Graph, last_path: Option<&PathRecord>) -> Result<String, serde_json::Error> {
    let report = Report {
        results: results
            .iter()
            .map(|result| ResultReport { result, path_labels: result.path_labels(graph) })
            .collect(),
        last_path,
    };
    serde_json::to_string_pretty(&report)
}

#[cfg(test)]
mod tests {
    use pathmatrix_core::{Demoucron, Graph, GraphSolver, PathHistory};

    use super::{render_json, render_step, render_text};

    fn chain() -> Graph {
        let mut g = Graph::with_nodes(3);
        g.add_edge("node-1", "node-2", 2.0).expect("bad test data");
        g.add_edge("node-2", "node-3", 3.0).expect("bad test data");
        g
    }

    #[test]
    fn test_render_text() {
        let g = chain();
        let res = Demoucron::new().shortest_path(&g);
        assert_eq!(render_text(&res, &g, false), "Minimum path\nCost: 5\nPath: X1 → X2 → X3\n");

        let res = Demoucron::new().longest_path(&Graph::with_nodes(2));
        assert_eq!(render_text(&res, &g, false), "Maximum path\nCost: -∞\nNo path found\n");
    }

    #[test]
    fn test_render_text_looping_predecessors() {
        let mut g = Graph::with_nodes(4);
        for &(from, to) in &[("node-1", "node-2"), ("node-2", "node-3"), ("node-3", "node-2"), ("node-3", "node-4")] {
            g.add_edge(from, to, 1.0).expect("bad test data");
        }
        let res = Demoucron::new().longest_path(&g);
        assert_eq!(render_text(&res, &g, false), "Maximum path\nCost: 3\nPath could not be rebuilt: the predecessors loop\n");
    }

    #[test]
    fn test_render_step() {
        let g = chain();
        let res = Demoucron::new().shortest_path(&g);
        let initial = &res.steps[0];
        let last = &res.steps[1];

        assert_eq!(
            render_step(initial, None),
            "D0\n   1  2  3\n1 +∞  2 +∞\n2 +∞ +∞  3\n3 +∞ +∞ +∞\n"
        );
        assert_eq!(
            render_step(last, Some(initial)),
            "D1\n   1  2  3\n1 +∞  2 5*\n2 +∞ +∞  3\n3 +∞ +∞ +∞\n"
        );
    }

    #[test]
    fn test_render_text_with_steps() {
        let g = chain();
        let res = Demoucron::new().shortest_path(&g);
        let text = render_text(&res, &g, true);
        assert!(text.contains("\nD0\n"));
        assert!(text.contains("\nD1\n"));
        assert!(text.contains("5*"));
    }

    #[test]
    fn test_render_empty_step() {
        let res = Demoucron::new().shortest_path(&Graph::with_nodes(0));
        assert!(res.steps.is_empty());
        let res = Demoucron::new().shortest_path(&Graph::with_nodes(1));
        assert_eq!(render_step(&res.steps[0], None), "D0\n   1\n1 +∞\n");
    }

    #[test]
    fn test_render_json() -> Result<(), serde_json::Error> {
        let g = chain();
        let res = Demoucron::new().shortest_path(&g);
        let mut history = PathHistory::new();
        history.publish(&res, &g);

        let json = render_json(&[res], &g, history.last())?;
        let v: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(v["results"][0]["mode"], "minimize");
        assert_eq!(v["results"][0]["cost"], 5.0);
        assert_eq!(v["results"][0]["pathLabels"], serde_json::json!(["X1", "X2", "X3"]));
        assert_eq!(v["results"][0]["steps"][1]["round"], 1);
        assert_eq!(v["lastPath"]["path"], serde_json::json!(["node-1", "node-2", "node-3"]));
        Ok(())
    }
}
