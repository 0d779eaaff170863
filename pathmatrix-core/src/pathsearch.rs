//! Path search in a weighted graph.

pub use self::demoucron::Demoucron;
pub use self::relaxation::Relaxation;
pub use self::solver::GraphSolver;

mod demoucron;
mod relaxation;
mod solver;

#[cfg(test)]
fn graph(n: usize, edges: &[(usize, usize, f64)]) -> crate::Graph {
    let mut g = crate::Graph::with_nodes(n);
    for &(i, j, w) in edges {
        let (src, dst) = (g.nodes()[i].id.clone(), g.nodes()[j].id.clone());
        g.add_edge(&src, &dst, w).expect("bad test data");
    }
    g
}

#[test]
fn test_empty_graph() {
    let res = Demoucron::new().shortest_path(&graph(0, &[]));
    assert_eq!(res.cost, crate::Cost::Unreachable);
    assert!(res.path.is_empty());
    assert!(res.steps.is_empty());
    assert!(!res.is_found());
}

#[test]
fn test_single_node() {
    for &mode in &[crate::Mode::Minimize, crate::Mode::Maximize] {
        let res = Demoucron::new().solve(&graph(1, &[]), mode);
        assert_eq!(res.cost, crate::Cost::Unreachable);
        assert!(res.path.is_empty());
        assert_eq!(res.steps.len(), 1);
        assert_eq!(res.steps[0].cost(0, 0), crate::Cost::Unreachable);
    }
}

#[test]
fn test_chain() {
    let g = graph(3, &[(0, 1, 2.0), (1, 2, 3.0)]);
    let res = Demoucron::new().shortest_path(&g);
    assert_eq!(res.cost, crate::Cost::Finite(5.0));
    assert_eq!(res.path, vec![0, 1, 2]);
    assert_eq!(res.describe_path(&g), "X1 → X2 → X3");
    assert_eq!(res.display_cost(), "5");
    assert_eq!(res.steps.iter().map(|s| s.round).collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn test_direct_edge_without_middle_link() {
    let g = graph(3, &[(0, 1, 2.0), (0, 2, 1.0)]);
    let res = Demoucron::new().shortest_path(&g);
    assert_eq!(res.cost, crate::Cost::Finite(1.0));
    assert_eq!(res.path, vec![0, 2]);
}

#[test]
fn test_no_path() {
    let g = graph(3, &[(0, 1, 2.0), (2, 1, 1.0)]);
    let min = Demoucron::new().shortest_path(&g);
    assert!(!min.is_found());
    assert_eq!(min.display_cost(), "+∞");
    let max = Demoucron::new().longest_path(&g);
    assert!(!max.is_found());
    assert_eq!(max.display_cost(), "-∞");
    assert_eq!(max.steps.len(), 2);
}

#[test]
fn test_min_and_max_differ() {
    // 0 -> 1 -> 3 costs 2, 0 -> 2 -> 3 costs 10, 0 -> 3 costs 5
    let g = graph(4, &[(0, 1, 1.0), (1, 3, 1.0), (0, 2, 5.0), (2, 3, 5.0), (0, 3, 5.0)]);
    let min = Demoucron::new().shortest_path(&g);
    assert_eq!(min.cost, crate::Cost::Finite(2.0));
    assert_eq!(min.path, vec![0, 1, 3]);
    let max = Demoucron::new().longest_path(&g);
    assert_eq!(max.cost, crate::Cost::Finite(10.0));
    assert_eq!(max.path, vec![0, 2, 3]);
    assert_eq!(max.describe_path(&g), "X1 → X3 → X4");
}

#[test]
fn test_endpoints_are_not_intermediates() {
    // 1 -> 0 -> 2 exists, but the first node is never routed through
    let g = graph(3, &[(1, 0, 1.0), (0, 2, 1.0)]);
    let res = Demoucron::new().shortest_path(&g);
    let last = res.final_step().expect("steps");
    assert_eq!(last.cost(1, 2), crate::Cost::Unreachable);
    assert_eq!(res.path, vec![0, 2]);
}

#[test]
fn test_cycle_off_path() {
    // 1 <-> 2 is a positive cycle not on the 0 -> 3 path
    let g = graph(4, &[(0, 3, 5.0), (1, 2, 1.0), (2, 1, 1.0)]);
    for &mode in &[crate::Mode::Minimize, crate::Mode::Maximize] {
        let res = Demoucron::new().solve(&g, mode);
        assert_eq!(res.cost, crate::Cost::Finite(5.0));
        assert_eq!(res.path, vec![0, 3]);
        assert_eq!(res.steps.len(), 3);
        let last = res.final_step().expect("steps");
        assert_eq!(last.cost(1, 2), crate::Cost::Finite(1.0));
        assert_eq!(last.cost(2, 1), crate::Cost::Finite(1.0));
    }
}

#[test]
fn test_looping_predecessors_keep_cost() {
    // 1 <-> 2 is a positive cycle on the way from 0 to 3, so maximizing
    // leaves predecessors which walk 3 -> 2 -> 1 -> 2 -> ...
    let g = graph(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 1, 1.0), (2, 3, 1.0)]);
    let res = Demoucron::new().longest_path(&g);
    assert!(!res.is_found());
    assert!(res.is_reachable());
    assert!(res.path.is_empty());
    assert_eq!(res.cost, crate::Cost::Finite(3.0));
    assert_eq!(res.display_cost(), "3");
    assert_eq!(res.final_step().map(|s| s.cost(0, 3)), Some(res.cost));

    let min = Demoucron::new().shortest_path(&g);
    assert_eq!(min.path, vec![0, 1, 2, 3]);
    assert_eq!(min.cost, crate::Cost::Finite(3.0));
}

#[test]
fn test_huge_weights_stay_finite() -> Result<(), serde_json::Error> {
    let g = graph(3, &[(0, 1, f64::MAX), (1, 2, f64::MAX)]);
    let res = Demoucron::new().shortest_path(&g);
    assert!(res.is_found());
    assert_eq!(res.cost, crate::Cost::Finite(f64::MAX));
    assert_ne!(res.display_cost(), "inf");
    assert!(serde_json::to_value(&res)?["cost"].is_number());
    Ok(())
}

#[test]
fn test_tie_keeps_lower_intermediate() {
    // 0 -> 1 -> 3 and 0 -> 2 -> 3 both cost 2
    let g = graph(4, &[(0, 1, 1.0), (1, 3, 1.0), (0, 2, 1.0), (2, 3, 1.0)]);
    for &mode in &[crate::Mode::Minimize, crate::Mode::Maximize] {
        let res = Demoucron::new().solve(&g, mode);
        assert_eq!(res.cost, crate::Cost::Finite(2.0));
        assert_eq!(res.path, vec![0, 1, 3]);
    }
}

#[test]
fn test_first_step_is_initial_matrix() {
    let g = graph(3, &[(0, 1, 2.0), (1, 2, 3.0)]);
    let res = Demoucron::new().shortest_path(&g);
    let initial = crate::Step::snapshot(0, &crate::CostMatrix::from_graph(&g), crate::Mode::Minimize);
    assert_eq!(res.initial_step(), Some(&initial));
    assert_eq!(res.final_step().map(|s| s.changed_cells(&initial)), Some(vec![(0, 2)]));
}

#[test]
fn test_without_steps() {
    let g = graph(3, &[(0, 1, 2.0), (1, 2, 3.0)]);
    let res = Demoucron::without_steps().shortest_path(&g);
    assert!(res.steps.is_empty());
    assert_eq!(res.cost, crate::Cost::Finite(5.0));
}

#[test]
fn test_decoded_graph() -> Result<(), serde_json::Error> {
    let g: crate::Graph = serde_json::from_str(r#"{
        "nodes": [{"id": "s"}, {"id": "m"}, {"id": "t"}],
        "edges": [
            {"source": "s", "target": "m", "weight": 2},
            {"source": "m", "target": "t", "weight": 3},
            {"source": "s", "target": "t", "weight": 9},
            {"source": "s", "target": "ghost", "weight": 1}
        ]
    }"#)?;
    let res = Demoucron::new().shortest_path(&g);
    assert_eq!(res.path_ids(&g), vec!["s", "m", "t"]);
    assert_eq!(res.cost, crate::Cost::Finite(5.0));

    let json = serde_json::to_value(&res)?;
    assert_eq!(json["mode"], "minimize");
    assert_eq!(json["cost"], 5.0);
    assert_eq!(json["path"], serde_json::json!([0, 1, 2]));
    assert_eq!(json["steps"][0]["matrix"][0][2]["value"], "9");
    assert_eq!(json["steps"][1]["matrix"][0][2]["originalValue"], 5.0);
    assert_eq!(json["steps"][1]["matrix"][2][0]["originalValue"], serde_json::Value::Null);
    Ok(())
}

#[cfg(test)]
mod randomized {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::{Cost, CostMatrix, Graph, Mode};

    use super::{Demoucron, GraphSolver};

    const ROUNDS: usize = 200;

    /// Integer weights keep every sum exact, whatever the order of additions.
    fn random_graph(rng: &mut SmallRng, acyclic: bool) -> Graph {
        let n = rng.gen_range(0, 8);
        let mut g = Graph::with_nodes(n);
        let ids = g.nodes().iter().map(|node| node.id.clone()).collect::<Vec<_>>();
        for i in 0..n {
            for j in 0..n {
                if i == j || (acyclic && i > j) {
                    continue;
                }
                if rng.gen_bool(0.35) {
                    let w = f64::from(rng.gen_range(1u8, 10u8));
                    g.add_edge(&ids[i], &ids[j], w).expect("bad test data");
                }
            }
        }
        g
    }

    #[test]
    fn test_relaxation_never_worsens() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..ROUNDS {
            let g = random_graph(&mut rng, false);
            for &mode in &[Mode::Minimize, Mode::Maximize] {
                let res = Demoucron::new().solve(&g, mode);
                let (first, last) = match (res.initial_step(), res.final_step()) {
                    (Some(first), Some(last)) => (first, last),
                    _ => continue,
                };
                for i in 0..g.len() {
                    for j in 0..g.len() {
                        assert!(!mode.improves(first.cost(i, j), last.cost(i, j)), "cell ({}, {}) got worse", i, j);
                    }
                }
            }
        }
    }

    #[test]
    fn test_converged_matrix_is_fixed_point() {
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..ROUNDS {
            let cases = vec![(random_graph(&mut rng, false), Mode::Minimize), (random_graph(&mut rng, true), Mode::Maximize)];
            for (g, mode) in cases {
                let converged = Demoucron::new().relax(CostMatrix::from_graph(&g), mode, |_, _| {});
                let mut again = converged.clone();
                for k in again.intermediates() {
                    assert_eq!(again.round(k), 0);
                }
                assert_eq!(again, converged);
            }
        }
    }

    #[test]
    fn test_path_matches_cost() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..ROUNDS {
            let cases = vec![(random_graph(&mut rng, false), Mode::Minimize), (random_graph(&mut rng, true), Mode::Maximize)];
            for (g, mode) in cases {
                let res = Demoucron::new().solve(&g, mode);
                assert_eq!(res, Demoucron::new().solve(&g, mode));

                let end_to_end = res.final_step().map(|s| s.cost(0, g.len() - 1));
                assert_eq!(end_to_end.unwrap_or(Cost::Unreachable), res.cost);
                if !res.is_found() {
                    assert!(!res.is_reachable());
                    continue;
                }

                assert_eq!(res.path.first(), Some(&0));
                assert_eq!(res.path.last(), Some(&(g.len() - 1)));
                let ids = res.path_ids(&g);
                let sum = ids.windows(2).map(|w| g.weight(w[0], w[1]).expect("edge on path")).sum::<f64>();
                assert_eq!(res.cost, Cost::Finite(sum));
                assert_eq!(end_to_end.unwrap_or(Cost::Unreachable), res.cost);
            }
        }
    }
}
