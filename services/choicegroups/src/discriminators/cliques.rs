//! Maximal clique enumeration (Bron–Kerbosch with pivoting)

use std::collections::BTreeSet;
use crate::discriminators::{ConflictGraph, Discriminator};

static NO_NEIGHBORS: BTreeSet<Discriminator> = BTreeSet::new();

/// Enumerate all maximal cliques of `graph`.
///
/// The order is fully determined by the graph: candidates are visited in
/// sorted order and pivot ties go to the first node in sorted order.
/// Isolated nodes come out as single-node cliques. An empty graph has no
/// cliques.
pub fn find_cliques(graph: &ConflictGraph) -> Vec<BTreeSet<Discriminator>> {
    let mut cliques = Vec::new();
    if graph.is_empty() {
        return cliques;
    }

    let candidates: BTreeSet<&Discriminator> = graph.nodes().collect();
    expand(graph, &mut Vec::new(), candidates, BTreeSet::new(), &mut cliques);
    cliques
}

fn neighbors_of<'g>(graph: &'g ConflictGraph, node: &str) -> &'g BTreeSet<Discriminator> {
    graph.neighbors(node).unwrap_or(&NO_NEIGHBORS)
}

/// Node of `candidates ∪ excluded` with the most neighbours in `candidates`
fn choose_pivot<'g>(
    graph: &'g ConflictGraph,
    candidates: &BTreeSet<&'g Discriminator>,
    excluded: &BTreeSet<&'g Discriminator>,
) -> Option<&'g Discriminator> {
    let mut best: Option<(&Discriminator, usize)> = None;

    for &u in candidates.iter().chain(excluded.iter()) {
        let neighbors = neighbors_of(graph, u);
        let degree = candidates.iter().filter(|v| neighbors.contains(**v)).count();
        if best.map_or(true, |(_, d)| degree > d) {
            best = Some((u, degree));
        }
    }

    best.map(|(u, _)| u)
}

fn expand<'g>(
    graph: &'g ConflictGraph,
    clique: &mut Vec<&'g Discriminator>,
    mut candidates: BTreeSet<&'g Discriminator>,
    mut excluded: BTreeSet<&'g Discriminator>,
    out: &mut Vec<BTreeSet<Discriminator>>,
) {
    if candidates.is_empty() {
        if excluded.is_empty() {
            out.push(clique.iter().map(|d| (*d).clone()).collect());
        }
        return;
    }

    let pivot_neighbors = choose_pivot(graph, &candidates, &excluded)
        .map_or(&NO_NEIGHBORS, |p| neighbors_of(graph, p));

    let branch: Vec<&Discriminator> = candidates
        .iter()
        .filter(|v| !pivot_neighbors.contains(**v))
        .copied()
        .collect();

    for v in branch {
        let neighbors = neighbors_of(graph, v);
        let next_candidates = candidates
            .iter()
            .filter(|u| neighbors.contains(**u))
            .copied()
            .collect();
        let next_excluded = excluded
            .iter()
            .filter(|u| neighbors.contains(**u))
            .copied()
            .collect();

        clique.push(v);
        expand(graph, clique, next_candidates, next_excluded, out);
        clique.pop();

        candidates.remove(v);
        excluded.insert(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<Discriminator> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn graph_with_edges(nodes: &[&str], edges: &[(&str, &str)]) -> ConflictGraph {
        let mut graph = ConflictGraph::complete(nodes.iter().map(|s| s.to_string()));
        let keep: BTreeSet<(String, String)> = edges
            .iter()
            .map(|(a, b)| {
                let (a, b) = if a < b { (a, b) } else { (b, a) };
                (a.to_string(), b.to_string())
            })
            .collect();
        for (a, b) in graph.edges() {
            if !keep.contains(&(a.clone(), b.clone())) {
                graph.remove_edge(&a, &b);
            }
        }
        graph
    }

    #[test]
    fn test_empty_graph_has_no_cliques() {
        assert!(find_cliques(&ConflictGraph::default()).is_empty());
    }

    #[test]
    fn test_isolated_nodes_are_singletons() {
        let graph = graph_with_edges(&["a", "b"], &[]);

        assert_eq!(find_cliques(&graph), vec![set(&["a"]), set(&["b"])]);
    }

    #[test]
    fn test_complete_graph_is_one_clique() {
        let graph = ConflictGraph::complete(["Small", "Medium", "Large"].map(String::from));

        assert_eq!(find_cliques(&graph), vec![set(&["Large", "Medium", "Small"])]);
    }

    #[test]
    fn test_path_graph() {
        let graph = graph_with_edges(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);

        assert_eq!(find_cliques(&graph), vec![set(&["a", "b"]), set(&["b", "c"])]);
    }

    #[test]
    fn test_two_triangles_sharing_a_node() {
        let graph = graph_with_edges(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("a", "c"), ("b", "c"), ("c", "d"), ("c", "e"), ("d", "e")],
        );

        let cliques = find_cliques(&graph);

        assert_eq!(cliques.len(), 2);
        assert!(cliques.contains(&set(&["a", "b", "c"])));
        assert!(cliques.contains(&set(&["c", "d", "e"])));
    }

    #[test]
    fn test_cliques_are_maximal_and_pairwise_connected() {
        let graph = graph_with_edges(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("a", "c")],
        );

        for clique in find_cliques(&graph) {
            let members: Vec<_> = clique.iter().collect();
            for (i, x) in members.iter().enumerate() {
                for y in &members[i + 1..] {
                    assert!(graph.has_edge(x, y));
                }
            }
            let extendable = graph
                .nodes()
                .filter(|n| !clique.contains(*n))
                .any(|n| clique.iter().all(|m| graph.has_edge(n, m)));
            assert!(!extendable);
        }
    }

    #[test]
    fn test_enumeration_is_stable() {
        let graph = graph_with_edges(
            &["x", "y", "z", "w"],
            &[("x", "y"), ("z", "w"), ("x", "w")],
        );

        assert_eq!(find_cliques(&graph), find_cliques(&graph.clone()));
    }
}
