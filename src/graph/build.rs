//! Graph construction from query rows, then single-pass pruning.

use super::ConceptGraph;
use crate::concept::ConceptSet;
use crate::rdf::local_name;
use crate::store::QueryRow;

/// Build the display graph from expansion-query rows and prune it.
pub fn build(rows: &[QueryRow], seeds: &ConceptSet) -> ConceptGraph {
    let mut graph = ConceptGraph::new();

    for row in rows {
        graph.add_edge(
            local_name(&row.subject),
            local_name(&row.object),
            local_name(&row.predicate),
        );
    }

    log::info!(
        "Graph built: {} nodes, {} edges. Removing weakly attached nodes",
        graph.node_count(),
        graph.edge_count()
    );

    let removed = prune(&mut graph, seeds);
    log::info!("Pruned {} nodes", removed);

    graph
}

/// Remove every non-seed node that has exactly one seed among its neighbours.
///
/// Decisions are made on the unpruned graph and applied together; nodes left
/// dangling by the removal are not revisited. Returns the number removed.
pub fn prune(graph: &mut ConceptGraph, seeds: &ConceptSet) -> usize {
    let marked: Vec<String> = graph
        .nodes()
        .filter(|node| !seeds.contains(node))
        .filter(|node| graph.neighbors(node).filter(|n| seeds.contains(n)).count() == 1)
        .map(str::to_string)
        .collect();

    graph.remove_nodes(marked.iter().map(String::as_str));
    marked.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cn(term: &str) -> String {
        format!("http://conceptnet.io/c/en/{}", term)
    }

    fn rel(name: &str) -> String {
        format!("http://conceptnet.io/r/{}", name)
    }

    fn row(s: &str, p: &str, o: &str) -> QueryRow {
        QueryRow::new(cn(s), rel(p), cn(o))
    }

    #[test]
    fn test_build_uses_local_names() {
        let seeds = ConceptSet::from_labels(["dog", "cat"]);
        let graph = build(&[row("dog", "RelatedTo", "cat")], &seeds);
        assert!(graph.contains_node("dog"));
        assert!(graph.contains_node("cat"));
        assert_eq!(graph.edge_label("dog", "cat"), Some("RelatedTo"));
    }

    #[test]
    fn test_single_seed_leaf_is_removed() {
        let seeds = ConceptSet::from_labels(["a", "b"]);
        let graph = build(&[row("a", "RelatedTo", "b"), row("x", "IsA", "a")], &seeds);
        assert!(!graph.contains_node("x"));
        assert!(graph.contains_node("a"));
        assert!(graph.contains_node("b"));
    }

    #[test]
    fn test_bridge_between_seeds_is_kept() {
        let seeds = ConceptSet::from_labels(["a", "b"]);
        let graph = build(&[row("y", "RelatedTo", "a"), row("y", "RelatedTo", "b")], &seeds);
        assert!(graph.contains_node("y"));
        assert_eq!(graph.degree("y"), 2);
    }

    #[test]
    fn test_seeds_are_never_removed() {
        let seeds = ConceptSet::from_labels(["a", "b", "c"]);
        let graph = build(&[row("a", "RelatedTo", "b")], &seeds);
        assert!(graph.contains_node("a"));
        assert!(graph.contains_node("b"));
    }

    #[test]
    fn test_nodes_without_seed_neighbours_are_kept() {
        // z only touches non-seeds, so it has zero seed neighbours.
        let seeds = ConceptSet::from_labels(["a", "b"]);
        let graph = build(
            &[
                row("a", "RelatedTo", "b"),
                row("y", "RelatedTo", "a"),
                row("y", "RelatedTo", "b"),
                row("z", "IsA", "y"),
            ],
            &seeds,
        );
        assert!(graph.contains_node("z"));
        assert!(graph.contains_node("y"));
    }

    #[test]
    fn test_prune_is_single_pass() {
        // x hangs off a; w hangs off x only. Removing x strands w, which stays.
        let seeds = ConceptSet::from_labels(["a", "b"]);
        let graph = build(
            &[
                row("a", "RelatedTo", "b"),
                row("x", "RelatedTo", "a"),
                row("w", "RelatedTo", "x"),
            ],
            &seeds,
        );
        assert!(!graph.contains_node("x"));
        assert!(graph.contains_node("w"));
        assert_eq!(graph.degree("w"), 0);
    }

    #[test]
    fn test_empty_rows_give_empty_graph() {
        let seeds = ConceptSet::from_labels(["dog"]);
        let graph = build(&[], &seeds);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_repeated_rows_collapse() {
        let seeds = ConceptSet::from_labels(["dog", "frisbee"]);
        let rows = vec![row("dog", "RelatedTo", "frisbee"), row("dog", "RelatedTo", "frisbee")];
        let graph = build(&rows, &seeds);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_dog_frisbee_scenario() {
        let seeds = ConceptSet::from_labels(["dog", "frisbee"]);
        let rows = vec![
            row("dog", "RelatedTo", "frisbee"),
            row("frisbee", "RelatedTo", "toy"),
        ];
        let graph = build(&rows, &seeds);

        let nodes: Vec<_> = graph.nodes().collect();
        assert_eq!(nodes, vec!["dog", "frisbee"]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_label("dog", "frisbee"), Some("RelatedTo"));
    }
}
