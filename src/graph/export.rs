//! RDF description of a pruned graph.

use super::ConceptGraph;
use crate::rdf::{self, RelationSet, Triple};

pub const DESCRIPTION_NAMESPACE: &str = "http://example.org/";

/// Map each edge `(u, v, label)` to `ex:u ex:label ex:v`.
pub fn to_triples(graph: &ConceptGraph) -> RelationSet {
    graph
        .edges()
        .map(|edge| {
            Triple::new(
                format!("{}{}", DESCRIPTION_NAMESPACE, edge.source),
                format!("{}{}", DESCRIPTION_NAMESPACE, edge.label),
                format!("{}{}", DESCRIPTION_NAMESPACE, edge.target),
            )
        })
        .collect()
}

/// Turtle text describing the graph; empty for an empty graph.
pub fn to_turtle(graph: &ConceptGraph) -> String {
    rdf::to_turtle(&to_triples(graph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{local_name, parse_turtle};

    #[test]
    fn test_empty_graph_description() {
        let text = to_turtle(&ConceptGraph::new());
        assert_eq!(text, "");
        assert!(parse_turtle(&text).unwrap().is_empty());
    }

    #[test]
    fn test_description_uses_example_namespace() {
        let mut graph = ConceptGraph::new();
        graph.add_edge("dog", "frisbee", "RelatedTo");
        assert_eq!(
            to_turtle(&graph),
            "<http://example.org/dog> <http://example.org/RelatedTo> <http://example.org/frisbee> .\n"
        );
    }

    #[test]
    fn test_description_reparses_one_triple_per_edge() {
        let mut graph = ConceptGraph::new();
        graph.add_edge("dog", "frisbee", "RelatedTo");
        graph.add_edge("person", "dog", "Desires");
        graph.add_edge("person", "frisbee", "CapableOf");
        graph.add_edge("dog", "frisbee", "UsedFor");

        let parsed = parse_turtle(&to_turtle(&graph)).unwrap();
        assert_eq!(parsed.len(), graph.edge_count());

        for edge in graph.edges() {
            let found = parsed.iter().any(|t| {
                t.subject.starts_with(DESCRIPTION_NAMESPACE)
                    && local_name(&t.subject) == edge.source
                    && local_name(&t.predicate) == edge.label
                    && local_name(&t.object) == edge.target
            });
            assert!(found, "missing triple for edge {:?}", edge);
        }
    }
}
