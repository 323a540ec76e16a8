//! Graphviz rendering. Seed nodes are light green, everything else yellow.

use petgraph::dot::{Config, Dot};

use super::ConceptGraph;
use crate::concept::ConceptSet;

pub const EMPTY_GRAPH_MESSAGE: &str = "no relations found";

const SEED_COLOR: &str = "lightgreen";
const NODE_COLOR: &str = "yellow";

/// Render the graph as an undirected DOT document.
///
/// Node and edge statements come from `petgraph::dot::Dot`; the title and
/// fill style wrap them.
pub fn to_dot(graph: &ConceptGraph, seeds: &ConceptSet) -> String {
    let mut out = String::new();
    out.push_str("graph knowledge_graph {\n");
    out.push_str("    label=\"Knowledge Graph\";\n");
    out.push_str("    labelloc=t;\n");
    out.push_str("    node [style=filled];\n");

    if graph.is_empty() {
        out.push_str(&format!(
            "    empty [label=\"{}\", shape=plaintext, style=\"\"];\n",
            EMPTY_GRAPH_MESSAGE
        ));
        out.push_str("}\n");
        return out;
    }

    let body = Dot::with_attr_getters(
        graph.inner(),
        &[Config::GraphContentOnly],
        &|_, _| String::new(),
        &|_, (_, name)| {
            let color = if seeds.contains(name) { SEED_COLOR } else { NODE_COLOR };
            format!("fillcolor={}", color)
        },
    )
    .to_string();
    out.push_str(&body);

    out.push_str("}\n");
    out
}
