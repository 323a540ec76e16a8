//! Knowledge graph module: building, pruning, export and rendering.
//!
//! Query rows become an undirected, edge-labelled [`ConceptGraph`] keyed by
//! local names. Pruning drops non-seed nodes attached to exactly one seed.

mod build;
mod export;
mod render;

pub use build::{build, prune};
pub use export::{to_triples, to_turtle, DESCRIPTION_NAMESPACE};
pub use render::{to_dot, EMPTY_GRAPH_MESSAGE};

use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A labelled edge. `source`/`target` keep the orientation of the row that
/// last wrote the edge; the graph itself is undirected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub label: String,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Undirected simple graph: at most one edge per node pair, self-loops allowed.
///
/// Wraps a petgraph `StableUnGraph` with a name -> index lookup table.
/// Indices stay valid across removals.
#[derive(Debug, Clone, Default)]
pub struct ConceptGraph {
    graph: StableUnGraph<String, Edge>,
    node_indices: BTreeMap<String, NodeIndex>,
}

impl ConceptGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn node_index(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_indices.insert(name.to_string(), idx);
        idx
    }

    /// Add (or overwrite) the edge between `source` and `target`.
    pub fn add_edge(&mut self, source: &str, target: &str, label: &str) {
        let a = self.node_index(source);
        let b = self.node_index(target);
        self.graph.update_edge(
            a,
            b,
            Edge {
                source: source.to_string(),
                target: target.to_string(),
                label: label.to_string(),
            },
        );
    }

    /// Remove nodes and all their incident edges.
    pub fn remove_nodes<'a, I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for node in nodes {
            if let Some(idx) = self.node_indices.remove(node) {
                self.graph.remove_node(idx);
            }
        }
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.node_indices.contains_key(node)
    }

    /// Node names in sorted order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.node_indices.keys().map(String::as_str)
    }

    /// Distinct neighbours in sorted order.
    pub fn neighbors(&self, node: &str) -> impl Iterator<Item = &str> {
        let names: BTreeSet<&str> = match self.node_indices.get(node) {
            Some(&idx) => self
                .graph
                .neighbors(idx)
                .map(|n| self.graph[n].as_str())
                .collect(),
            None => BTreeSet::new(),
        };
        names.into_iter()
    }

    /// Number of distinct neighbours (a self-loop counts once).
    pub fn degree(&self, node: &str) -> usize {
        self.neighbors(node).count()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph
            .edge_indices()
            .filter_map(move |e| self.graph.edge_weight(e))
    }

    pub fn edge_label(&self, a: &str, b: &str) -> Option<&str> {
        let a = *self.node_indices.get(a)?;
        let b = *self.node_indices.get(b)?;
        let edge = self.graph.find_edge(a, b)?;
        Some(self.graph[edge].label.as_str())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// The underlying petgraph graph (for rendering).
    pub(crate) fn inner(&self) -> &StableUnGraph<String, Edge> {
        &self.graph
    }
}
