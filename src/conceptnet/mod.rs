//! Relation fetching from the ConceptNet web API.
//!
//! Edge records are deserialized into [`EdgeRecord`] with every field
//! optional; records missing a relation, start or end id are skipped.

mod client;

pub use client::ConceptNetClient;

use serde::Deserialize;

use crate::rdf::Triple;

/// One page of the `/c/<lang>/<term>` endpoint.
#[derive(Debug, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub edges: Vec<serde_json::Value>,
}

/// A node reference as the API returns it: `{"@id": "/c/en/dog", ...}`.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRef {
    #[serde(rename = "@id")]
    pub id: Option<String>,
}

/// Typed view of a single edge. Extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeRecord {
    pub rel: Option<NodeRef>,
    pub start: Option<NodeRef>,
    pub end: Option<NodeRef>,
}

impl EdgeRecord {
    /// Mint a triple under `namespace`, or `None` if any id is missing or empty.
    pub fn into_triple(self, namespace: &str) -> Option<Triple> {
        let rel = non_empty_id(self.rel)?;
        let start = non_empty_id(self.start)?;
        let end = non_empty_id(self.end)?;

        let namespace = namespace.trim_end_matches('/');
        Some(Triple::new(
            format!("{}{}", namespace, node_id(&start)),
            format!("{}{}", namespace, rel),
            format!("{}{}", namespace, node_id(&end)),
        ))
    }
}

fn non_empty_id(node: Option<NodeRef>) -> Option<String> {
    node.and_then(|n| n.id).filter(|id| !id.is_empty())
}

/// Strip sense annotations from concept ids: `/c/en/dog/n/wn/animal` -> `/c/en/dog`.
///
/// Anything that is not a `/c/...` concept id is returned unchanged.
pub fn node_id(id: &str) -> &str {
    if !id.starts_with("/c/") {
        return id;
    }
    match id.match_indices('/').nth(3) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Parsed page: how many edge records the API returned (well-formed or not)
/// and the triples that could be built from them.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub edges_seen: usize,
    pub triples: Vec<Triple>,
}

impl Page {
    /// Convert a raw response, skipping malformed edges.
    pub fn from_response(response: PageResponse, namespace: &str) -> Self {
        let edges_seen = response.edges.len();
        let mut triples = Vec::with_capacity(edges_seen);

        for value in response.edges {
            let triple = serde_json::from_value::<EdgeRecord>(value)
                .ok()
                .and_then(|edge| edge.into_triple(namespace));
            match triple {
                Some(t) => triples.push(t),
                None => log::debug!("Skipping malformed edge record"),
            }
        }

        Self { edges_seen, triples }
    }
}
