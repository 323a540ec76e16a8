//! Triple store gateway (Apache Jena Fuseki over HTTP).
//!
//! Inserts go to the dataset's graph store endpoint as Turtle; reads go
//! through the SPARQL query endpoint and come back as [`QueryRow`]s.

mod fuseki;
mod query;

pub use fuseki::FusekiClient;
pub use query::expansion_query;

use serde::Deserialize;

/// One `?subject ?predicate ?object` solution, values as full IRIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRow {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl QueryRow {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

/// SPARQL 1.1 JSON results document (`application/sparql-results+json`).
#[derive(Debug, Default, Deserialize)]
pub struct SparqlResults {
    #[serde(default)]
    pub results: ResultsBody,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResultsBody {
    #[serde(default)]
    pub bindings: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Binding {
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TripleBinding {
    subject: Option<Binding>,
    predicate: Option<Binding>,
    object: Option<Binding>,
}

impl SparqlResults {
    /// Convert bindings to rows; solutions missing a value are dropped.
    pub fn into_rows(self) -> Vec<QueryRow> {
        let mut rows = Vec::with_capacity(self.results.bindings.len());

        for value in self.results.bindings {
            let row = serde_json::from_value::<TripleBinding>(value)
                .ok()
                .and_then(|b| {
                    Some(QueryRow {
                        subject: b.subject?.value?,
                        predicate: b.predicate?.value?,
                        object: b.object?.value?,
                    })
                });
            match row {
                Some(row) => rows.push(row),
                None => log::debug!("Skipping malformed query binding"),
            }
        }

        rows
    }
}
