//! End-to-end run: fetch relations, store them, query the neighbourhood,
//! build and prune the graph, then hand back a graph or its description.

use crate::concept::ConceptSet;
use crate::conceptnet::ConceptNetClient;
use crate::config::Config;
use crate::error::{ConceptKgError, Result};
use crate::graph::{self, ConceptGraph};
use crate::rdf::RelationSet;
use crate::store::{expansion_query, FusekiClient};

/// What the caller wants out of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Graph,
    Description,
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub enum PipelineOutput {
    Graph(ConceptGraph),
    /// Turtle text of the pruned graph
    Description(String),
}

/// Query settings carried from the `[store]` section
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub concept_prefix: String,
    pub query_limit: usize,
}

pub struct Pipeline {
    fetcher: ConceptNetClient,
    store: FusekiClient,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(fetcher: ConceptNetClient, store: FusekiClient, options: PipelineOptions) -> Self {
        Self {
            fetcher,
            store,
            options,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            ConceptNetClient::new(&config.conceptnet)?,
            FusekiClient::new(&config.store)?,
            PipelineOptions {
                concept_prefix: config.store.concept_prefix.clone(),
                query_limit: config.store.query_limit,
            },
        ))
    }

    /// Fetch relations for the concepts and insert them into the store.
    ///
    /// A failed insert is logged; the relations are still returned and a
    /// later query runs against whatever the store already holds.
    pub async fn enrich(&self, concepts: &ConceptSet) -> RelationSet {
        let relations = self.fetcher.fetch_relations(concepts).await;

        if let Err(e) = self.store.insert(&relations).await {
            log::error!("Failed to insert relations into the triple store: {}", e);
        }

        relations
    }

    /// Query the 2-hop neighbourhood of the concepts and build the pruned graph.
    pub async fn extract_graph(&self, concepts: &ConceptSet) -> Result<ConceptGraph> {
        let query = expansion_query(concepts, &self.options.concept_prefix, self.options.query_limit)?;

        let rows = self.store.query(&query).await.map_err(|e| {
            log::error!("SPARQL query failed: {}", e);
            e
        })?;

        Ok(graph::build(&rows, concepts))
    }

    /// Run the whole pipeline. With `skip_fetch` the store is queried as it is.
    pub async fn run(
        &self,
        concepts: &ConceptSet,
        output: OutputKind,
        skip_fetch: bool,
    ) -> Result<PipelineOutput> {
        if concepts.is_empty() {
            return Err(ConceptKgError::Detection("no objects detected".to_string()));
        }

        if !skip_fetch {
            self.enrich(concepts).await;
        }

        let graph = self.extract_graph(concepts).await?;

        Ok(match output {
            OutputKind::Graph => PipelineOutput::Graph(graph),
            OutputKind::Description => PipelineOutput::Description(graph::to_turtle(&graph)),
        })
    }
}

/// Message shown to the user when a run ends in an error.
pub fn user_message(err: &ConceptKgError) -> &'static str {
    match err {
        ConceptKgError::Detection(_) => "No objects detected in the image. Please try another image.",
        ConceptKgError::InvalidInput(_) => "The detected concepts cannot be used to query the graph.",
        ConceptKgError::Config(_) => "The configuration is invalid.",
        _ => "Could not retrieve graph.",
    }
}
