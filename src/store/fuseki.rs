use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

use super::{QueryRow, SparqlResults};
use crate::config::StoreConfig;
use crate::error::{ConceptKgError, Result};
use crate::rdf::{to_turtle, RelationSet};

/// Fuseki dataset client
///
/// Talks to `{endpoint}/{dataset}/data` for inserts and
/// `{endpoint}/{dataset}/query` for SPARQL reads.
pub struct FusekiClient {
    client: Client,
    data_url: Url,
    query_url: Url,
}

impl FusekiClient {
    /// Create a client from the `[store]` config section
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            data_url: dataset_url(&config.endpoint, &config.dataset, "data")?,
            query_url: dataset_url(&config.endpoint, &config.dataset, "query")?,
        })
    }

    pub fn data_url(&self) -> &Url {
        &self.data_url
    }

    pub fn query_url(&self) -> &Url {
        &self.query_url
    }

    /// Append a relation set to the dataset's default graph.
    ///
    /// An empty set is not sent.
    pub async fn insert(&self, relations: &RelationSet) -> Result<()> {
        if relations.is_empty() {
            log::info!("No relations to insert into the triple store");
            return Ok(());
        }

        let body = to_turtle(relations);
        log::debug!("Serialized Turtle: {}...", preview(&body, 200));

        let response = self
            .client
            .post(self.data_url.clone())
            .header(CONTENT_TYPE, "text/turtle")
            .body(body)
            .send()
            .await?;

        check_status(response).await?;
        log::info!("Inserted {} relations into the triple store", relations.len());
        Ok(())
    }

    /// Run a SELECT query and return its `subject/predicate/object` rows.
    pub async fn query(&self, sparql: &str) -> Result<Vec<QueryRow>> {
        log::debug!("Sending SPARQL query to {}", self.query_url);

        let response = self
            .client
            .post(self.query_url.clone())
            .header(ACCEPT, "application/sparql-results+json")
            .form(&[("query", sparql)])
            .send()
            .await?;

        let response = check_status(response).await?;

        let results: SparqlResults = response
            .json()
            .await
            .map_err(|e| ConceptKgError::Parse(format!("Invalid SPARQL results: {}", e)))?;

        let rows = results.into_rows();
        log::info!("SPARQL query returned {} rows", rows.len());
        Ok(rows)
    }
}

fn dataset_url(endpoint: &str, dataset: &str, service: &str) -> Result<Url> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| ConceptKgError::Config(format!("Invalid store.endpoint: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| ConceptKgError::Config("store.endpoint cannot be a base".to_string()))?
        .pop_if_empty()
        .push(dataset)
        .push(service);
    Ok(url)
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error response".to_string());
    Err(ConceptKgError::Store {
        status: status.as_u16(),
        body,
    })
}

fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
