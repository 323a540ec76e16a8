use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::{Page, PageResponse};
use crate::concept::ConceptSet;
use crate::config::ConceptNetConfig;
use crate::error::{ConceptKgError, Result};
use crate::rdf::RelationSet;

/// Paginating ConceptNet client
///
/// Requests are issued one at a time: concepts in order, pages in order.
pub struct ConceptNetClient {
    client: Client,
    base_url: Url,
    namespace: String,
    page_size: usize,
    max_pages: usize,
}

impl ConceptNetClient {
    /// Create a client from the `[conceptnet]` config section
    pub fn new(config: &ConceptNetConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ConceptKgError::Config(format!("Invalid conceptnet.base_url: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            namespace: config.namespace.clone(),
            page_size: config.page_size.max(1),
            max_pages: config.max_pages.max(1),
        })
    }

    /// `{base}/{concept}?limit={page_size}&offset={offset}`
    fn page_url(&self, concept: &str, offset: usize) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ConceptKgError::Config("conceptnet.base_url cannot be a base".to_string()))?
            .pop_if_empty()
            .push(concept);
        url.query_pairs_mut()
            .append_pair("limit", &self.page_size.to_string())
            .append_pair("offset", &offset.to_string());
        Ok(url)
    }

    /// Fetch a single page of edges for a concept
    pub async fn fetch_page(&self, concept: &str, offset: usize) -> Result<Page> {
        let url = self.page_url(concept, offset)?;
        log::debug!("Sending request to: {}", url);

        let fetch_err = |message: String| ConceptKgError::Fetch {
            concept: concept.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_err(format!("Network error: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(fetch_err(format!("API error {}: {}", status, body)));
        }

        let body: PageResponse = response
            .json()
            .await
            .map_err(|e| fetch_err(format!("Failed to parse response: {}", e)))?;

        Ok(Page::from_response(body, &self.namespace))
    }

    /// Page through every edge of one concept, adding triples to `relations`.
    ///
    /// Stops at the first short page, the first error, or `max_pages`.
    /// Returns the number of pages that were read successfully.
    pub async fn fetch_concept(&self, concept: &str, relations: &mut RelationSet) -> usize {
        log::info!("Fetching relations for concept: {}", concept);

        let mut offset = 0;
        let mut pages = 0;

        while pages < self.max_pages {
            let page = match self.fetch_page(concept, offset).await {
                Ok(page) => page,
                Err(e) => {
                    log::error!("Request failed for concept {}: {}", concept, e);
                    return pages;
                }
            };
            pages += 1;

            for triple in page.triples {
                log::debug!(
                    "Relation added: {} -> {} -> {}",
                    triple.subject,
                    triple.predicate,
                    triple.object
                );
                relations.insert(triple);
            }

            if page.edges_seen < self.page_size {
                log::info!("All relations fetched for concept {}", concept);
                return pages;
            }

            offset += self.page_size;
        }

        log::warn!(
            "Stopped paging concept {} after {} pages (max_pages)",
            concept,
            self.max_pages
        );
        pages
    }

    /// Fetch relations for every concept. Per-concept failures are logged and skipped.
    pub async fn fetch_relations(&self, concepts: &ConceptSet) -> RelationSet {
        log::info!("Fetching ConceptNet relations for {} concepts", concepts.len());

        let mut relations = RelationSet::new();
        for concept in concepts.iter() {
            self.fetch_concept(concept, &mut relations).await;
        }

        log::info!("ConceptNet fetch complete: {} relations", relations.len());
        relations
    }
}
