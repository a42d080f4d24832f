//! UTS REST client.
//!
//! Implements [`TerminologyService`] over the UMLS Terminology Services API.
//! Every request carries the API key as the `apiKey` query parameter; error
//! values never include it.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};
use umls_types::{AtomRecord, Cui, DescendantLink, TermType};

use crate::service::{Page, TerminologyService};
use crate::types::{ClientConfig, ClosureError, ClosureResult};

/// Envelope of every paginated UTS listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingResponse<T> {
    #[serde(default)]
    page_count: Option<u32>,
    result: Vec<Option<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AtomPayload {
    term_type: String,
    name: String,
    #[serde(default)]
    descendants: Option<String>,
}

impl From<AtomPayload> for AtomRecord {
    fn from(payload: AtomPayload) -> Self {
        AtomRecord {
            term_type: TermType::from(payload.term_type),
            name: payload.name,
            descendants: DescendantLink::from_field(payload.descendants.as_deref()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DescendantPayload {
    concept: String,
}

#[derive(Debug, Deserialize)]
struct ConceptResponse {
    result: ConceptPayload,
}

#[derive(Debug, Deserialize)]
struct ConceptPayload {
    name: String,
}

/// HTTP client for the UTS REST API.
#[derive(Debug, Clone)]
pub struct UtsClient {
    client: Client,
    config: ClientConfig,
}

impl UtsClient {
    /// Creates a client.
    ///
    /// # Errors
    /// Returns [`ClosureError::InvalidConfig`] if the configuration is
    /// unusable and [`ClosureError::RemoteService`] if the HTTP client cannot
    /// be built.
    pub fn new(config: ClientConfig) -> ClosureResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClosureError::RemoteService {
                url: config.base_url.clone(),
                status: None,
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn atoms_url(&self, cui: &Cui) -> String {
        format!("{}/content/current/CUI/{}/atoms", self.base_url(), cui)
    }

    fn concept_url(&self, cui: &Cui) -> String {
        format!("{}/content/current/CUI/{}", self.base_url(), cui)
    }

    /// Query parameters shared by paginated listings.
    fn listing_query(&self, page_number: u32) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("apiKey", self.config.api_key.clone()),
            ("language", self.config.language.clone()),
            ("pageSize", self.config.page_size.to_string()),
        ];
        if page_number > 1 {
            query.push(("pageNumber", page_number.to_string()));
        }
        query
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> ClosureResult<T> {
        let start = Instant::now();

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| ClosureError::RemoteService {
                url: url.to_string(),
                status: None,
                message: format!("Request failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClosureError::RemoteService {
                url: url.to_string(),
                status: Some(status.as_u16()),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClosureError::RemoteService {
                url: url.to_string(),
                status: Some(status.as_u16()),
                message: format!("Failed to read response body: {}", e),
            })?;

        debug!(
            url,
            bytes = body.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Fetched"
        );

        serde_json::from_str(&body).map_err(|e| ClosureError::Schema {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl TerminologyService for UtsClient {
    #[instrument(skip(self))]
    async fn atoms_page(&self, cui: &Cui, page_number: u32) -> ClosureResult<Page<AtomRecord>> {
        let url = self.atoms_url(cui);
        let listing: ListingResponse<AtomPayload> =
            self.get_json(&url, &self.listing_query(page_number)).await?;

        let atoms = listing
            .result
            .into_iter()
            .flatten()
            .map(AtomRecord::from)
            .collect();

        Ok(Page::new(
            atoms,
            page_number,
            listing.page_count.unwrap_or(1),
        ))
    }

    #[instrument(skip(self))]
    async fn descendants_page(&self, url: &str, page_number: u32) -> ClosureResult<Page<Cui>> {
        let listing: ListingResponse<DescendantPayload> =
            self.get_json(url, &self.listing_query(page_number)).await?;

        let mut cuis = Vec::with_capacity(listing.result.len());
        for entry in listing.result.into_iter().flatten() {
            let cui = Cui::from_concept_url(&entry.concept).ok_or_else(|| ClosureError::Schema {
                url: url.to_string(),
                message: format!("Concept locator has no identifier: {:?}", entry.concept),
            })?;
            cuis.push(cui);
        }

        Ok(Page::new(cuis, page_number, listing.page_count.unwrap_or(1)))
    }

    #[instrument(skip(self))]
    async fn concept_name(&self, cui: &Cui) -> ClosureResult<String> {
        let url = self.concept_url(cui);
        let query = [("apiKey", self.config.api_key.clone())];
        let concept: ConceptResponse = self.get_json(&url, &query).await?;
        Ok(concept.result.name)
    }
}
