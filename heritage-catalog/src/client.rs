//! HTTP client for the remote heritage catalog service.
//!
//! One call is one round trip: no retries, no caching and no de-duplication
//! between callers. Every failure is mapped onto [`CatalogError`].

use crate::config::CatalogConfig;
use crate::envelope::decode_catalog;
use crate::error::{CatalogError, CatalogResult};
use crate::query::CatalogQuery;
use crate::types::{CatalogQueryResult, HeritageModel};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Client for the catalog endpoint.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl CatalogClient {
    /// Build a client from configuration, validating the endpoint.
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        let endpoint = validate_endpoint(&config.endpoint)?;
        let timeout = config.timeout();
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| CatalogError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST `{}` to the endpoint and decode the enveloped model list.
    ///
    /// # Errors
    ///
    /// * `CatalogError::Transport` / `CatalogError::Timeout` - no response
    /// * `CatalogError::Status` - non-2xx response
    /// * `CatalogError::Envelope` / `CatalogError::Body` - undecodable body
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch_catalog(&self) -> CatalogResult<Vec<HeritageModel>> {
        debug!("Requesting heritage catalog");
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body("{}")
            .send()
            .await
            .map_err(|e| CatalogError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        debug!("Received HTTP response: {}", status);
        if !status.is_success() {
            warn!("Catalog request rejected with status {}", status);
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CatalogError::from_reqwest(e, self.timeout))?;
        let models = decode_catalog(&bytes)?;
        info!("Fetched {} heritage models", models.len());
        Ok(models)
    }

    /// Fetch, decode, filter and limit, folding any failure into the result.
    ///
    /// The returned result is always settled (`Ready` or `Failed`).
    pub async fn query(&self, query: &CatalogQuery) -> CatalogQueryResult {
        let outcome = self.fetch_catalog().await.map(|models| query.apply(models));
        if let Err(e) = &outcome {
            warn!(kind = ?e.kind(), "Catalog load failed: {}", e);
        }
        CatalogQueryResult::from_outcome(outcome)
    }
}

fn validate_endpoint(endpoint: &str) -> CatalogResult<Url> {
    let url = Url::parse(endpoint).map_err(|e| CatalogError::InvalidEndpoint {
        url: endpoint.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(CatalogError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: format!("unsupported scheme: {scheme}"),
        }),
    }
}
