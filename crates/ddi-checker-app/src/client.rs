//! HTTP implementation of the drug service.

use std::time::Duration;

use ddi_checker_core::service::{
    CheckRequest, CheckResponse, SearchRequest, SearchResponse, CHECK_PATH, HEALTH_PATH,
    SEARCH_PATH,
};
use ddi_checker_core::{Drug, DrugService, HealthReport, InteractionResult, ServiceError, ServiceResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// JSON-over-HTTP client for the search, check and health endpoints.
#[derive(Debug, Clone)]
pub struct HttpDrugService {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpDrugService {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn transport_error(&self, e: reqwest::Error) -> ServiceError {
        if e.is_timeout() {
            ServiceError::Network(format!("Request timed out after {}s", self.timeout.as_secs()))
        } else if e.is_connect() {
            ServiceError::Network(format!("Cannot reach {}", self.base_url))
        } else if e.is_decode() {
            ServiceError::Malformed(e.to_string())
        } else {
            ServiceError::Network(e.to_string())
        }
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> ServiceResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl DrugService for HttpDrugService {
    async fn search_drugs(&self, query: &str) -> ServiceResult<Vec<Drug>> {
        let request = SearchRequest {
            query: query.to_string(),
        };
        let response: SearchResponse = self.post_json(SEARCH_PATH, &request).await?;
        Ok(response.drugs)
    }

    async fn check_interactions(&self, drugs: &[String]) -> ServiceResult<Vec<InteractionResult>> {
        let request = CheckRequest {
            drugs: drugs.to_vec(),
        };
        let response: CheckResponse = self.post_json(CHECK_PATH, &request).await?;
        Ok(response.interactions)
    }

    async fn health(&self) -> ServiceResult<HealthReport> {
        let url = self.url(HEALTH_PATH);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
            });
        }

        // Status alone decides health; an unreadable body is not a failure
        let report = match response.json::<HealthReport>().await {
            Ok(report) => report,
            Err(e) => {
                debug!(error = %e, "Health body not understood");
                HealthReport::default()
            }
        };
        Ok(report)
    }
}
