//! Contract of the remote drug service and its wire format.
//!
//! ```text
//! POST /search_drugs/        {"query": "..."}        -> {"drugs": [Drug]}
//! POST /check_interactions/  {"drugs": ["a", "b"]}   -> {"interactions": [InteractionResult]}
//! GET  /health                                       -> 2xx when healthy
//! ```

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::ServiceResult;
use crate::models::{Drug, InteractionResult};

pub const SEARCH_PATH: &str = "/search_drugs/";
pub const CHECK_PATH: &str = "/check_interactions/";
pub const HEALTH_PATH: &str = "/health";

/// Body of a search request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRequest {
    pub query: String,
}

/// Body of a search response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub drugs: Vec<Drug>,
}

/// Body of a check request. Names are sent in selection order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckRequest {
    pub drugs: Vec<String>,
}

/// Body of a check response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckResponse {
    pub interactions: Vec<InteractionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_interactions: Option<usize>,
}

/// Health payload. Only the status code decides health; the body is informational.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HealthReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data_loaded: Option<bool>,
}

/// The three operations of the drug service.
///
/// Implementations must not panic on failure; every problem is reported as a
/// [`ServiceError`](crate::ServiceError).
pub trait DrugService: Send + Sync {
    fn search_drugs(&self, query: &str) -> impl Future<Output = ServiceResult<Vec<Drug>>> + Send;

    fn check_interactions(
        &self,
        drugs: &[String],
    ) -> impl Future<Output = ServiceResult<Vec<InteractionResult>>> + Send;

    fn health(&self) -> impl Future<Output = ServiceResult<HealthReport>> + Send;
}
