//! Failures of the backing drug service.

use thiserror::Error;

/// Why a service call produced no usable payload.
///
/// An empty result is not an error; it arrives as `Ok` with an empty list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Service returned status {status}")]
    Status { status: u16 },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Transport-level failure, as opposed to a bad answer from a reachable service.
    pub fn is_network(&self) -> bool {
        matches!(self, ServiceError::Network(_))
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::Malformed(e.to_string())
    }
}
