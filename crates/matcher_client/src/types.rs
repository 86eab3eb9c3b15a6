use matcher_core::AnalysisError;
use serde::{Deserialize, Serialize};

/// Message used when the service rejects a request without a usable `detail`.
pub const DEFAULT_REJECTION_DETAIL: &str = "Analysis failed";

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TransportError {
    /// No response arrived: connection refused, DNS failure, timeout.
    #[error("analysis service unreachable: {0}")]
    Unreachable(String),
    /// The service answered with an error status.
    #[error("analysis service rejected the request (http {status}): {detail}")]
    ServiceRejected { status: u16, detail: String },
    /// The request could not be built or sent, or the reply was unreadable.
    #[error("client error: {0}")]
    ClientError(String),
}

impl From<TransportError> for AnalysisError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Unreachable(_) => AnalysisError::Unreachable,
            TransportError::ServiceRejected { detail, .. } => {
                AnalysisError::ServiceRejected(detail)
            }
            TransportError::ClientError(message) => AnalysisError::ClientError(message),
        }
    }
}

/// Body of the liveness endpoint. Both fields are empty when the service
/// answered but did not describe itself.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}
