use crate::ValidationError;

/// Fallback shown when a failure carries no usable detail.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred during analysis";

/// Failure of an analysis attempt once it left the validation stage.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("No response from server. Please ensure the backend is running.")]
    Unreachable,
    #[error("{0}")]
    ServiceRejected(String),
    #[error("An error occurred while analyzing the resume")]
    ClientError(String),
    #[error("The analysis service returned an unexpected response")]
    MalformedResult(String),
}

impl AnalysisError {
    /// Text for the error banner. Falls back to a generic message when the
    /// service rejected the request without saying why.
    pub fn display_message(&self) -> String {
        match self {
            AnalysisError::ServiceRejected(detail) if detail.trim().is_empty() => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Anything the orchestrator can surface to the user.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl SessionError {
    pub fn display_message(&self) -> String {
        match self {
            SessionError::Validation(err) => err.to_string(),
            SessionError::Analysis(err) => err.display_message(),
        }
    }
}
