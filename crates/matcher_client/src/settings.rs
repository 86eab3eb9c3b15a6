use std::time::Duration;

use matcher_core::FailurePolicy;
use url::Url;

use crate::TransportError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// HTTP settings for [`crate::ReqwestTransport`]. No timeouts apply unless set.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl ClientSettings {
    pub fn with_base_url(base_url: &str) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url).map_err(|err| {
            TransportError::ClientError(format!("invalid service url {base_url:?}: {err}"))
        })?;
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }

    /// Absolute URL of an endpoint below the base address. Keeps any path
    /// prefix the base already has.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OrchestratorSettings {
    /// Upper bound on one analysis request; expiry counts as unreachable.
    pub deadline: Option<Duration>,
    pub failure_policy: FailurePolicy,
}
