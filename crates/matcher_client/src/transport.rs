use matcher_core::ResumeFile;
use matcher_logging::{matcher_debug, matcher_info};
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::{ClientSettings, HealthStatus, TransportError, DEFAULT_REJECTION_DETAIL};

const ANALYZE_PATH: &str = "api/analyze";
const HEALTH_PATH: &str = "api/health";

/// One request per call, no retries.
#[async_trait::async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// Uploads the resume and job description; returns the raw response body.
    async fn submit_analysis(
        &self,
        resume: &ResumeFile,
        job_description: &str,
    ) -> Result<Value, TransportError>;

    async fn check_health(&self) -> Result<HealthStatus, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    settings: ClientSettings,
}

impl ReqwestTransport {
    pub fn new(settings: ClientSettings) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TransportError::ClientError(err.to_string()))?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn build_form(resume: &ResumeFile, job_description: &str) -> Result<Form, TransportError> {
        let part = Part::stream_with_length(resume.content().clone(), resume.len() as u64)
            .file_name(resume.name().to_string())
            .mime_str(resume.media_type())
            .map_err(|err| TransportError::ClientError(err.to_string()))?;
        Ok(Form::new()
            .part("resume", part)
            .text("job_description", job_description.to_string()))
    }
}

#[async_trait::async_trait]
impl AnalysisTransport for ReqwestTransport {
    async fn submit_analysis(
        &self,
        resume: &ResumeFile,
        job_description: &str,
    ) -> Result<Value, TransportError> {
        let url = self.settings.endpoint(ANALYZE_PATH);
        let form = Self::build_form(resume, job_description)?;
        matcher_debug!(
            "POST {} resume={} bytes={} job_description_len={}",
            url,
            resume.name(),
            resume.len(),
            job_description.len()
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error);
        if !status.is_success() {
            let detail = body
                .ok()
                .and_then(|body| rejection_detail(&body))
                .unwrap_or_else(|| DEFAULT_REJECTION_DETAIL.to_string());
            return Err(TransportError::ServiceRejected {
                status: status.as_u16(),
                detail,
            });
        }

        let body = body?;
        matcher_info!("Analysis response received: {} bytes", body.len());
        serde_json::from_slice(&body).map_err(|err| {
            TransportError::ClientError(format!("response body is not valid JSON: {err}"))
        })
    }

    async fn check_health(&self) -> Result<HealthStatus, TransportError> {
        let url = self.settings.endpoint(HEALTH_PATH);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| TransportError::Unreachable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Unreachable(format!(
                "health check returned {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| TransportError::Unreachable(err.to_string()))?;
        Ok(serde_json::from_slice(&body).unwrap_or_default())
    }
}

/// Pulls `detail` out of an error body. Non-string details (e.g. a list of
/// field errors) count as missing.
fn rejection_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get("detail")?.as_str().map(ToOwned::to_owned)
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        return TransportError::ClientError(err.to_string());
    }
    if err.is_timeout() || err.is_connect() || err.is_request() {
        return TransportError::Unreachable(err.to_string());
    }
    TransportError::ClientError(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_taken_from_string_field_only() {
        assert_eq!(
            rejection_detail(br#"{"detail": "Empty file uploaded"}"#).as_deref(),
            Some("Empty file uploaded")
        );
        assert_eq!(rejection_detail(br#"{"detail": [{"loc": ["body"]}]}"#), None);
        assert_eq!(rejection_detail(br#"{"error": "nope"}"#), None);
        assert_eq!(rejection_detail(b"<html>502</html>"), None);
    }
}
