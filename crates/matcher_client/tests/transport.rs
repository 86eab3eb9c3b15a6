use std::time::Duration;

use matcher_client::{
    AnalysisTransport, ClientSettings, HealthStatus, ReqwestTransport, TransportError,
    DEFAULT_REJECTION_DETAIL,
};
use matcher_core::ResumeFile;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(server: &MockServer) -> ReqwestTransport {
    let settings = ClientSettings::with_base_url(&server.uri()).expect("mock uri parses");
    ReqwestTransport::new(settings).expect("client builds")
}

fn resume() -> ResumeFile {
    ResumeFile::new("jane_doe.pdf", b"%PDF-1.4 plain ascii body".to_vec()).unwrap()
}

const JOB: &str = "Senior Rust engineer building distributed storage systems at scale.";

#[tokio::test]
async fn analyze_posts_multipart_and_returns_raw_body() {
    let server = MockServer::start().await;
    let payload = json!({"ats_score": 72.5, "overall_feedback": "Good match", "extra": [1, 2]});
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .and(body_string_contains("name=\"resume\"; filename=\"jane_doe.pdf\""))
        .and(body_string_contains("application/pdf"))
        .and(body_string_contains("name=\"job_description\""))
        .and(body_string_contains(JOB))
        .and(body_string_contains("%PDF-1.4 plain ascii body"))
        .and(header_exists("content-length"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .expect(1)
        .mount(&server)
        .await;

    let body = transport_for(&server)
        .submit_analysis(&resume(), JOB)
        .await
        .expect("analysis ok");

    // Returned untouched; unknown fields included.
    assert_eq!(body, payload);
}

#[tokio::test]
async fn error_detail_becomes_service_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Empty file uploaded"})),
        )
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .submit_analysis(&resume(), JOB)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TransportError::ServiceRejected {
            status: 400,
            detail: "Empty file uploaded".to_string(),
        }
    );
}

#[tokio::test]
async fn error_without_detail_falls_back_to_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/prefixed/api/analyze"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"detail": [{"msg": "field required"}]})),
        )
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .submit_analysis(&resume(), JOB)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TransportError::ServiceRejected {
            status: 500,
            detail: DEFAULT_REJECTION_DETAIL.to_string(),
        }
    );

    let settings =
        ClientSettings::with_base_url(&format!("{}/prefixed", server.uri())).unwrap();
    let err = ReqwestTransport::new(settings)
        .unwrap()
        .submit_analysis(&resume(), JOB)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TransportError::ServiceRejected {
            status: 422,
            detail: DEFAULT_REJECTION_DETAIL.to_string(),
        }
    );
}

#[tokio::test]
async fn refused_connection_is_unreachable() {
    // Port 1 is reserved and nothing listens on it.
    let settings = ClientSettings::with_base_url("http://127.0.0.1:1").unwrap();
    let err = ReqwestTransport::new(settings)
        .unwrap()
        .submit_analysis(&resume(), JOB)
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Unreachable(_)), "{err:?}");
}

#[tokio::test]
async fn configured_timeout_is_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"ats_score": 1, "overall_feedback": "slow"})),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..ClientSettings::with_base_url(&server.uri()).unwrap()
    };
    let err = ReqwestTransport::new(settings)
        .unwrap()
        .submit_analysis(&resume(), JOB)
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Unreachable(_)), "{err:?}");
}

#[tokio::test]
async fn non_json_success_body_is_client_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy page</html>"))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .submit_analysis(&resume(), JOB)
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::ClientError(_)), "{err:?}");
}

#[tokio::test]
async fn health_check_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "message": "ATS Resume Matcher API is running"
        })))
        .mount(&server)
        .await;

    let status = transport_for(&server).check_health().await.expect("healthy");
    assert_eq!(
        status,
        HealthStatus {
            status: "healthy".to_string(),
            message: "ATS Resume Matcher API is running".to_string(),
        }
    );
}

#[tokio::test]
async fn health_check_tolerates_unexpected_body_but_not_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let status = transport_for(&server).check_health().await.expect("reachable");
    assert_eq!(status, HealthStatus::default());

    let failing = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&failing)
        .await;

    let err = transport_for(&failing).check_health().await.unwrap_err();
    assert!(matches!(err, TransportError::Unreachable(_)));
}
