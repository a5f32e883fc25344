//! GCP Secret Manager source tests against a mock REST endpoint.

#![cfg(feature = "gcp")]

use secretconf::{GcpSecretManager, Resolver, SecretSource, SourceError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET_PATH: &str = "/v1/projects/demo-project/secrets/API_KEY/versions/latest:access";

fn client(server: &MockServer) -> GcpSecretManager {
    GcpSecretManager::new("demo-project", "test-token")
        .unwrap()
        .with_base_url(server.uri())
}

fn payload(encoded: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "projects/demo-project/secrets/API_KEY/versions/3",
        "payload": { "data": encoded }
    })
}

#[tokio::test]
async fn test_fetch_decodes_payload() {
    let server = MockServer::start().await;

    // "s3cr3t" in standard base64
    Mock::given(method("GET"))
        .and(path(SECRET_PATH))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload("czNjcjN0")))
        .expect(1)
        .mount(&server)
        .await;

    let source = client(&server);
    assert_eq!(source.fetch("API_KEY").await.unwrap(), "s3cr3t");
}

#[tokio::test]
async fn test_fetch_missing_secret() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SECRET_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": { "code": 404, "status": "NOT_FOUND" }
        })))
        .mount(&server)
        .await;

    let err = client(&server).fetch("API_KEY").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_fetch_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SECRET_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("permission denied"))
        .mount(&server)
        .await;

    let err = client(&server).fetch("API_KEY").await.unwrap_err();
    match err {
        SourceError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "permission denied");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_invalid_base64() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SECRET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload("not base64!")))
        .mount(&server)
        .await;

    let err = client(&server).fetch("API_KEY").await.unwrap_err();
    assert!(matches!(err, SourceError::Decode(_)));
}

#[tokio::test]
async fn test_empty_key_is_rejected_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).fetch("").await.unwrap_err();
    assert!(matches!(err, SourceError::InvalidKey { .. }));
}

#[tokio::test]
async fn test_key_outside_secret_name_charset_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload("czNjcjN0")))
        .expect(0)
        .mount(&server)
        .await;

    let source = client(&server);
    for key in ["OTHER/versions/1", "API_KEY?alt=json", "API_KEY#frag", "..", "API KEY"] {
        let err = source.fetch(key).await.unwrap_err();
        assert!(
            matches!(err, SourceError::InvalidKey { .. }),
            "{key} should be rejected, got {err:?}"
        );
    }
}

#[test]
fn test_empty_project_is_rejected() {
    let err = GcpSecretManager::new("", "token").unwrap_err();
    assert!(matches!(err, SourceError::InvalidKey { .. }));
}

#[test]
fn test_debug_redacts_token() {
    let source = GcpSecretManager::new("demo-project", "very-secret-token").unwrap();
    let rendered = format!("{source:?}");
    assert!(rendered.contains("demo-project"));
    assert!(!rendered.contains("very-secret-token"));
}

#[tokio::test]
async fn test_resolver_falls_back_when_store_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let resolver = Resolver::builder()
        .environment(std::collections::HashMap::<String, String>::new())
        .source(client(&server))
        .build();

    assert_eq!(
        resolver.resolve("sm://API_KEY||local-key").await.unwrap(),
        "local-key"
    );
}
