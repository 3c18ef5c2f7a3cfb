//! Integration tests for the Hugging Face summarization backend.
//!
//! A wiremock server stands in for the hosted inference API.

use cta_core::{Error, SummarizationBackend, SummarizationError};
use cta_inference::{HuggingFaceBackend, HuggingFaceConfig};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/facebook/bart-large-cnn";

fn backend_for(server: &MockServer) -> HuggingFaceBackend {
    HuggingFaceBackend::new(HuggingFaceConfig {
        base_url: server.uri(),
        api_key: Some("hf_test_token".to_string()),
        timeout_seconds: 5,
        ..Default::default()
    })
    .expect("Failed to create backend")
}

#[tokio::test]
async fn test_summary_returned_from_first_item() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("Authorization", "Bearer hf_test_token"))
        .and(body_json(serde_json::json!({"inputs": "Agreement text"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"summary_text": "  The sponsor funds a phase II study.  "}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let summary = backend.summarize("Agreement text").await.unwrap();

    assert_eq!(summary, "The sponsor funds a phase II study.");
    assert_eq!(backend.model_name(), "facebook/bart-large-cnn");
}

#[tokio::test]
async fn test_unauthorized_maps_to_invalid_credential() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"error": "Invalid credentials in Authorization header"})),
        )
        .mount(&mock_server)
        .await;

    let err = backend_for(&mock_server)
        .summarize("Agreement text")
        .await
        .unwrap_err();

    match err {
        Error::Summarization(SummarizationError::InvalidCredential { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials in Authorization header");
        }
        other => panic!("Expected InvalidCredential, got {:?}", other),
    }
}

#[tokio::test]
async fn test_service_unavailable_maps_to_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "error": "Model facebook/bart-large-cnn is currently loading",
            "estimated_time": 20.0
        })))
        .mount(&mock_server)
        .await;

    let err = backend_for(&mock_server)
        .summarize("Agreement text")
        .await
        .unwrap_err();

    match err {
        Error::Summarization(SummarizationError::Status { status, message }) => {
            assert_eq!(status, 503);
            assert!(message.contains("currently loading"));
        }
        other => panic!("Expected Status, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unexpected_shape_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"generated_text": "x"})),
        )
        .mount(&mock_server)
        .await;

    let err = backend_for(&mock_server)
        .summarize("Agreement text")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Summarization(SummarizationError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn test_empty_array_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let err = backend_for(&mock_server)
        .summarize("Agreement text")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Summarization(SummarizationError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let backend = HuggingFaceBackend::new(HuggingFaceConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        api_key: Some("hf_test_token".to_string()),
        timeout_seconds: 2,
        ..Default::default()
    })
    .unwrap();

    let err = backend.summarize("Agreement text").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Summarization(SummarizationError::Transport(_))
    ));
}
