//! Integration tests for the OpenAI-compatible summarization backend.

#![cfg(feature = "openai")]

use cta_core::{Error, SummarizationBackend, SummarizationError};
use cta_inference::openai::{OpenAIBackend, OpenAIConfig};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> OpenAIConfig {
    OpenAIConfig {
        base_url: server.uri(),
        api_key: Some("test-key".to_string()),
        gen_model: "test-gen".to_string(),
        timeout_seconds: 5,
    }
}

#[tokio::test]
async fn test_chat_completion_summary() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Sponsor: Acme Pharma."},
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = OpenAIBackend::new(config_for(&mock_server)).unwrap();
    let summary = backend.summarize("Agreement text").await.unwrap();

    assert_eq!(summary, "Sponsor: Acme Pharma.");
    assert_eq!(backend.model_name(), "test-gen");
}

#[tokio::test]
async fn test_forbidden_maps_to_invalid_credential() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": {"message": "Project does not have access", "type": "invalid_request_error"}
        })))
        .mount(&mock_server)
        .await;

    let backend = OpenAIBackend::new(config_for(&mock_server)).unwrap();
    let err = backend.summarize("Agreement text").await.unwrap_err();

    match err {
        Error::Summarization(e) => assert_eq!(
            e,
            SummarizationError::InvalidCredential {
                status: 403,
                message: "Project does not have access".to_string(),
            }
        ),
        other => panic!("Expected summarization error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_choices_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&mock_server)
        .await;

    let backend = OpenAIBackend::new(config_for(&mock_server)).unwrap();
    let err = backend.summarize("Agreement text").await.unwrap_err();

    assert!(matches!(
        err,
        Error::Summarization(SummarizationError::MalformedResponse(_))
    ));
}
