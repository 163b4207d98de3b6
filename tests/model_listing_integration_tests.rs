//! Integration Tests for Model Listing
//!
//! UNIT UNDER TEST: ChatStreamClient::list_models
//!
//! BUSINESS RESPONSIBILITY:
//!   - Fetch the provider's model catalog from its models endpoint
//!   - Reuse the provider's header-building strategy for authentication
//!   - Reject providers without a model listing endpoint
//!
//! TEST COVERAGE:
//!   - Successful listing and descriptor mapping
//!   - Providers without a models endpoint
//!   - HTTP error propagation

mod common;

use common::{test_registry, vault_with_tokens, TEST_TOKEN};
use stream_llm::{ChatStreamClient, LlmError, ProviderId};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_list_models_maps_entries_to_descriptors() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .and(header("Authorization", format!("Bearer {TEST_TOKEN}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "object": "list",
            "data": [
                {"id": "gpt-4.1-mini", "object": "model"},
                {"id": "gpt-4.1-nano", "object": "model"},
            ],
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let registry = test_registry(&mock_server.uri());
    let vault = vault_with_tokens(&registry, &[ProviderId::OpenAi]).await;
    let client = ChatStreamClient::new(registry, vault).unwrap();

    let models = client.list_models(ProviderId::OpenAi).await.unwrap();

    assert_eq!(models.len(), 2);
    assert_eq!(models[0].uid(), "openai:gpt-4.1-mini");
    assert_eq!(models[1].uid(), "openai:gpt-4.1-nano");
}

#[tokio::test]
async fn test_list_models_rejected_for_provider_without_endpoint() {
    let mock_server = MockServer::start().await;

    let registry = test_registry(&mock_server.uri());
    let vault = vault_with_tokens(&registry, &[ProviderId::Perplexity]).await;
    let client = ChatStreamClient::new(registry, vault).unwrap();

    let result = client.list_models(ProviderId::Perplexity).await;

    assert!(matches!(result, Err(LlmError::ConfigurationError { .. })));
}

#[tokio::test]
async fn test_list_models_propagates_http_errors() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&mock_server)
        .await;

    let registry = test_registry(&mock_server.uri());
    let vault = vault_with_tokens(&registry, &[ProviderId::OpenAi]).await;
    let client = ChatStreamClient::new(registry, vault).unwrap();

    let result = client.list_models(ProviderId::OpenAi).await;

    match result {
        Err(LlmError::Http { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "unauthorized");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}
