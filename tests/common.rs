//! Shared helpers for integration tests
//!
//! Builds registries pointing at a wiremock server and provides hand-written
//! fakes for the notification seam.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use stream_llm::core_types::credentials::BEARER_TOKEN_KEY;
use stream_llm::{
    bearer_token_header, citation_format, CredentialStore, CredentialVault, HeaderBuilder,
    ModelDescriptor, OutputFormatter, ProviderDescriptor, ProviderId, ProviderRegistry,
    UsageNotifier,
};

pub const TEST_TOKEN: &str = "test-token";

/// A registry with an OpenAI-style and a Perplexity-style provider, both
/// pointed at the mock server.
pub fn test_registry(base_url: &str) -> ProviderRegistry {
    ProviderRegistry::new(vec![
        ProviderDescriptor {
            id: ProviderId::OpenAi,
            title: "OpenAI",
            base_url: base_url.to_string(),
            chat_completion_path: "/v1/chat/completions".to_string(),
            models_path: Some("/v1/models".to_string()),
            headers: vec![("Authorization", bearer_token_header as HeaderBuilder)],
            featured_models: vec!["gpt-4.1-mini".to_string()],
            output_formatter: None,
            availability_checker: None,
        },
        ProviderDescriptor {
            id: ProviderId::Perplexity,
            title: "Perplexity",
            base_url: base_url.to_string(),
            chat_completion_path: "/async/chat/completions".to_string(),
            models_path: None,
            headers: vec![("Authorization", bearer_token_header as HeaderBuilder)],
            featured_models: vec!["sonar".to_string()],
            output_formatter: Some(citation_format as OutputFormatter),
            availability_checker: None,
        },
    ])
    .expect("test registry is valid")
}

/// A vault with the bearer token configured for the given providers.
pub async fn vault_with_tokens(
    registry: &ProviderRegistry,
    providers: &[ProviderId],
) -> CredentialVault {
    let vault = CredentialVault::in_memory(registry);
    for id in providers {
        vault
            .store_for(*id)
            .expect("provider registered")
            .set(BEARER_TOKEN_KEY, TEST_TOKEN.to_string())
            .await;
    }
    vault
}

/// Notifier that records every model uid it sees.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    used: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn used_uids(&self) -> Vec<String> {
        self.used.lock().expect("notifier mutex poisoned").clone()
    }
}

impl UsageNotifier for RecordingNotifier {
    fn model_used(&self, model: &ModelDescriptor) {
        self.used
            .lock()
            .expect("notifier mutex poisoned")
            .push(model.uid());
    }
}

/// An SSE body with one `data:` line per delta fragment, terminated by the
/// sentinel.
pub fn delta_stream_body(fragments: &[&str]) -> String {
    let mut body = String::new();
    for fragment in fragments {
        body.push_str(&format!(
            "data: {{\"choices\":[{{\"delta\":{{\"content\":\"{fragment}\"}}}}]}}\n\n"
        ));
    }
    body.push_str("data: [DONE]\n\n");
    body
}
