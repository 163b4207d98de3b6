//! Provider registry and header builders
//!
//! The catalog of provider descriptors: identity, endpoints, header-building
//! strategy, availability check, optional output formatter, and the featured
//! model list. Per-provider behavioral variation is expressed as descriptor
//! data (plain function fields), not as trait hierarchies, so adding a
//! provider is one catalog entry.
//!
//! The registry is constructed explicitly (usually via
//! [`ProviderRegistry::with_default_providers`]) and injected into the
//! client; nothing here is process-global.

use crate::core_types::credentials::{CredentialStore, BEARER_TOKEN_KEY};
use crate::core_types::model::ModelDescriptor;
use crate::error::{LlmError, LlmResult};
use crate::format::{citation_format, OutputFormatter};
use crate::logging::log_debug;
use futures_util::future::BoxFuture;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identity of a supported provider.
///
/// Display names are lowercase and never contain `:`, which keeps model uids
/// (`provider:model`) unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenAi,
    DeepSeek,
    Perplexity,
    OpenRouter,
}

impl ProviderId {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::DeepSeek => "deepseek",
            ProviderId::Perplexity => "perplexity",
            ProviderId::OpenRouter => "openrouter",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(ProviderId::OpenAi),
            "deepseek" => Ok(ProviderId::DeepSeek),
            "perplexity" => Ok(ProviderId::Perplexity),
            "openrouter" => Ok(ProviderId::OpenRouter),
            other => Err(LlmError::ProviderNotFound {
                provider: other.to_string(),
            }),
        }
    }
}

/// Per-header strategy: asynchronously produce a header value from the
/// provider's credential store. Resolving to `None` omits the header.
pub type HeaderBuilder = for<'a> fn(&'a dyn CredentialStore) -> BoxFuture<'a, Option<String>>;

/// Custom availability strategy for providers where "has a bearer token" is
/// not the right check.
pub type AvailabilityChecker = for<'a> fn(&'a dyn CredentialStore) -> BoxFuture<'a, bool>;

/// Standard `Authorization: Bearer {token}` header from the credential store.
///
/// Resolves to `None` when no token (or an empty one) is stored, omitting the
/// header entirely.
pub fn bearer_token_header(store: &dyn CredentialStore) -> BoxFuture<'_, Option<String>> {
    Box::pin(async move {
        store
            .get(BEARER_TOKEN_KEY)
            .await
            .filter(|token| !token.is_empty())
            .map(|token| format!("Bearer {token}"))
    })
}

/// Static catalog entry for one provider. Immutable after registration.
#[derive(Clone)]
pub struct ProviderDescriptor {
    /// Unique provider identity
    pub id: ProviderId,
    /// Human-readable provider name
    pub title: &'static str,
    /// API root, no trailing slash
    pub base_url: String,
    /// Path appended to `base_url` for streaming chat completions
    pub chat_completion_path: String,
    /// Path appended to `base_url` for model listing, when supported
    pub models_path: Option<String>,
    /// Header-building strategies, applied in order
    pub headers: Vec<(&'static str, HeaderBuilder)>,
    /// Featured model ids, in display order
    pub featured_models: Vec<String>,
    /// Post-formatter applied to emitted text; identity when absent
    pub output_formatter: Option<OutputFormatter>,
    /// Availability strategy; bearer-token presence when absent
    pub availability_checker: Option<AvailabilityChecker>,
}

impl ProviderDescriptor {
    /// Full URL of the streaming chat completion endpoint.
    pub fn chat_completion_url(&self) -> String {
        format!("{}{}", self.base_url, self.chat_completion_path)
    }

    /// Whether this provider is usable right now.
    ///
    /// Defaults to "a non-empty bearer token exists in the credential store"
    /// unless the descriptor carries a custom checker. Reads the store only.
    pub async fn is_available(&self, store: &dyn CredentialStore) -> bool {
        match self.availability_checker {
            Some(check) => check(store).await,
            None => store
                .get(BEARER_TOKEN_KEY)
                .await
                .is_some_and(|token| !token.is_empty()),
        }
    }

    /// Build request headers from the descriptor's strategies.
    ///
    /// Builders resolving to `None` or an empty string are omitted.
    /// `Content-Type: application/json` is always set afterwards.
    pub async fn build_headers(&self, store: &dyn CredentialStore) -> LlmResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        for (name, builder) in &self.headers {
            let Some(value) = builder(store).await else {
                continue;
            };
            if value.is_empty() {
                continue;
            }

            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                LlmError::configuration_error(format!("Invalid header name {name}: {e}"))
            })?;
            let header_value = HeaderValue::from_str(&value).map_err(|e| {
                LlmError::configuration_error(format!("Invalid value for header {name}: {e}"))
            })?;
            headers.insert(header_name, header_value);
        }

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Featured models as full descriptors, in catalog order.
    pub fn featured_model_descriptors(&self) -> Vec<ModelDescriptor> {
        self.featured_models
            .iter()
            .map(|model_id| {
                ModelDescriptor::new(self.id, model_id.clone())
                    .with_title(format!("{} — {}", self.title, model_id))
            })
            .collect()
    }
}

impl std::fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("id", &self.id)
            .field("base_url", &self.base_url)
            .field("chat_completion_path", &self.chat_completion_path)
            .field("models_path", &self.models_path)
            .field("featured_models", &self.featured_models)
            .field("has_output_formatter", &self.output_formatter.is_some())
            .field(
                "has_availability_checker",
                &self.availability_checker.is_some(),
            )
            .finish()
    }
}

/// Static catalog of provider descriptors.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: Vec<ProviderDescriptor>,
}

impl ProviderRegistry {
    /// Build a registry from explicit descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigurationError`] when two descriptors share an id.
    pub fn new(providers: Vec<ProviderDescriptor>) -> LlmResult<Self> {
        for (index, descriptor) in providers.iter().enumerate() {
            if providers[..index].iter().any(|p| p.id == descriptor.id) {
                return Err(LlmError::configuration_error(format!(
                    "Duplicate provider registration: {}",
                    descriptor.id
                )));
            }
        }

        log_debug!(
            provider_count = providers.len(),
            "Provider registry created"
        );
        Ok(Self { providers })
    }

    /// Build the default catalog: OpenAI, DeepSeek, Perplexity, OpenRouter.
    pub fn with_default_providers() -> LlmResult<Self> {
        Self::new(default_descriptors())
    }

    /// Look up a provider descriptor by id.
    pub fn resolve(&self, id: ProviderId) -> LlmResult<&ProviderDescriptor> {
        self.providers
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| LlmError::provider_not_found(id.as_str()))
    }

    /// Registered provider ids, in registration order.
    pub fn provider_ids(&self) -> impl Iterator<Item = ProviderId> + '_ {
        self.providers.iter().map(|p| p.id)
    }

    /// Registered descriptors, in registration order.
    pub fn providers(&self) -> &[ProviderDescriptor] {
        &self.providers
    }

    /// Featured models of one provider, empty when the id is unregistered.
    pub fn featured_models(&self, id: ProviderId) -> Vec<ModelDescriptor> {
        self.resolve(id)
            .map(|p| p.featured_model_descriptors())
            .unwrap_or_default()
    }

    /// Resolve a featured model by its composite uid.
    ///
    /// Returns `None` for unknown provider ids and for models outside the
    /// provider's featured list.
    pub fn model_by_uid(&self, uid: &str) -> Option<ModelDescriptor> {
        let parsed = ModelDescriptor::from_uid(uid)?;
        let provider = self.resolve(parsed.provider_id).ok()?;
        provider
            .featured_model_descriptors()
            .into_iter()
            .find(|m| m.model_id == parsed.model_id)
    }
}

/// The default provider catalog.
fn default_descriptors() -> Vec<ProviderDescriptor> {
    vec![
        ProviderDescriptor {
            id: ProviderId::OpenAi,
            title: "OpenAI",
            base_url: "https://api.openai.com/v1".to_string(),
            chat_completion_path: "/chat/completions".to_string(),
            models_path: Some("/models".to_string()),
            headers: vec![("Authorization", bearer_token_header as HeaderBuilder)],
            featured_models: vec!["gpt-4.1-mini".to_string(), "gpt-4.1-nano".to_string()],
            output_formatter: None,
            availability_checker: None,
        },
        ProviderDescriptor {
            id: ProviderId::DeepSeek,
            title: "DeepSeek",
            base_url: "https://api.deepseek.com/v1".to_string(),
            chat_completion_path: "/chat/completions".to_string(),
            models_path: Some("/models".to_string()),
            headers: vec![("Authorization", bearer_token_header as HeaderBuilder)],
            featured_models: vec![
                "deepseek-chat".to_string(),
                "deepseek-reasoner".to_string(),
            ],
            output_formatter: None,
            availability_checker: None,
        },
        ProviderDescriptor {
            id: ProviderId::Perplexity,
            title: "Perplexity",
            base_url: "https://api.perplexity.ai".to_string(),
            chat_completion_path: "/async/chat/completions".to_string(),
            models_path: None,
            headers: vec![("Authorization", bearer_token_header as HeaderBuilder)],
            featured_models: vec!["sonar".to_string(), "sonar-pro".to_string()],
            output_formatter: Some(citation_format as OutputFormatter),
            availability_checker: None,
        },
        ProviderDescriptor {
            id: ProviderId::OpenRouter,
            title: "OpenRouter",
            base_url: "https://openrouter.ai/api/v1".to_string(),
            chat_completion_path: "/chat/completions".to_string(),
            models_path: Some("/models".to_string()),
            headers: vec![("Authorization", bearer_token_header as HeaderBuilder)],
            featured_models: vec![
                "qwen/qwen3-14b".to_string(),
                "qwen/qwen-2.5-coder-32b-instruct".to_string(),
                "meta-llama/llama-3.3-70b-instruct".to_string(),
                "qwen/qwen3-235b-a22b".to_string(),
                "x-ai/grok-3-beta".to_string(),
                "anthropic/claude-sonnet-4".to_string(),
                "google/gemini-2.5-flash".to_string(),
                "google/gemini-2.5-pro".to_string(),
            ],
            output_formatter: None,
            availability_checker: None,
        },
    ]
}
