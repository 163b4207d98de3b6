//! Completion orchestrator
//!
//! [`ChatStreamClient`] ties the registry, credential vault, stream parser,
//! and output formatter together: resolve the provider, gate on availability,
//! publish the usage notification, issue the request, and drive the parser
//! loop until the stream ends, errors, or is cancelled.
//!
//! No retry exists at this layer. Every failure surfaces immediately; retry
//! policy, if desired, belongs to the caller.

use crate::core_types::credentials::CredentialVault;
use crate::core_types::events::{NoopUsageNotifier, UsageNotifier};
use crate::core_types::messages::ChatMessage;
use crate::core_types::model::ModelDescriptor;
use crate::error::{LlmError, LlmResult};
use crate::format::identity_format;
use crate::logging::log_debug;
use crate::registry::{ProviderId, ProviderRegistry};
use crate::stream::SseAccumulator;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Wire body of a streaming chat completion request.
///
/// `stream` is always true: this client does not support non-streaming
/// responses.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ModelListResponse {
    #[serde(default)]
    data: Vec<ModelListEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelListEntry {
    id: String,
}

/// Streaming chat completion client over a provider registry.
///
/// This is the primary interface of the crate. Construct one per application
/// with an explicitly built registry and credential vault; it is cheap to
/// clone handles out of via `Arc` and safe to share across tasks, since every
/// completion call owns its own accumulator.
pub struct ChatStreamClient {
    http: reqwest::Client,
    registry: ProviderRegistry,
    credentials: CredentialVault,
    notifier: Arc<dyn UsageNotifier>,
}

impl ChatStreamClient {
    /// Create a client over the given registry and credential vault.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigurationError`] if HTTP client
    /// initialization fails.
    pub fn new(registry: ProviderRegistry, credentials: CredentialVault) -> LlmResult<Self> {
        let http = reqwest::Client::builder().build().map_err(|e| {
            LlmError::configuration_error(format!("Failed to initialize HTTP client: {e}"))
        })?;

        log_debug!(
            provider_count = registry.providers().len(),
            "ChatStreamClient created"
        );

        Ok(Self {
            http,
            registry,
            credentials,
            notifier: Arc::new(NoopUsageNotifier),
        })
    }

    /// Replace the usage notifier.
    pub fn with_notifier(mut self, notifier: Arc<dyn UsageNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// The provider registry this client resolves against.
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// The credential vault this client reads from.
    pub fn credentials(&self) -> &CredentialVault {
        &self.credentials
    }

    /// Stream a chat completion, invoking `on_update` with display-ready text
    /// once per meaningful frame.
    ///
    /// Delta frames grow the displayed text monotonically; a full-message
    /// frame replaces it. Updates arrive strictly in frame order. Triggering
    /// `cancel` aborts the request or read loop promptly and completes the
    /// call with `Ok(())` and no further callbacks.
    ///
    /// # Errors
    ///
    /// - [`LlmError::ProviderNotFound`] when the model's provider is not registered
    /// - [`LlmError::ProviderUnavailable`] when the availability check fails
    ///   (both surfaced before any network I/O)
    /// - [`LlmError::Http`] on a non-success response status, body preserved
    /// - [`LlmError::RequestFailed`] on connection or mid-stream transport failures
    pub async fn stream_chat_completion(
        &self,
        model: &ModelDescriptor,
        messages: &[ChatMessage],
        mut on_update: impl FnMut(&str),
        cancel: Option<CancellationToken>,
    ) -> LlmResult<()> {
        let provider = self.registry.resolve(model.provider_id)?;
        let store = self
            .credentials
            .store_for(provider.id)
            .ok_or_else(|| LlmError::provider_unavailable(provider.id.as_str()))?;

        if !provider.is_available(store.as_ref()).await {
            return Err(LlmError::provider_unavailable(provider.id.as_str()));
        }

        // Exactly once per invocation, before the network call, regardless of
        // how the call itself ends.
        self.notifier.model_used(model);

        let cancel = cancel.unwrap_or_default();
        let url = provider.chat_completion_url();
        let headers = provider.build_headers(store.as_ref()).await?;
        let body = ChatCompletionRequest {
            model: &model.model_id,
            messages,
            stream: true,
        };

        log_debug!(
            provider = %provider.id,
            model = %model.model_id,
            message_count = messages.len(),
            url = %url,
            "Issuing streaming chat completion request"
        );

        let send = self.http.post(&url).headers(headers).json(&body).send();
        let response = tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            result = send => result.map_err(|e| {
                let message = format!("Failed to send chat completion request: {e}");
                LlmError::request_failed(message, Some(Box::new(e)))
            })?,
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::http_error(status.as_u16(), body));
        }

        let formatter = provider.output_formatter.unwrap_or(identity_format);
        let mut accumulator = SseAccumulator::new(formatter);
        let mut stream = response.bytes_stream();

        loop {
            let chunk = tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                chunk = stream.next() => chunk,
            };

            match chunk {
                Some(Ok(bytes)) => {
                    accumulator.push_chunk(&bytes, &mut |text| on_update(text));
                    if accumulator.is_done() {
                        break;
                    }
                }
                Some(Err(e)) => {
                    let message = format!("Stream read failed: {e}");
                    return Err(LlmError::request_failed(message, Some(Box::new(e))));
                }
                None => {
                    accumulator.finish(&mut |text| on_update(text));
                    break;
                }
            }
        }

        log_debug!(
            provider = %provider.id,
            model = %model.model_id,
            content_len = accumulator.content().len(),
            "Chat completion stream finished"
        );
        Ok(())
    }

    /// List the models a provider currently serves.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigurationError`] for providers without a model
    /// listing endpoint (Perplexity), plus the same resolution, availability,
    /// and HTTP errors as [`stream_chat_completion`](Self::stream_chat_completion).
    pub async fn list_models(&self, provider_id: ProviderId) -> LlmResult<Vec<ModelDescriptor>> {
        let provider = self.registry.resolve(provider_id)?;
        let models_path = provider.models_path.as_deref().ok_or_else(|| {
            LlmError::configuration_error(format!(
                "Provider {} has no model listing endpoint",
                provider.id
            ))
        })?;
        let store = self
            .credentials
            .store_for(provider.id)
            .ok_or_else(|| LlmError::provider_unavailable(provider.id.as_str()))?;

        let url = format!("{}{}", provider.base_url, models_path);
        let headers = provider.build_headers(store.as_ref()).await?;

        let response = self
            .http
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| {
                let message = format!("Failed to list models: {e}");
                LlmError::request_failed(message, Some(Box::new(e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::http_error(status.as_u16(), body));
        }

        let listing: ModelListResponse = response.json().await.map_err(|e| {
            let message = format!("Failed to parse model listing: {e}");
            LlmError::request_failed(message, Some(Box::new(e)))
        })?;

        Ok(listing
            .data
            .into_iter()
            .map(|entry| ModelDescriptor::new(provider.id, entry.id))
            .collect())
    }
}

impl std::fmt::Debug for ChatStreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatStreamClient")
            .field("registry", &self.registry)
            .field("credentials", &self.credentials)
            .finish()
    }
}
