//! # stream-llm
//!
//! Streaming multi-provider LLM chat client with support for OpenAI, DeepSeek,
//! Perplexity, and OpenRouter.
//!
//! ## Key Features
//!
//! - **Multiple Providers**: one registry, one orchestrator, per-provider
//!   behavior expressed as descriptor data rather than subclassing
//! - **Incremental Streaming**: SSE chunk parsing with an accumulator that
//!   drives a caller-supplied update callback per frame
//! - **Citation Formatting**: inline `[n]` markers rewritten to footnote
//!   references for citation-bearing providers
//! - **Cancellation**: cooperative abort that ends a stream promptly with no
//!   further callbacks
//!
//! ## Example
//!
//! ```rust,no_run
//! use stream_llm::{
//!     ChatMessage, ChatStreamClient, CredentialStore, CredentialVault, ProviderId,
//!     ProviderRegistry,
//! };
//! use stream_llm::core_types::credentials::BEARER_TOKEN_KEY;
//!
//! # async fn example() -> stream_llm::LlmResult<()> {
//! let registry = ProviderRegistry::with_default_providers()?;
//! let credentials = CredentialVault::in_memory(&registry);
//! credentials
//!     .store_for(ProviderId::OpenAi)
//!     .expect("openai is registered")
//!     .set(BEARER_TOKEN_KEY, "sk-your-key".to_string())
//!     .await;
//!
//! let client = ChatStreamClient::new(registry, credentials)?;
//! let model = client
//!     .registry()
//!     .model_by_uid("openai:gpt-4.1-mini")
//!     .expect("featured model");
//! let messages = vec![ChatMessage::user("Hello, how are you?")];
//!
//! client
//!     .stream_chat_completion(&model, &messages, |text| println!("{text}"), None)
//!     .await?;
//! # Ok(())
//! # }
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

// Core types shared across the registry, stream parser, and orchestrator
pub mod core_types;

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod client;
pub mod error;
pub mod format;
pub mod registry;
pub mod stream;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use client::ChatStreamClient;
pub use error::{LlmError, LlmResult};
pub use format::{citation_format, identity_format, OutputFormatter};
pub use registry::{
    bearer_token_header, AvailabilityChecker, HeaderBuilder, ProviderDescriptor, ProviderId,
    ProviderRegistry,
};
pub use stream::SseAccumulator;

// Re-export core types
pub use core_types::{
    ChatMessage, ChatRole, CredentialStore, CredentialVault, InMemoryCredentialStore,
    ModelDescriptor, NoopUsageNotifier, UsageNotifier,
};
