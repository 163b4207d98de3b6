//! Core types for the streaming multi-provider chat abstraction
//!
//! Provides provider-agnostic message formats, the model descriptor with its
//! composite uid, the credential store seam, and usage notification types.
//!
//! ## Organization
//! - `messages` - Chat message roles and content sent to providers
//! - `model` - Model descriptor and uid derivation/parsing
//! - `credentials` - Credential store trait and per-provider vault
//! - `events` - Fire-and-forget usage notification

pub mod credentials;
pub mod events;
pub mod messages;
pub mod model;

// Re-export commonly used types
pub use credentials::{CredentialStore, CredentialVault, InMemoryCredentialStore};
pub use events::{NoopUsageNotifier, UsageNotifier};
pub use messages::{ChatMessage, ChatRole};
pub use model::ModelDescriptor;
