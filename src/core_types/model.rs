//! Model descriptor and composite uid
//!
//! A model is identified externally by its uid, `"{provider_id}:{model_id}"`.
//! Parsing a uid must recover exactly the original pair, which holds because
//! [`ProviderId`] display names never contain the separator.

use crate::registry::ProviderId;
use serde::{Deserialize, Serialize};

/// Separator between provider id and model id in a uid.
pub const UID_SEPARATOR: char = ':';

/// Identifies a specific model within a provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// The provider offering this model
    pub provider_id: ProviderId,
    /// Provider-side model name, e.g. `gpt-4.1-mini`
    pub model_id: String,
    /// Optional human-readable title for display
    pub display_title: Option<String>,
}

impl ModelDescriptor {
    /// Create a descriptor without a display title
    pub fn new(provider_id: ProviderId, model_id: impl Into<String>) -> Self {
        Self {
            provider_id,
            model_id: model_id.into(),
            display_title: None,
        }
    }

    /// Attach a display title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.display_title = Some(title.into());
        self
    }

    /// The stable composite identifier, `"{provider_id}:{model_id}"`.
    ///
    /// This is the sole external identity of a model.
    pub fn uid(&self) -> String {
        format!("{}{}{}", self.provider_id, UID_SEPARATOR, self.model_id)
    }

    /// Parse a uid back into a descriptor.
    ///
    /// Splits on the first separator; returns `None` when the separator is
    /// missing or the provider id is unknown. Round-trips with [`uid()`](Self::uid).
    pub fn from_uid(uid: &str) -> Option<Self> {
        let (provider, model) = uid.split_once(UID_SEPARATOR)?;
        let provider_id: ProviderId = provider.parse().ok()?;
        if model.is_empty() {
            return None;
        }
        Some(Self::new(provider_id, model))
    }
}

impl std::fmt::Display for ModelDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.display_title {
            Some(title) => write!(f, "{title}"),
            None => write!(f, "{}", self.uid()),
        }
    }
}
