//! Credential store seam and per-provider vault
//!
//! Credentials are owned by an external collaborator (persisted settings,
//! keychain, database). This crate only reads them through the
//! [`CredentialStore`] trait, one store instance per provider. The
//! [`CredentialVault`] is constructed explicitly at application start and
//! injected into the client; there is no process-wide singleton.

use crate::registry::{ProviderId, ProviderRegistry};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Storage key under which a provider's bearer token lives.
pub const BEARER_TOKEN_KEY: &str = "bearer-token";

/// Async key-value credential storage for a single provider.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch a credential value, `None` when absent.
    async fn get(&self, key: &str) -> Option<String>;

    /// Store a credential value.
    async fn set(&self, key: &str, value: String);
}

/// In-memory credential store backed by a `RwLock`ed map.
///
/// Suitable for tests and for embedding applications that load credentials
/// once at startup.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) {
        self.values.write().await.insert(key.to_string(), value);
    }
}

/// One credential store per provider, keyed by provider id.
///
/// Lifetime is application start to application end. Reads during concurrent
/// completion calls are independent; the vault itself is never mutated after
/// construction.
#[derive(Clone)]
pub struct CredentialVault {
    stores: HashMap<ProviderId, Arc<dyn CredentialStore>>,
}

impl CredentialVault {
    /// Build a vault from explicit per-provider stores.
    pub fn new(stores: HashMap<ProviderId, Arc<dyn CredentialStore>>) -> Self {
        Self { stores }
    }

    /// Build a vault with a fresh in-memory store for every registered provider.
    pub fn in_memory(registry: &ProviderRegistry) -> Self {
        let stores = registry
            .provider_ids()
            .map(|id| {
                let store: Arc<dyn CredentialStore> = Arc::new(InMemoryCredentialStore::new());
                (id, store)
            })
            .collect();
        Self { stores }
    }

    /// Replace the store for one provider.
    pub fn with_store(mut self, id: ProviderId, store: Arc<dyn CredentialStore>) -> Self {
        self.stores.insert(id, store);
        self
    }

    /// The store for a provider, `None` when the vault has no entry for it.
    pub fn store_for(&self, id: ProviderId) -> Option<Arc<dyn CredentialStore>> {
        self.stores.get(&id).cloned()
    }
}

impl std::fmt::Debug for CredentialVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVault")
            .field("providers", &self.stores.keys().collect::<Vec<_>>())
            .finish()
    }
}
