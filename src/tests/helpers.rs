// Shared test helpers
//
// Hand-written fakes for the credential storage seam.

use crate::core_types::credentials::{CredentialStore, InMemoryCredentialStore, BEARER_TOKEN_KEY};

/// An in-memory store preloaded with a bearer token.
pub async fn store_with_token(token: &str) -> InMemoryCredentialStore {
    let store = InMemoryCredentialStore::new();
    store.set(BEARER_TOKEN_KEY, token.to_string()).await;
    store
}

/// An in-memory store with no credentials at all.
pub fn empty_store() -> InMemoryCredentialStore {
    InMemoryCredentialStore::new()
}
