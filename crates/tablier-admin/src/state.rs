//! Shared state for the admin API.

use std::sync::Arc;
use tablier_pg::AdminStore;
use tablier_token::TokenVerifier;

/// Shared application state handed to every admin handler.
///
/// Nothing here is mutable: the store wraps a connection pool and the
/// verifier a public key, so requests share it freely.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: AdminStore,
    verifier: TokenVerifier,
}

impl AppState {
    pub fn new(store: AdminStore, verifier: TokenVerifier) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, verifier }),
        }
    }

    pub fn store(&self) -> &AdminStore {
        &self.inner.store
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.inner.verifier
    }
}
