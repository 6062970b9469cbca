//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::ProductStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the product store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: ProductStore,
}

impl AppState {
    /// Create a new application state around an existing store.
    ///
    /// The store is injected so tests can start from a known, isolated state.
    #[must_use]
    pub fn new(config: ServerConfig, store: ProductStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the product store.
    #[must_use]
    pub fn store(&self) -> &ProductStore {
        &self.inner.store
    }
}
