//! Shared application state for Axum handlers.
//!
//! The product store is owned here and handed to handlers through Axum's
//! `State` extractor; nothing lives in a process-wide global, so tests can
//! build as many independent states as they like.

use std::sync::Arc;

use crate::config::Config;
use crate::store::ProductStore;

/// Shared application state for Axum handlers.
///
/// Cloned for every request; the store and config are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// The product collection
    pub store: ProductStore,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create state around an existing store.
    pub fn new(store: ProductStore, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Create state with the sample catalog loaded.
    pub fn seeded(config: Config) -> Self {
        Self::new(ProductStore::seeded(), config)
    }
}
