//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Config;
use crate::entities::SqliteStore;

/// State shared across all HTTP handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Persistent directory store.
    pub store: Arc<SqliteStore>,
}

#[cfg(test)]
pub(crate) async fn test_state() -> Arc<AppState> {
    let store = SqliteStore::connect_memory()
        .await
        .expect("in-memory store");
    Arc::new(AppState {
        config: Arc::new(Config::from_env()),
        store: Arc::new(store),
    })
}
