//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::db::Storage;
use crate::services::cep::CepClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like storage and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    storage: Arc<dyn Storage>,
    cep: CepClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `storage` - Storage backend
    #[must_use]
    pub fn new(config: ServerConfig, storage: Arc<dyn Storage>) -> Self {
        let cep = CepClient::new(&config.cep_base_url);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                storage,
                cep,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the storage backend.
    #[must_use]
    pub fn storage(&self) -> &dyn Storage {
        self.inner.storage.as_ref()
    }

    /// Get a reference to the CEP lookup client.
    #[must_use]
    pub fn cep(&self) -> &CepClient {
        &self.inner.cep
    }
}
