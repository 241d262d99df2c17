//! Builder for creating and configuring Client instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use super::Client;
use crate::{
    backend::{Backend, HttpBackend},
    error::{ClientError, Result},
    events::EventBus,
    store::Store,
};

/// Environment variable consulted when no base URL is configured.
pub const API_URL_ENV: &str = "SKILLPATH_API_URL";

/// Base URL used when neither the builder nor the environment provides one.
pub const DEFAULT_API_URL: &str = "http://localhost:8070/api";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for creating and configuring Client instances.
#[derive(Clone)]
pub struct ClientBuilder {
    base_url: Option<String>,
    store_path: Option<PathBuf>,
    timeout: Duration,
    backend: Option<Arc<dyn Backend>>,
    event_capacity: usize,
}

impl ClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: None,
            store_path: None,
            timeout: DEFAULT_TIMEOUT,
            backend: None,
            event_capacity: 64,
        }
    }

    /// Sets the REST API base URL.
    ///
    /// If not specified, uses `$SKILLPATH_API_URL` or
    /// `http://localhost:8070/api`.
    pub fn with_base_url<S: Into<String>>(mut self, url: Option<S>) -> Self {
        if let Some(url) = url {
            self.base_url = Some(url.into());
        }
        self
    }

    /// Sets a custom store file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/skillpath/store.db` or `~/.local/share/skillpath/store.db`
    pub fn with_store_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.store_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the HTTP backend, mostly for tests.
    pub fn with_backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }

    /// Builds the configured client.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::XdgDirectory` if no default store path can be
    /// resolved, `ClientError::Store` if the store cannot be initialized and
    /// `ClientError::Configuration` if the HTTP client cannot be built.
    pub async fn build(self) -> Result<Client> {
        let store_path = match self.store_path {
            Some(path) => path,
            None => Self::default_store_path()?,
        };
        let store = Store::open(store_path).await?;

        let backend = match self.backend {
            Some(backend) => backend,
            None => {
                let base_url = self.base_url.unwrap_or_else(Self::default_base_url);
                if base_url.trim().is_empty() {
                    return Err(ClientError::Configuration {
                        message: "API base URL is empty".to_string(),
                    });
                }
                Arc::new(HttpBackend::new(base_url, self.timeout)?)
            }
        };

        Ok(Client::new(
            backend,
            store,
            EventBus::new(self.event_capacity),
        ))
    }

    fn default_base_url() -> String {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Returns the default store path following XDG Base Directory
    /// specification.
    fn default_store_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("skillpath")
            .place_data_file("store.db")
            .map_err(|e| ClientError::XdgDirectory(e.to_string()))
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
