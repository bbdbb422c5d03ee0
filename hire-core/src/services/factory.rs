use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use super::lookup::{AddressLookup, ServiceError, SkipCatalog};

/// Requests that take longer than this fail with [`ServiceError::Timeout`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Backend-agnostic collaborator configuration.
///
/// `backend` must match the [`ServiceFactory::backend_name`] of a registered
/// factory. The meaning of `endpoint` depends on the backend.
///
/// | backend   | endpoint examples                        |
/// |-----------|------------------------------------------|
/// | `http`    | `https://app.wewantwaste.co.uk/api/skips/by-location` |
/// | `fixture` | `data/skips.csv`                         |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub backend: String,
    pub endpoint: String,
    /// Sent by backends that need one (the address service does).
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            endpoint: String::new(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Builds one kind of collaborator (`S` is `dyn AddressLookup` or
/// `dyn SkipCatalog`) for one backend. Each backend crate exports a unit
/// struct per kind and registers it at startup.
#[async_trait]
pub trait ServiceFactory<S: ?Sized + Send + Sync>: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    async fn create(
        &self,
        config: &ServiceConfig,
    ) -> Result<Arc<S>, ServiceError>;
}

/// Factories for one collaborator kind, keyed by backend name.
pub struct ServiceRegistry<S: ?Sized + Send + Sync> {
    factories: HashMap<&'static str, Box<dyn ServiceFactory<S>>>,
}

pub type AddressLookupRegistry = ServiceRegistry<dyn AddressLookup>;
pub type SkipCatalogRegistry = ServiceRegistry<dyn SkipCatalog>;

impl<S: ?Sized + Send + Sync> ServiceRegistry<S> {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers `factory`, replacing any factory with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn ServiceFactory<S>>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatches to the factory named by `config.backend`.
    ///
    /// # Errors
    /// * [`ServiceError::Configuration`] when no factory has that name.
    /// * Any error the chosen factory returns.
    pub async fn create(
        &self,
        config: &ServiceConfig,
    ) -> Result<Arc<S>, ServiceError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                ServiceError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        info!(backend = %config.backend, endpoint = %config.endpoint, "creating service");
        factory.create(config).await
    }
}

impl<S: ?Sized + Send + Sync> Default for ServiceRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}
