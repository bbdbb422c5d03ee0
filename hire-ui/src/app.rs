//! Wiring: backend registries and session construction from config.

use hire_core::ServiceError;
use hire_core::services::{AddressLookupRegistry, SkipCatalogRegistry};
use hire_data::{FixtureAddressLookupFactory, FixtureCatalogFactory};
use hire_http::{HttpAddressLookupFactory, HttpSkipCatalogFactory};
use tracing::debug;

use crate::config::AppConfig;
use crate::session::CheckoutSession;

/// Every address backend this binary knows about.
pub fn build_address_registry() -> AddressLookupRegistry {
    let mut registry = AddressLookupRegistry::new();
    registry.register(Box::new(HttpAddressLookupFactory));
    registry.register(Box::new(FixtureAddressLookupFactory));
    registry
}

/// Every skip catalog backend this binary knows about.
pub fn build_catalog_registry() -> SkipCatalogRegistry {
    let mut registry = SkipCatalogRegistry::new();
    registry.register(Box::new(HttpSkipCatalogFactory));
    registry.register(Box::new(FixtureCatalogFactory));
    registry
}

/// Creates both collaborators named by `config` and a fresh session.
pub async fn start_session(config: &AppConfig) -> Result<CheckoutSession, ServiceError> {
    let address = config.address.to_service_config();
    let catalog = config.catalog.to_service_config();
    debug!(address = %address.backend, catalog = %catalog.backend, "starting session");

    let lookup = build_address_registry().create(&address).await?;
    let skips = build_catalog_registry().create(&catalog).await?;
    Ok(CheckoutSession::new(lookup, skips))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn registries_offer_http_and_fixture() {
        assert_eq!(build_address_registry().available_backends(), vec!["fixture", "http"]);
        assert_eq!(build_catalog_registry().available_backends(), vec!["fixture", "http"]);
    }

    #[tokio::test]
    async fn default_config_starts_offline() {
        let session = start_session(&AppConfig::default()).await;

        assert!(session.is_ok());
    }

    #[tokio::test]
    async fn unknown_backend_is_reported() {
        let mut config = AppConfig::default();
        config.catalog.backend = "ftp".to_string();

        let result = start_session(&config).await;

        assert!(matches!(result, Err(ServiceError::Configuration(msg)) if msg.contains("ftp")));
    }
}
