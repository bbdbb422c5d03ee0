use std::sync::Arc;

use async_trait::async_trait;
use hire_core::services::{ServiceConfig, ServiceFactory};
use hire_core::{AddressLookup, ServiceError, SkipCatalog};

use crate::address::{DEFAULT_ADDRESS_ENDPOINT, HttpAddressLookup};
use crate::catalog::{DEFAULT_CATALOG_ENDPOINT, HttpSkipCatalog};

fn endpoint_or<'a>(
    config: &'a ServiceConfig,
    default: &'a str,
) -> &'a str {
    if config.endpoint.is_empty() {
        default
    } else {
        &config.endpoint
    }
}

/// `"http"` backend for address search.
///
/// ```rust,no_run
/// use hire_core::services::AddressLookupRegistry;
/// use hire_http::HttpAddressLookupFactory;
///
/// let mut registry = AddressLookupRegistry::new();
/// registry.register(Box::new(HttpAddressLookupFactory));
/// ```
pub struct HttpAddressLookupFactory;

#[async_trait]
impl ServiceFactory<dyn AddressLookup> for HttpAddressLookupFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    /// An empty endpoint means the public capture service. The service
    /// refuses requests without a key, so one is required here.
    async fn create(
        &self,
        config: &ServiceConfig,
    ) -> Result<Arc<dyn AddressLookup>, ServiceError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ServiceError::Configuration("the http address backend needs an api_key".to_string())
            })?;
        let lookup = HttpAddressLookup::new(
            endpoint_or(config, DEFAULT_ADDRESS_ENDPOINT),
            api_key,
            config.timeout,
        )?;
        Ok(Arc::new(lookup))
    }
}

/// `"http"` backend for skip pricing. An empty endpoint means the
/// operator's public by-location endpoint.
pub struct HttpSkipCatalogFactory;

#[async_trait]
impl ServiceFactory<dyn SkipCatalog> for HttpSkipCatalogFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    async fn create(
        &self,
        config: &ServiceConfig,
    ) -> Result<Arc<dyn SkipCatalog>, ServiceError> {
        let catalog = HttpSkipCatalog::new(endpoint_or(config, DEFAULT_CATALOG_ENDPOINT), config.timeout)?;
        Ok(Arc::new(catalog))
    }
}
