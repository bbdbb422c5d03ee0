use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use hire_core::services::{ServiceConfig, ServiceFactory};
use hire_core::{AddressLookup, ServiceError, SkipCatalog};
use tracing::info;

use crate::fixture::{BUNDLED_ADDRESSES, BUNDLED_SKIPS, FixtureAddressLookup, FixtureCatalog};
use crate::loader::CatalogLoadError;

/// Reads the CSV named by `config.endpoint`, or returns the bundled data
/// when no endpoint is set.
async fn read_source(
    config: &ServiceConfig,
    bundled: &'static str,
) -> Result<String, CatalogLoadError> {
    if config.endpoint.is_empty() {
        return Ok(bundled.to_string());
    }
    let path = Path::new(&config.endpoint);
    info!(path = %path.display(), "reading fixture data");
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CatalogLoadError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

fn to_service_error(err: CatalogLoadError) -> ServiceError {
    ServiceError::Configuration(err.to_string())
}

/// `"fixture"` backend for skip pricing.
///
/// ```rust,no_run
/// use hire_core::services::SkipCatalogRegistry;
/// use hire_data::FixtureCatalogFactory;
///
/// let mut registry = SkipCatalogRegistry::new();
/// registry.register(Box::new(FixtureCatalogFactory));
/// ```
pub struct FixtureCatalogFactory;

#[async_trait]
impl ServiceFactory<dyn SkipCatalog> for FixtureCatalogFactory {
    fn backend_name(&self) -> &'static str {
        "fixture"
    }

    async fn create(
        &self,
        config: &ServiceConfig,
    ) -> Result<Arc<dyn SkipCatalog>, ServiceError> {
        let csv = read_source(config, BUNDLED_SKIPS)
            .await
            .map_err(to_service_error)?;
        let catalog = FixtureCatalog::from_csv(&csv).map_err(to_service_error)?;
        Ok(Arc::new(catalog))
    }
}

/// `"fixture"` backend for address search.
pub struct FixtureAddressLookupFactory;

#[async_trait]
impl ServiceFactory<dyn AddressLookup> for FixtureAddressLookupFactory {
    fn backend_name(&self) -> &'static str {
        "fixture"
    }

    async fn create(
        &self,
        config: &ServiceConfig,
    ) -> Result<Arc<dyn AddressLookup>, ServiceError> {
        let csv = read_source(config, BUNDLED_ADDRESSES)
            .await
            .map_err(to_service_error)?;
        let lookup = FixtureAddressLookup::from_csv(&csv).map_err(to_service_error)?;
        Ok(Arc::new(lookup))
    }
}
