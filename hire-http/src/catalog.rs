use std::time::Duration;

use async_trait::async_trait;
use hire_core::{ServiceError, Skip, SkipCatalog, SkipListing};
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::{error, info};

use crate::client::{build_client, ensure_success, map_error};

pub const DEFAULT_CATALOG_ENDPOINT: &str = "https://app.wewantwaste.co.uk/api/skips/by-location";

/// Skip pricing from the operator's by-location endpoint.
#[derive(Debug, Clone)]
pub struct HttpSkipCatalog {
    client: Client,
    endpoint: String,
}

impl HttpSkipCatalog {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SkipCatalog for HttpSkipCatalog {
    async fn skips_by_location(
        &self,
        postcode: &str,
        area: Option<&str>,
    ) -> Result<SkipListing, ServiceError> {
        let mut query = vec![("postcode", postcode)];
        if let Some(area) = area.filter(|a| !a.is_empty()) {
            query.push(("area", area));
        }

        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .query(&query)
            .send()
            .await
            .map_err(map_error)
            .inspect_err(|e| error!(postcode, error = %e, "skip catalog request failed"))?;

        let skips: Vec<Skip> = ensure_success(response)?
            .json()
            .await
            .map_err(map_error)?;

        info!(postcode, area = area.unwrap_or_default(), count = skips.len(), "skip catalog fetched");
        Ok(SkipListing::from_records(skips, postcode, area))
    }
}
