use std::time::Duration;

use async_trait::async_trait;
use hire_core::search::MAX_RESULTS;
use hire_core::{AddressCandidate, AddressLookup, ServiceError};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::client::{build_client, ensure_success, map_error};

pub const DEFAULT_ADDRESS_ENDPOINT: &str =
    "https://services.postcodeanywhere.co.uk/Capture/Interactive/Find/v1.00/json3ex.ws";

/// The find endpoint answers `200 OK` even for rejected requests and
/// reports the problem as a single item carrying an `Error` code.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FindItem {
    Failure {
        #[serde(rename = "Error")]
        code: String,
        #[serde(rename = "Description", default)]
        description: String,
    },
    Candidate(AddressCandidate),
}

#[derive(Debug, Deserialize)]
struct FindResponse {
    #[serde(rename = "Items", default)]
    items: Vec<FindItem>,
}

/// Address autocomplete against the UK capture service.
#[derive(Debug, Clone)]
pub struct HttpAddressLookup {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpAddressLookup {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl AddressLookup for HttpAddressLookup {
    async fn search(
        &self,
        query: &str,
    ) -> Result<Vec<AddressCandidate>, ServiceError> {
        let limit = MAX_RESULTS.to_string();
        debug!(query, "searching addresses");
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("Key", self.api_key.as_str()),
                ("Origin", "GBR"),
                ("Countries", "GB"),
                ("Limit", limit.as_str()),
                ("Language", "en"),
                ("Text", query),
            ])
            .send()
            .await
            .map_err(map_error)
            .inspect_err(|e| error!(error = %e, "address search failed"))?;

        let body: FindResponse = ensure_success(response)?
            .json()
            .await
            .map_err(map_error)?;

        let mut candidates = Vec::with_capacity(body.items.len());
        for item in body.items {
            match item {
                FindItem::Candidate(candidate) => candidates.push(candidate),
                FindItem::Failure { code, description } => {
                    error!(%code, %description, "address service rejected the request");
                    return Err(ServiceError::Configuration(format!(
                        "address service error {code}: {description}"
                    )));
                }
            }
        }
        debug!(count = candidates.len(), "addresses found");
        Ok(candidates)
    }
}
