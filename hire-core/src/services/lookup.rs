use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AddressCandidate, SkipListing};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("the service did not answer in time")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("service returned {code}: {message}")]
    Status { code: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Address autocomplete.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// Candidates matching `query`. No match is `Ok` with an empty list.
    async fn search(
        &self,
        query: &str,
    ) -> Result<Vec<AddressCandidate>, ServiceError>;
}

/// Skip pricing by location.
#[async_trait]
pub trait SkipCatalog: Send + Sync {
    /// Skips available at `postcode` (the outward code, e.g. `NR32`),
    /// optionally narrowed to `area`.
    async fn skips_by_location(
        &self,
        postcode: &str,
        area: Option<&str>,
    ) -> Result<SkipListing, ServiceError>;
}
