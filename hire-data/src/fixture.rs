//! Offline stand-ins for the two remote services, backed by CSV data.

use std::collections::HashMap;

use async_trait::async_trait;
use hire_core::search::MAX_RESULTS;
use hire_core::{AddressCandidate, AddressLookup, ServiceError, Skip, SkipCatalog, SkipListing};
use tracing::debug;

use crate::loader::{AddressBookLoader, CatalogLoadError, SkipCatalogLoader};

/// Catalog shipped with the crate, used when no CSV path is configured.
pub const BUNDLED_SKIPS: &str = include_str!("../data/skips.csv");

/// Addresses shipped with the crate.
pub const BUNDLED_ADDRESSES: &str = include_str!("../data/addresses.csv");

/// Skips grouped by postcode district.
#[derive(Debug, Clone, Default)]
pub struct FixtureCatalog {
    by_postcode: HashMap<String, Vec<Skip>>,
}

impl FixtureCatalog {
    pub fn from_skips(skips: impl IntoIterator<Item = Skip>) -> Self {
        let mut by_postcode: HashMap<String, Vec<Skip>> = HashMap::new();
        for skip in skips {
            by_postcode
                .entry(skip.postcode.trim().to_uppercase())
                .or_default()
                .push(skip);
        }
        Self { by_postcode }
    }

    pub fn from_csv(csv: &str) -> Result<Self, CatalogLoadError> {
        Ok(Self::from_skips(SkipCatalogLoader::parse(csv.as_bytes())?))
    }

    pub fn bundled() -> Result<Self, CatalogLoadError> {
        Self::from_csv(BUNDLED_SKIPS)
    }

    /// Postcode districts with at least one skip, sorted.
    pub fn postcodes(&self) -> Vec<&str> {
        let mut postcodes: Vec<&str> = self.by_postcode.keys().map(String::as_str).collect();
        postcodes.sort_unstable();
        postcodes
    }
}

#[async_trait]
impl SkipCatalog for FixtureCatalog {
    /// Unknown districts answer with an empty listing. Within a known
    /// district, an `area` keeps skips priced for that area or for the
    /// whole district; an area with no such skips gives an empty listing.
    async fn skips_by_location(
        &self,
        postcode: &str,
        area: Option<&str>,
    ) -> Result<SkipListing, ServiceError> {
        let Some(skips) = self.by_postcode.get(&postcode.trim().to_uppercase()) else {
            debug!(postcode, "no fixture skips for district");
            return Ok(SkipListing::from_records(Vec::new(), postcode, area));
        };

        let matching: Vec<Skip> = match area.map(str::trim).filter(|a| !a.is_empty()) {
            None => skips.clone(),
            Some(wanted) => skips
                .iter()
                .filter(|skip| {
                    skip.area
                        .as_deref()
                        .is_none_or(|a| a.eq_ignore_ascii_case(wanted))
                })
                .cloned()
                .collect(),
        };

        if matching.is_empty() {
            debug!(postcode, area = area.unwrap_or_default(), "no fixture skips for area");
        }
        Ok(SkipListing::from_records(matching, postcode, area))
    }
}

/// Address search over a fixed address book.
#[derive(Debug, Clone, Default)]
pub struct FixtureAddressLookup {
    addresses: Vec<AddressCandidate>,
}

impl FixtureAddressLookup {
    pub fn new(addresses: Vec<AddressCandidate>) -> Self {
        Self { addresses }
    }

    pub fn from_csv(csv: &str) -> Result<Self, CatalogLoadError> {
        Ok(Self::new(AddressBookLoader::parse(csv.as_bytes())?))
    }

    pub fn bundled() -> Result<Self, CatalogLoadError> {
        Self::from_csv(BUNDLED_ADDRESSES)
    }
}

#[async_trait]
impl AddressLookup for FixtureAddressLookup {
    /// Case-insensitive substring match on the address text or its
    /// description, in address book order.
    async fn search(
        &self,
        query: &str,
    ) -> Result<Vec<AddressCandidate>, ServiceError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .addresses
            .iter()
            .filter(|a| {
                a.text.to_lowercase().contains(&needle)
                    || a.description.to_lowercase().contains(&needle)
                    || a.label().to_lowercase().contains(&needle)
            })
            .take(MAX_RESULTS)
            .cloned()
            .collect())
    }
}
