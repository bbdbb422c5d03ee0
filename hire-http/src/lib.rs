//! HTTP backends for the address and skip-pricing collaborators.

mod address;
mod catalog;
mod client;
mod factory;

pub use address::{DEFAULT_ADDRESS_ENDPOINT, HttpAddressLookup};
pub use catalog::{DEFAULT_CATALOG_ENDPOINT, HttpSkipCatalog};
pub use factory::{HttpAddressLookupFactory, HttpSkipCatalogFactory};
