//! Domain model and rules for the skip-hire checkout.
//!
//! Nothing here performs I/O. Remote collaborators are reached through the
//! traits in [`services`]; backends live in `hire-http` and `hire-data`.

pub mod calculations;
pub mod catalog;
pub mod models;
pub mod requests;
pub mod search;
pub mod services;
pub mod wizard;

mod property_tests;
#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::{CatalogStatus, CatalogView, SkipSort, sort_skips};
pub use models::*;
pub use requests::{LatestRequest, Ticket};
pub use search::AddressSearchInput;
pub use services::{AddressLookup, ServiceConfig, ServiceError, SkipCatalog};
pub use wizard::GuardFailure;
