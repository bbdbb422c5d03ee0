//! CSV-backed fixture data for the skip-hire collaborators.

mod factory;
mod fixture;
mod loader;

pub use factory::{FixtureAddressLookupFactory, FixtureCatalogFactory};
pub use fixture::{BUNDLED_ADDRESSES, BUNDLED_SKIPS, FixtureAddressLookup, FixtureCatalog};
pub use loader::{AddressBookLoader, CatalogLoadError, SkipCatalogLoader, SkipRecord};
