//! Seams to the two remote collaborators and the registry that builds them.

pub mod factory;
pub mod lookup;

pub use factory::{
    AddressLookupRegistry, ServiceConfig, ServiceFactory, ServiceRegistry, SkipCatalogRegistry,
};
pub use lookup::{AddressLookup, ServiceError, SkipCatalog};
