//! Terminal front end for the skip-hire checkout.

pub mod app;
pub mod config;
pub mod logging;
pub mod session;
pub mod terminal;
pub mod utils;

pub use session::{CatalogKey, CheckoutSession, SessionError};
pub use terminal::TerminalWizard;
