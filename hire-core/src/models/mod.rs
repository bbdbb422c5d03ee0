mod address;
mod order;
mod payment;
mod photo;
mod placement;
mod skip;
mod skip_profile;
mod step;
mod waste;

pub use address::{AddressCandidate, SelectedAddress, postcode_prefix};
pub use order::{OrderError, OrderState};
pub use payment::{OrderConfirmation, PaymentDetails, PaymentError};
pub use photo::{MAX_PHOTO_BYTES, PhotoError, SkipPhoto};
pub use placement::{SkipPlacement, UnknownPlacement};
pub use skip::{CatalogLocation, Skip, SkipListing};
pub use skip_profile::{Dimensions, SizeLabel, SkipProfile, SkipRestriction};
pub use step::WizardStep;
pub use waste::{HeavyWasteType, UnknownWasteType, WasteType, needs_heavy_waste_declaration};
