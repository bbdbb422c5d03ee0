//! Exit conditions for each wizard step.
//!
//! | Step | Guard |
//! |------|-------|
//! | 1 Postcode | an address picked from the search results |
//! | 2 Waste Type | at least one category; construction or garden waste also needs heavy-waste types |
//! | 3 Select Skip | a skip chosen from the catalog |
//! | 4 Permit Check | a placement photo attached |
//! | 5 Choose Date | a bookable date on or after the earliest delivery date |
//! | 6 Payment | terminal, never advances |

use thiserror::Error;

use crate::calculations;
use crate::models::{OrderState, WizardStep};

/// Why a step cannot be left yet. The front end keeps "continue" disabled
/// and may show the message as a hint.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GuardFailure {
    #[error("select an address from the search results")]
    NoAddress,

    #[error("select at least one waste type")]
    NoWasteType,

    #[error("confirm which heavy waste types are included")]
    HeavyWasteUndeclared,

    #[error("choose a skip")]
    NoSkip,

    #[error("please upload a photo of the skip location")]
    NoPhoto,

    #[error("choose a delivery date")]
    NoDate,

    #[error("the chosen delivery date is no longer available")]
    DateUnavailable,

    #[error("payment is the last step")]
    Terminal,
}

/// Checks whether `step`'s exit condition holds for `order`.
pub fn check(
    order: &OrderState,
    step: WizardStep,
) -> Result<(), GuardFailure> {
    match step {
        WizardStep::Postcode => {
            if order.selected_address().is_none() {
                return Err(GuardFailure::NoAddress);
            }
        }
        WizardStep::WasteType => {
            if order.waste_types().is_empty() {
                return Err(GuardFailure::NoWasteType);
            }
            if order.needs_heavy_waste_declaration() && order.heavy_waste_types().is_empty() {
                return Err(GuardFailure::HeavyWasteUndeclared);
            }
        }
        WizardStep::SelectSkip => {
            if order.selected_skip().is_none() {
                return Err(GuardFailure::NoSkip);
            }
        }
        WizardStep::PermitCheck => {
            if order.skip_photo().is_none() {
                return Err(GuardFailure::NoPhoto);
            }
        }
        WizardStep::ChooseDate => {
            let date = order.date().ok_or(GuardFailure::NoDate)?;
            let minimum = order.minimum_date().ok_or(GuardFailure::DateUnavailable)?;
            if !calculations::is_selectable(date, minimum) {
                return Err(GuardFailure::DateUnavailable);
            }
        }
        WizardStep::Payment => return Err(GuardFailure::Terminal),
    }
    Ok(())
}
