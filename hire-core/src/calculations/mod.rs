//! Values derived from the order: price totals and delivery dates.
//!
//! Everything here is a pure function of its inputs and is recomputed
//! whenever the order changes.

pub mod common;
pub mod pricing;
pub mod schedule;

pub use common::{format_gbp, round_pence};
pub use pricing::{PERMIT_FEE, PriceBreakdown, VAT_RATE};
pub use schedule::{
    HIRE_PERIOD_DAYS, PERMIT_LEAD_WORKING_DAYS, QUICK_SELECT_COUNT, add_working_days,
    collection_date, is_selectable, is_working_day, minimum_delivery_date, quick_select_dates,
};
