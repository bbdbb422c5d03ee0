//! Order total for the payment step.
//!
//! | Line       | Rule |
//! |------------|------|
//! | Subtotal   | skip price before VAT |
//! | VAT        | subtotal × 20% |
//! | Permit fee | £84.00 when the skip stands on a public road, otherwise £0 |
//! | Total      | subtotal + VAT + permit fee |
//!
//! VAT is charged on the skip only; the council permit fee is passed
//! through as-is.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use hire_core::calculations::PriceBreakdown;
//!
//! let price = PriceBreakdown::calculate(dec!(216.00), true);
//!
//! assert_eq!(price.vat, dec!(43.20));
//! assert_eq!(price.permit_fee, dec!(84.00));
//! assert_eq!(price.total, dec!(343.20));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::common::round_pence;

pub const VAT_RATE: Decimal = dec!(0.20);
pub const PERMIT_FEE: Decimal = dec!(84.00);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub subtotal: Decimal,
    pub vat: Decimal,
    pub permit_fee: Decimal,
    pub total: Decimal,
}

impl PriceBreakdown {
    pub fn calculate(
        price_before_vat: Decimal,
        permit_required: bool,
    ) -> Self {
        let subtotal = round_pence(price_before_vat);
        let vat = round_pence(subtotal * VAT_RATE);
        let permit_fee = if permit_required {
            PERMIT_FEE
        } else {
            Decimal::ZERO
        };

        Self {
            subtotal,
            vat,
            permit_fee,
            total: subtotal + vat + permit_fee,
        }
    }
}
