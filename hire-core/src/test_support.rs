//! Builders shared by unit tests across the crate.

use rust_decimal::Decimal;

use crate::models::{AddressCandidate, Skip, SkipPhoto};

/// A skip with the given id, size and pre-VAT price; the remaining fields
/// take the values the pricing service commonly returns.
pub(crate) fn skip(
    id: i64,
    size: u32,
    price_before_vat: Decimal,
) -> Skip {
    Skip {
        id,
        size,
        hire_period_days: 14,
        transport_cost: None,
        per_tonne_cost: None,
        price_before_vat,
        vat: Some(Decimal::from(20)),
        postcode: "NR32".to_string(),
        area: None,
        forbidden: false,
        created_at: None,
        updated_at: None,
        allowed_on_road: true,
        allows_heavy_waste: true,
    }
}

pub(crate) fn candidate(
    text: &str,
    description: &str,
) -> AddressCandidate {
    AddressCandidate {
        id: format!("GB|RM|{text}"),
        kind: "Address".to_string(),
        text: text.to_string(),
        highlight: String::new(),
        description: description.to_string(),
    }
}

pub(crate) fn photo() -> SkipPhoto {
    SkipPhoto::new("driveway.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0])
        .expect("valid test photo")
}
