//! Money helpers shared by the pricing rules.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to whole pence, half away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use hire_core::calculations::round_pence;
///
/// assert_eq!(round_pence(dec!(43.204)), dec!(43.20));
/// assert_eq!(round_pence(dec!(43.205)), dec!(43.21));
/// ```
pub fn round_pence(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as pounds sterling, e.g. `£1,234.50`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use hire_core::calculations::format_gbp;
///
/// assert_eq!(format_gbp(dec!(343.2)), "£343.20");
/// assert_eq!(format_gbp(dec!(1234.5)), "£1,234.50");
/// ```
pub fn format_gbp(amount: Decimal) -> String {
    let rounded = round_pence(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, pence) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}£{grouped}.{pence}")
}
