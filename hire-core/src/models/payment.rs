//! Simulated payment.
//!
//! Card details are collected for the booking summary only. Nothing is
//! charged and nothing is validated beyond the order being at the payment
//! step with a skip and a delivery date.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::{OrderState, WizardStep};
use crate::calculations::PriceBreakdown;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("payment is only taken on the payment step, order is at {0}")]
    NotAtPayment(WizardStep),

    #[error("order has no {0}")]
    Incomplete(&'static str),
}

/// Card form values. Defaults to the test card the checkout form shows.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub card_number: String,
    pub expiry: String,
    pub cvc: String,
    pub country: String,
    pub save_card: bool,
}

impl Default for PaymentDetails {
    fn default() -> Self {
        Self {
            card_number: "4242 4242 4242 4242".to_string(),
            expiry: "12/25".to_string(),
            cvc: "123".to_string(),
            country: "United Kingdom".to_string(),
            save_card: false,
        }
    }
}

impl PaymentDetails {
    /// Last four digits of the card number.
    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

impl fmt::Debug for PaymentDetails {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("card", &format_args!("**** {}", self.last_four()))
            .field("country", &self.country)
            .field("save_card", &self.save_card)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub reference: String,
    pub address: String,
    pub skip_name: String,
    pub hire_period_days: u32,
    pub price: PriceBreakdown,
    pub delivery_date: NaiveDate,
    pub collection_date: NaiveDate,
}

impl OrderState {
    /// Completes the simulated payment.
    ///
    /// `order_number` becomes the booking reference (`SKP-nnnnn`). The
    /// wizard stays on the payment step.
    ///
    /// # Errors
    ///
    /// [`PaymentError`] when the order is not at the payment step or lacks
    /// a skip or a delivery date.
    pub fn confirm_payment(
        &self,
        details: &PaymentDetails,
        order_number: u32,
    ) -> Result<OrderConfirmation, PaymentError> {
        if self.step() != WizardStep::Payment {
            return Err(PaymentError::NotAtPayment(self.step()));
        }
        let skip = self.selected_skip().ok_or(PaymentError::Incomplete("skip"))?;
        let price = self.price().ok_or(PaymentError::Incomplete("skip"))?;
        let delivery_date = self.date().ok_or(PaymentError::Incomplete("delivery date"))?;
        let collection_date = self
            .collection_date()
            .ok_or(PaymentError::Incomplete("delivery date"))?;

        let confirmation = OrderConfirmation {
            reference: format!("SKP-{:05}", order_number % 100_000),
            address: self.address().to_string(),
            skip_name: skip.display_name(),
            hire_period_days: skip.hire_period_days,
            price,
            delivery_date,
            collection_date,
        };
        info!(
            reference = %confirmation.reference,
            ?details,
            total = %price.total,
            "payment simulated"
        );
        Ok(confirmation)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn last_four_ignores_spaces() {
        let details = PaymentDetails::default();

        assert_eq!(details.last_four(), "4242");
    }

    #[test]
    fn last_four_of_short_number() {
        let details = PaymentDetails {
            card_number: "12".to_string(),
            ..Default::default()
        };

        assert_eq!(details.last_four(), "12");
    }

    #[test]
    fn debug_masks_card_number() {
        let debug = format!("{:?}", PaymentDetails::default());

        assert!(debug.contains("**** 4242"));
        assert!(!debug.contains("4242 4242"));
        assert!(!debug.contains("123"));
    }

    #[test]
    fn payment_refused_before_payment_step() {
        let order = OrderState::new();

        let result = order.confirm_payment(&PaymentDetails::default(), 1);

        assert_eq!(result, Err(PaymentError::NotAtPayment(WizardStep::Postcode)));
    }
}
