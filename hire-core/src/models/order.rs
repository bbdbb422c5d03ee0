//! The in-progress order.
//!
//! [`OrderState`] is the single source of truth for one checkout session.
//! Every field is private and changes only through the named operations
//! below, so coupled fields (placement and permit, permit and delivery
//! date, waste types and heavy-waste declaration) cannot drift apart.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};

use super::waste::needs_heavy_waste_declaration;
use super::{
    AddressCandidate, HeavyWasteType, SelectedAddress, Skip, SkipPhoto, SkipPlacement, WasteType,
    WizardStep,
};
use crate::calculations::{self, PriceBreakdown};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("heavy waste types can only be declared for construction or garden waste")]
    HeavyWasteNotApplicable,

    #[error("{0} falls on a weekend; deliveries run Monday to Friday")]
    WeekendDelivery(NaiveDate),

    #[error("{date} is before the earliest available delivery date {minimum}")]
    DeliveryTooEarly { date: NaiveDate, minimum: NaiveDate },
}

#[derive(Debug, Clone, Default)]
pub struct OrderState {
    step: WizardStep,
    address: Option<SelectedAddress>,
    waste_types: BTreeSet<WasteType>,
    heavy_waste_types: BTreeSet<HeavyWasteType>,
    selected_skip: Option<Skip>,
    skip_location: SkipPlacement,
    permit_required: bool,
    skip_photo: Option<SkipPhoto>,
    date: Option<NaiveDate>,
    /// The "today" the delivery window was last computed for.
    date_anchor: Option<NaiveDate>,
}

impl OrderState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── read access ──────────────────────────────────────────────────────

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn postcode(&self) -> &str {
        self.address
            .as_ref()
            .map(|a| a.postcode.as_str())
            .unwrap_or_default()
    }

    pub fn address(&self) -> &str {
        self.address
            .as_ref()
            .map(|a| a.full_address.as_str())
            .unwrap_or_default()
    }

    pub fn selected_address(&self) -> Option<&SelectedAddress> {
        self.address.as_ref()
    }

    pub fn waste_types(&self) -> &BTreeSet<WasteType> {
        &self.waste_types
    }

    pub fn heavy_waste_types(&self) -> &BTreeSet<HeavyWasteType> {
        &self.heavy_waste_types
    }

    pub fn selected_skip(&self) -> Option<&Skip> {
        self.selected_skip.as_ref()
    }

    pub fn skip_location(&self) -> SkipPlacement {
        self.skip_location
    }

    pub fn permit_required(&self) -> bool {
        self.permit_required
    }

    pub fn skip_photo(&self) -> Option<&SkipPhoto> {
        self.skip_photo.as_ref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Earliest delivery date as of the last time the delivery window was
    /// computed, or `None` if the date step has not been shown yet.
    pub fn minimum_date(&self) -> Option<NaiveDate> {
        self.date_anchor
            .map(|today| calculations::minimum_delivery_date(today, self.permit_required))
    }

    pub fn needs_heavy_waste_declaration(&self) -> bool {
        needs_heavy_waste_declaration(&self.waste_types)
    }

    /// Price totals, once a skip has been chosen.
    pub fn price(&self) -> Option<PriceBreakdown> {
        self.selected_skip
            .as_ref()
            .map(|skip| PriceBreakdown::calculate(skip.price_before_vat, self.permit_required))
    }

    pub fn collection_date(&self) -> Option<NaiveDate> {
        self.date.map(calculations::collection_date)
    }

    // ── step 1: address ─────────────────────────────────────────────────

    pub fn select_address(
        &mut self,
        candidate: &AddressCandidate,
    ) {
        let address = SelectedAddress::from_candidate(candidate);
        info!(postcode = %address.postcode, "address selected");
        self.address = Some(address);
    }

    pub fn clear_address(&mut self) {
        debug!("address cleared");
        self.address = None;
    }

    // ── step 2: waste ───────────────────────────────────────────────────

    /// Replaces the waste categories. A heavy-waste declaration is dropped
    /// when no remaining category calls for one.
    pub fn set_waste_types<I>(
        &mut self,
        types: I,
    ) where
        I: IntoIterator<Item = WasteType>,
    {
        self.waste_types = types.into_iter().collect();
        if !self.needs_heavy_waste_declaration() && !self.heavy_waste_types.is_empty() {
            debug!("heavy waste declaration no longer applies, clearing it");
            self.heavy_waste_types.clear();
        }
        debug!(waste_types = ?self.waste_types, "waste types updated");
    }

    pub fn toggle_waste_type(
        &mut self,
        waste_type: WasteType,
    ) {
        let mut types = self.waste_types.clone();
        if !types.remove(&waste_type) {
            types.insert(waste_type);
        }
        self.set_waste_types(types);
    }

    /// # Errors
    ///
    /// [`OrderError::HeavyWasteNotApplicable`] unless the selected waste
    /// includes construction or garden waste.
    pub fn set_heavy_waste_types<I>(
        &mut self,
        types: I,
    ) -> Result<(), OrderError>
    where
        I: IntoIterator<Item = HeavyWasteType>,
    {
        if !self.needs_heavy_waste_declaration() {
            return Err(OrderError::HeavyWasteNotApplicable);
        }
        self.heavy_waste_types = types.into_iter().collect();
        debug!(heavy_waste_types = ?self.heavy_waste_types, "heavy waste declared");
        Ok(())
    }

    // ── step 3: skip ────────────────────────────────────────────────────

    pub fn select_skip(
        &mut self,
        skip: Skip,
    ) {
        info!(skip_id = skip.id, size = skip.size, "skip selected");
        self.selected_skip = Some(skip);
    }

    // ── step 4: placement ───────────────────────────────────────────────

    /// Sets where the skip stands. The permit flag is written in the same
    /// update, and a stored delivery date that the permit lead time now
    /// rules out is cleared.
    pub fn set_skip_location(
        &mut self,
        location: SkipPlacement,
    ) {
        self.skip_location = location;
        self.permit_required = location.requires_permit();
        debug!(%location, permit_required = self.permit_required, "skip location updated");
        self.drop_date_before_minimum();
    }

    pub fn attach_photo(
        &mut self,
        photo: SkipPhoto,
    ) {
        debug!(?photo, "placement photo attached");
        self.skip_photo = Some(photo);
    }

    pub fn remove_photo(&mut self) {
        self.skip_photo = None;
    }

    // ── step 5: date ────────────────────────────────────────────────────

    /// Recomputes the delivery window from the wall-clock `today` and
    /// returns the new earliest delivery date. Call whenever the date step
    /// is shown.
    pub fn refresh_delivery_window(
        &mut self,
        today: NaiveDate,
    ) -> NaiveDate {
        self.date_anchor = Some(today);
        self.drop_date_before_minimum();
        calculations::minimum_delivery_date(today, self.permit_required)
    }

    /// # Errors
    ///
    /// Weekends and dates before the earliest delivery date for `today`
    /// are refused and leave the stored date unchanged.
    pub fn set_delivery_date(
        &mut self,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<(), OrderError> {
        let minimum = calculations::minimum_delivery_date(today, self.permit_required);
        if !calculations::is_working_day(date) {
            return Err(OrderError::WeekendDelivery(date));
        }
        if date < minimum {
            return Err(OrderError::DeliveryTooEarly { date, minimum });
        }
        self.date_anchor = Some(today);
        self.date = Some(date);
        info!(%date, "delivery date chosen");
        Ok(())
    }

    fn drop_date_before_minimum(&mut self) {
        if let (Some(date), Some(minimum)) = (self.date, self.minimum_date()) {
            if date < minimum {
                info!(%date, %minimum, "delivery date no longer available, clearing it");
                self.date = None;
            }
        }
    }

    pub(crate) fn set_step(
        &mut self,
        step: WizardStep,
    ) {
        if step != self.step {
            info!(from = %self.step, to = %step, "wizard step changed");
        }
        self.step = step;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::test_support;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_order_starts_empty_at_postcode() {
        let order = OrderState::new();

        assert_eq!(order.step(), WizardStep::Postcode);
        assert_eq!(order.postcode(), "");
        assert_eq!(order.skip_location(), SkipPlacement::Private);
        assert!(!order.permit_required());
        assert_eq!(order.date(), None);
        assert_eq!(order.price(), None);
    }

    #[test]
    fn selecting_address_sets_postcode_and_address() {
        let mut order = OrderState::new();

        order.select_address(&test_support::candidate("12 High Street", "Lowestoft NR32 1AB"));

        assert_eq!(order.postcode(), "NR32 1AB");
        assert_eq!(order.address(), "12 High Street, Lowestoft NR32 1AB");

        order.clear_address();
        assert_eq!(order.postcode(), "");
    }

    #[test]
    fn location_writes_permit_flag_together() {
        let mut order = OrderState::new();

        order.set_skip_location(SkipPlacement::Public);
        assert!(order.permit_required());

        order.set_skip_location(SkipPlacement::Private);
        assert!(!order.permit_required());
    }

    #[test]
    fn heavy_waste_rejected_without_trigger_category() {
        let mut order = OrderState::new();
        order.set_waste_types([WasteType::Household]);

        let result = order.set_heavy_waste_types([HeavyWasteType::Soil]);

        assert_eq!(result, Err(OrderError::HeavyWasteNotApplicable));
        assert!(order.heavy_waste_types().is_empty());
    }

    #[test]
    fn heavy_waste_cleared_when_trigger_removed() {
        let mut order = OrderState::new();
        order.set_waste_types([WasteType::Garden, WasteType::Household]);
        order
            .set_heavy_waste_types([HeavyWasteType::Soil, HeavyWasteType::Gravel])
            .unwrap();

        order.toggle_waste_type(WasteType::Garden);

        assert_eq!(order.waste_types(), &BTreeSet::from([WasteType::Household]));
        assert!(order.heavy_waste_types().is_empty());
    }

    #[test]
    fn heavy_waste_kept_while_another_trigger_remains() {
        let mut order = OrderState::new();
        order.set_waste_types([WasteType::Garden, WasteType::Construction]);
        order.set_heavy_waste_types([HeavyWasteType::Bricks]).unwrap();

        order.toggle_waste_type(WasteType::Garden);

        assert_eq!(
            order.heavy_waste_types(),
            &BTreeSet::from([HeavyWasteType::Bricks])
        );
    }

    #[test]
    fn delivery_date_rejects_weekend() {
        let mut order = OrderState::new();

        let result = order.set_delivery_date(date(2024, 6, 8), date(2024, 6, 3));

        assert_eq!(result, Err(OrderError::WeekendDelivery(date(2024, 6, 8))));
        assert_eq!(order.date(), None);
    }

    #[test]
    fn delivery_date_rejects_before_minimum() {
        let mut order = OrderState::new();
        order.set_skip_location(SkipPlacement::Public);

        let result = order.set_delivery_date(date(2024, 6, 4), date(2024, 6, 3));

        assert_eq!(
            result,
            Err(OrderError::DeliveryTooEarly {
                date: date(2024, 6, 4),
                minimum: date(2024, 6, 11),
            })
        );
    }

    #[test]
    fn permit_switch_clears_date_inside_lead_time() {
        let mut order = OrderState::new();
        order.set_delivery_date(date(2024, 6, 4), date(2024, 6, 3)).unwrap();

        order.set_skip_location(SkipPlacement::Public);

        assert_eq!(order.date(), None);
    }

    #[test]
    fn permit_switch_keeps_date_beyond_lead_time() {
        let mut order = OrderState::new();
        order.set_delivery_date(date(2024, 6, 12), date(2024, 6, 3)).unwrap();

        order.set_skip_location(SkipPlacement::Public);

        assert_eq!(order.date(), Some(date(2024, 6, 12)));
    }

    #[test]
    fn refreshing_window_on_later_day_clears_stale_date() {
        let mut order = OrderState::new();
        order.set_delivery_date(date(2024, 6, 4), date(2024, 6, 3)).unwrap();

        let minimum = order.refresh_delivery_window(date(2024, 6, 5));

        assert_eq!(minimum, date(2024, 6, 6));
        assert_eq!(order.date(), None);
    }

    #[test]
    fn price_and_collection_follow_selection() {
        let mut order = OrderState::new();
        order.select_skip(test_support::skip(1, 4, dec!(216.00)));
        order.set_skip_location(SkipPlacement::Public);
        order.set_delivery_date(date(2024, 6, 17), date(2024, 6, 3)).unwrap();

        let price = order.price().unwrap();

        assert_eq!(price.total, dec!(343.20));
        assert_eq!(order.collection_date(), Some(date(2024, 7, 1)));
    }
}
