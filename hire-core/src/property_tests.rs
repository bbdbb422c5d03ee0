//! Property-based tests for the order store and its derived values.

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Days, NaiveDate, Weekday};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    use crate::calculations::{
        self, PERMIT_FEE, PriceBreakdown, is_working_day, minimum_delivery_date,
    };
    use crate::catalog::{SkipSort, sort_skips};
    use crate::models::{OrderState, Skip, SkipPlacement, WizardStep};
    use crate::test_support::skip;

    // ===== STRATEGY HELPERS =====

    #[derive(Debug, Clone, Copy)]
    enum Nav {
        Next,
        Prev,
        GoTo(u8),
    }

    fn any_nav() -> impl Strategy<Value = Nav> {
        prop_oneof![
            Just(Nav::Next),
            Just(Nav::Prev),
            (1u8..=6).prop_map(Nav::GoTo),
        ]
    }

    fn any_placement() -> impl Strategy<Value = SkipPlacement> {
        prop_oneof![Just(SkipPlacement::Private), Just(SkipPlacement::Public)]
    }

    /// Any day in 2020..2030.
    fn any_day() -> impl Strategy<Value = NaiveDate> {
        (0u64..3_650).prop_map(|offset| {
            NaiveDate::from_ymd_opt(2020, 1, 1)
                .and_then(|d| d.checked_add_days(Days::new(offset)))
                .unwrap_or_default()
        })
    }

    fn any_skips() -> impl Strategy<Value = Vec<Skip>> {
        prop::collection::vec((1u32..=40, 50u32..1_000), 0..12).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (size, price))| skip(i as i64, size, Decimal::from(price)))
                .collect()
        })
    }

    fn any_sort() -> impl Strategy<Value = SkipSort> {
        prop::sample::select(SkipSort::all().to_vec())
    }

    // ===== SEQUENCER =====

    proptest! {
        /// Property: navigation never leaves steps 1..=6 and next/prev move
        /// at most one step
        #[test]
        fn navigation_stays_in_bounds(moves in prop::collection::vec(any_nav(), 0..40)) {
            let mut order = OrderState::new();
            for nav in moves {
                let before = order.step().number();
                match nav {
                    Nav::Next => order.next_step(),
                    Nav::Prev => order.prev_step(),
                    Nav::GoTo(n) => order.go_to_step(WizardStep::from_number(n).unwrap_or_default()),
                }
                let after = order.step().number();
                prop_assert!((1..=6).contains(&after));
                if !matches!(nav, Nav::GoTo(_)) {
                    prop_assert!(before.abs_diff(after) <= 1);
                }
            }
        }

        /// Property: a fresh order refuses to advance past step 1
        #[test]
        fn fresh_order_cannot_advance(attempts in 1usize..5) {
            let mut order = OrderState::new();
            for _ in 0..attempts {
                prop_assert!(order.try_advance().is_err());
            }
            prop_assert_eq!(order.step(), WizardStep::Postcode);
        }
    }

    // ===== PERMIT COUPLING =====

    proptest! {
        /// Property: the permit flag always matches the last placement chosen
        #[test]
        fn permit_follows_placement(placements in prop::collection::vec(any_placement(), 1..20)) {
            let mut order = OrderState::new();
            for placement in &placements {
                order.set_skip_location(*placement);
                prop_assert_eq!(order.permit_required(), *placement == SkipPlacement::Public);
            }
        }

        /// Property: a stored delivery date is never earlier than the
        /// current minimum
        #[test]
        fn stored_date_respects_minimum(
            today in any_day(),
            offset in 1u64..30,
            placements in prop::collection::vec(any_placement(), 1..6),
        ) {
            let mut order = OrderState::new();
            order.refresh_delivery_window(today);
            let wanted = today.checked_add_days(Days::new(offset)).unwrap_or(today);
            let _ = order.set_delivery_date(wanted, today);
            for placement in placements {
                order.set_skip_location(placement);
                if let (Some(date), Some(minimum)) = (order.date(), order.minimum_date()) {
                    prop_assert!(date >= minimum);
                }
            }
        }
    }

    // ===== DATES =====

    proptest! {
        /// Property: without a permit the minimum is tomorrow
        #[test]
        fn minimum_without_permit_is_tomorrow(today in any_day()) {
            prop_assert_eq!(minimum_delivery_date(today, false), today.succ_opt().unwrap());
        }

        /// Property: with a permit the minimum is a working day exactly five
        /// working days after tomorrow
        #[test]
        fn minimum_with_permit_counts_working_days(today in any_day()) {
            let tomorrow = today.succ_opt().unwrap();
            let minimum = minimum_delivery_date(today, true);

            prop_assert!(is_working_day(minimum));
            let counted = tomorrow
                .iter_days()
                .skip(1)
                .take_while(|d| *d <= minimum)
                .filter(|d| is_working_day(*d))
                .count();
            prop_assert_eq!(counted, 5);
            prop_assert!(minimum >= minimum_delivery_date(today, false));
        }

        /// Property: quick-select dates are bookable and ascending
        #[test]
        fn quick_select_dates_are_bookable(today in any_day(), permit in any::<bool>()) {
            let minimum = minimum_delivery_date(today, permit);
            let dates = calculations::quick_select_dates(minimum, 5);

            prop_assert_eq!(dates.len(), 5);
            for pair in dates.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
            for date in dates {
                prop_assert!(calculations::is_selectable(date, minimum));
                prop_assert!(!matches!(date.weekday(), Weekday::Sat | Weekday::Sun));
            }
        }

        /// Property: collection is always 14 days after delivery
        #[test]
        fn collection_is_fourteen_days_later(delivery in any_day()) {
            let collection = calculations::collection_date(delivery);
            prop_assert_eq!((collection - delivery).num_days(), 14);
        }
    }

    // ===== PRICING =====

    proptest! {
        /// Property: total is subtotal plus VAT plus any permit fee
        #[test]
        fn total_adds_up(pence in 0i64..500_000, permit in any::<bool>()) {
            let price = Decimal::new(pence, 2);
            let breakdown = PriceBreakdown::calculate(price, permit);

            prop_assert_eq!(breakdown.total, breakdown.subtotal + breakdown.vat + breakdown.permit_fee);
            let expected_fee = if permit { PERMIT_FEE } else { Decimal::ZERO };
            prop_assert_eq!(breakdown.permit_fee, expected_fee);
        }
    }

    // ===== CATALOG SORT =====

    proptest! {
        /// Property: sorting never mutates the input and keeps every skip
        #[test]
        fn sort_keeps_input_and_members(skips in any_skips(), sort in any_sort()) {
            let original = skips.clone();
            let mut sorted = sort_skips(&skips, sort);

            prop_assert_eq!(&skips, &original);
            sorted.sort_by_key(|s| s.id);
            prop_assert_eq!(sorted, original);
        }

        /// Property: sorting twice gives the same result as sorting once
        #[test]
        fn sort_is_idempotent(skips in any_skips(), sort in any_sort()) {
            let once = sort_skips(&skips, sort);
            prop_assert_eq!(sort_skips(&once, sort), once);
        }

        /// Property: with distinct prices, high-to-low is the reverse of
        /// low-to-high
        #[test]
        fn price_orders_are_reverses(prices in prop::collection::btree_set(1u32..10_000, 0..12)) {
            let skips: Vec<Skip> = prices
                .into_iter()
                .rev()
                .enumerate()
                .map(|(i, price)| skip(i as i64, 6, Decimal::from(price)))
                .collect();

            let mut low = sort_skips(&skips, SkipSort::PriceLow);
            low.reverse();
            prop_assert_eq!(low, sort_skips(&skips, SkipSort::PriceHigh));
        }
    }
}
