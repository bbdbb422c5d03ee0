//! Delivery and collection date rules.
//!
//! Deliveries happen on working days (Monday to Friday) only. The earliest
//! delivery is tomorrow; when the skip needs a council permit the earliest
//! delivery moves a further five working days out to cover processing.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Working days needed to process a council permit.
pub const PERMIT_LEAD_WORKING_DAYS: u32 = 5;

/// Days between delivery and collection.
pub const HIRE_PERIOD_DAYS: u64 = 14;

/// Number of dates offered as one-tap choices on the date step.
pub const QUICK_SELECT_COUNT: usize = 5;

pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Moves forward `count` working days from `start`, one day at a time,
/// counting only weekdays. `start` itself is never counted.
pub fn add_working_days(
    start: NaiveDate,
    count: u32,
) -> NaiveDate {
    let mut date = start;
    let mut remaining = count;
    while remaining > 0 {
        date = date.succ_opt().unwrap_or(date);
        if is_working_day(date) {
            remaining -= 1;
        }
    }
    date
}

/// Earliest date a skip can be delivered when the customer is choosing on
/// `today`.
///
/// ```
/// use chrono::NaiveDate;
/// use hire_core::calculations::minimum_delivery_date;
///
/// // Monday 3 June 2024
/// let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
///
/// assert_eq!(minimum_delivery_date(today, false), NaiveDate::from_ymd_opt(2024, 6, 4).unwrap());
/// assert_eq!(minimum_delivery_date(today, true), NaiveDate::from_ymd_opt(2024, 6, 11).unwrap());
/// ```
pub fn minimum_delivery_date(
    today: NaiveDate,
    permit_required: bool,
) -> NaiveDate {
    let tomorrow = today.succ_opt().unwrap_or(today);
    if permit_required {
        add_working_days(tomorrow, PERMIT_LEAD_WORKING_DAYS)
    } else {
        tomorrow
    }
}

/// A date can be booked if it is a working day on or after the minimum.
pub fn is_selectable(
    date: NaiveDate,
    minimum: NaiveDate,
) -> bool {
    is_working_day(date) && date >= minimum
}

/// The next `count` bookable dates starting at `minimum`.
pub fn quick_select_dates(
    minimum: NaiveDate,
    count: usize,
) -> Vec<NaiveDate> {
    minimum
        .iter_days()
        .filter(|date| is_working_day(*date))
        .take(count)
        .collect()
}

/// Collection is a fixed 14 days after delivery.
pub fn collection_date(delivery: NaiveDate) -> NaiveDate {
    delivery
        .checked_add_days(Days::new(HIRE_PERIOD_DAYS))
        .unwrap_or(delivery)
}
