//! calendar.rs
//!
//! Calendar primitives (component C1): day arithmetic, n-th/last weekday of
//! a month, and weekday-relative-to-a-date computations. These are the leaf
//! operations the rule evaluator (`rule::evaluator`) composes to fold
//! `owm_rule`, `lwd_rule`, and `wd_rule` productions.

use crate::date::Date;
use crate::model::{Month, WeekDay};

/// Shifts `d` by `n` days (`n` may be negative). Never fails.
///
/// ```
/// # use annual::calendar::days_relative_to;
/// # use annual::date::Date;
/// # use annual::model::Month;
/// let d = Date::new(2024, Month::January, 1).unwrap();
/// let next = days_relative_to(d, 1);
/// assert_eq!(next.day(), 2);
/// ```
pub fn days_relative_to(d: Date, n: i64) -> Date {
    d.add_days(n)
}

/// Computes the `ordinal`-th occurrence of `week_day` within `(year,
/// month)`. Returns `None` when no such occurrence exists (e.g. a 5th
/// occurrence that doesn't exist, or when a computed date spills into the
/// following month).
///
/// ```
/// # use annual::calendar::wd_of_month;
/// # use annual::model::{Month, WeekDay};
/// // Second Sunday of May 2024 is 2024-05-12.
/// let d = wd_of_month(2024, Month::May, 2, WeekDay::Sunday).unwrap();
/// assert_eq!((d.year(), d.month().number(), d.day()), (2024, 5, 12));
/// ```
pub fn wd_of_month(year: i32, month: Month, ordinal: u32, week_day: WeekDay) -> Option<Date> {
    let first = Date::new(year, month, 1)?;
    let offset = (week_day.value() as i64 - first.weekday().value() as i64).rem_euclid(7)
        + (ordinal as i64 - 1) * 7;
    let result = days_relative_to(first, offset);
    if result.year() == year && result.month() == month {
        Some(result)
    } else {
        None
    }
}

/// Computes the last occurrence of `week_day` within `(year, month)`.
///
/// December rolls the intermediate "first of next month" anchor into
/// January of `year + 1`; the returned date always lies in the requested
/// `(year, month)`.
///
/// ```
/// # use annual::calendar::last_wd_of_month;
/// # use annual::model::{Month, WeekDay};
/// let d = last_wd_of_month(2024, Month::December, WeekDay::Sunday);
/// assert_eq!((d.year(), d.month().number(), d.day()), (2024, 12, 29));
/// ```
pub fn last_wd_of_month(year: i32, month: Month, week_day: WeekDay) -> Date {
    let (target_year, target_month) = if month == Month::December {
        (year + 1, Month::January)
    } else {
        (year, Month::from_number(month.number() + 1).expect("month < 12"))
    };
    let first_of_next = Date::new(target_year, target_month, 1)
        .expect("first-of-month is always a valid date");
    wd_relative_to(first_of_next, week_day, -1, false)
}

/// Computes when `week_day` occurs relative to `anchor`.
///
/// `direction` must be `1` to search forward or `-1` to search backward.
/// `include_start` controls whether `anchor` itself is a valid result when
/// its weekday already matches.
///
/// ```
/// # use annual::calendar::wd_relative_to;
/// # use annual::date::Date;
/// # use annual::model::{Month, WeekDay};
/// let d = Date::new(2024, Month::June, 30).unwrap();
/// let friday = wd_relative_to(d, WeekDay::Friday, -1, true);
/// assert_eq!(friday.day(), 28);
/// ```
pub fn wd_relative_to(anchor: Date, week_day: WeekDay, direction: i64, include_start: bool) -> Date {
    let mut delta = (week_day.value() as i64 - anchor.weekday().value() as i64).rem_euclid(7);
    if delta == 0 {
        if include_start {
            return anchor;
        }
        delta = if direction > 0 { 7 } else { -7 };
    } else if direction < 0 {
        delta -= 7;
    }
    days_relative_to(anchor, delta)
}
