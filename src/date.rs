//! date.rs
//!
//! The `Date`/`MaybeDate` value types used throughout the crate. `Date`
//! wraps `chrono::NaiveDate` with the validating constructor and weekday
//! accessor the spec's data model calls for; `MaybeDate` is the first-class
//! "date or absence" value (`spec` §3 "MaybeDate" / "Absence"). Absence is
//! never encoded as a sentinel date — it is `None`.

use chrono::Datelike;

use crate::model::{Month, WeekDay};

/// A civil Gregorian calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(chrono::NaiveDate);

/// Either a valid [`Date`], or the distinguished absence value. Arithmetic
/// over `MaybeDate` propagates absence: see [`Date::add_days`] and the
/// combinators built on top of it in `calendar` and `rule::evaluator`.
pub type MaybeDate = Option<Date>;

impl Date {
    /// Constructs a date, returning `None` when `(year, month, day)` is not
    /// a valid Gregorian date (e.g. 29 February in a non-leap year).
    pub fn new(year: i32, month: Month, day: u32) -> Option<Self> {
        chrono::NaiveDate::from_ymd_opt(year, month.number(), day).map(Date)
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> Month {
        Month::from_number(self.0.month()).expect("chrono month is always 1..=12")
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn weekday(self) -> WeekDay {
        self.0.weekday().into()
    }

    /// Returns this date shifted by `days` (may be negative).
    pub fn add_days(self, days: i64) -> Date {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Signed difference in days, `self - other`.
    pub fn diff_days(self, other: Date) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
