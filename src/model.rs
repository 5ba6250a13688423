//! model.rs
//!
//! Core value types shared by the calendar primitives, the Easter
//! algorithms, and the rule evaluator: [`Month`], [`WeekDay`], [`Direction`],
//! [`Unit`], and [`Ordinal`]. These mirror `annual.model.Month`/`WeekDay`
//! from the Python original, expressed as small `#[repr]` enums and newtypes
//! so that invalid values (month 13, ordinal 0, ...) are unrepresentable
//! rather than checked at every call site.

use std::num::NonZeroU32;

/// The twelve months of the Gregorian civil calendar, numbered 1–12.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
}

impl Month {
    /// The 1-based month number, matching `chrono`'s `Datelike::month`.
    pub fn number(self) -> u32 {
        self as u8 as u32
    }

    /// Builds a `Month` from its 1-based number, `None` outside `1..=12`.
    pub fn from_number(n: u32) -> Option<Self> {
        use Month::*;
        Some(match n {
            1 => January,
            2 => February,
            3 => March,
            4 => April,
            5 => May,
            6 => June,
            7 => July,
            8 => August,
            9 => September,
            10 => October,
            11 => November,
            12 => December,
            _ => return None,
        })
    }
}

/// The seven days of the week, 0 = Monday through 6 = Sunday (ISO indexing).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeekDay {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
    Saturday = 5,
    Sunday = 6,
}

impl WeekDay {
    /// The ISO weekday index, 0 = Monday … 6 = Sunday.
    pub fn value(self) -> u32 {
        self as u8 as u32
    }

    /// Builds a `WeekDay` from its ISO index, `None` outside `0..=6`.
    pub fn from_value(n: u32) -> Option<Self> {
        use WeekDay::*;
        Some(match n {
            0 => Monday,
            1 => Tuesday,
            2 => Wednesday,
            3 => Thursday,
            4 => Friday,
            5 => Saturday,
            6 => Sunday,
            _ => return None,
        })
    }
}

impl From<chrono::Weekday> for WeekDay {
    fn from(w: chrono::Weekday) -> Self {
        WeekDay::from_value(w.num_days_from_monday()).expect("chrono::Weekday is always 0..=6")
    }
}

impl From<WeekDay> for chrono::Weekday {
    fn from(w: WeekDay) -> Self {
        chrono::Weekday::try_from(w.value() as u8).expect("WeekDay is always 0..=6")
    }
}

/// A signed direction: `After` shifts forward in time, `Before` backward.
///
/// Used as the `+1`/`-1` scalar multiplier for offset and weekday-relative
/// computations (`spec` §3 "Direction").
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    After = 1,
    Before = -1,
}

impl Direction {
    pub fn as_multiplier(self) -> i64 {
        self as i8 as i64
    }

    pub fn negate(self) -> Direction {
        match self {
            Direction::After => Direction::Before,
            Direction::Before => Direction::After,
        }
    }
}

/// A unit of offset: either whole days, or weeks (a multiplier of 7 days).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Days,
    Weeks,
}

impl Unit {
    pub fn days(self) -> i64 {
        match self {
            Unit::Days => 1,
            Unit::Weeks => 7,
        }
    }
}

/// A positive 1-based ordinal ("first", "second", ..., "21st"). The grammar
/// never produces `0`; encoding that as `NonZeroU32` removes a class of
/// bounds checks the evaluator would otherwise need to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordinal(NonZeroU32);

impl Ordinal {
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Ordinal)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl std::fmt::Display for Ordinal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_round_trips_its_number() {
        for n in 1..=12u32 {
            assert_eq!(Month::from_number(n).unwrap().number(), n);
        }
        assert!(Month::from_number(0).is_none());
        assert!(Month::from_number(13).is_none());
    }

    #[test]
    fn weekday_value_matches_iso_indexing() {
        assert_eq!(WeekDay::Monday.value(), 0);
        assert_eq!(WeekDay::Sunday.value(), 6);
    }

    #[test]
    fn weekday_round_trips_through_chrono() {
        for n in 0..7u32 {
            let wd = WeekDay::from_value(n).unwrap();
            let chrono_wd: chrono::Weekday = wd.into();
            let back: WeekDay = chrono_wd.into();
            assert_eq!(wd, back);
        }
    }

    #[test]
    fn ordinal_rejects_zero() {
        assert!(Ordinal::new(0).is_none());
        assert_eq!(Ordinal::new(3).unwrap().get(), 3);
    }
}
