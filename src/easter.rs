//! easter.rs
//!
//! Easter algorithms (component C2): Western Gregorian Easter, Orthodox
//! Easter expressed in the Gregorian calendar, and pure Julian Easter. All
//! three are registered in the function registry under the names `easter`,
//! `easter_orthodox`, and `easter_julian` (see `registry::builtins`).
//!
//! The Paschal Full Moon computation follows the GM-Arts revised method
//! (<http://dates.gmarts.org/eastalg.htm>); this module computes it exactly
//! rather than approximating it the way `Date::Easter`-style "Anonymous
//! Gregorian Computus" formulas do, since the century-bucket corrections
//! below are needed to stay correct across the full 1583–4099 validity
//! window (see the reference vector in the crate's test suite).

use crate::date::{Date, MaybeDate};
use crate::model::Month;

/// Calculates the Western (Roman Catholic / Protestant) Easter date.
///
/// Valid for years 1583–4099; outside that range, returns `None`.
///
/// ```
/// # use annual::easter::easter;
/// let d = easter(2024).unwrap();
/// assert_eq!((d.year(), d.month().number(), d.day()), (2024, 3, 31));
/// ```
pub fn easter(year: i32) -> MaybeDate {
    if !(1583..=4099).contains(&year) {
        return None;
    }
    let pfm = paschal_full_moon(year);
    let day = find_next_sunday(year, pfm, true);
    Some(easter_day_to_date(year, day))
}

/// Calculates the Orthodox Easter date, expressed in the Gregorian
/// calendar: the original Julian computation, followed by the
/// Julian-to-Gregorian calendar offset.
///
/// Valid for years 1583–4099; outside that range, returns `None`.
///
/// ```
/// # use annual::easter::easter_orthodox;
/// let d = easter_orthodox(2016).unwrap();
/// assert_eq!((d.year(), d.month().number(), d.day()), (2016, 5, 1));
/// ```
pub fn easter_orthodox(year: i32) -> MaybeDate {
    if !(1583..=4099).contains(&year) {
        return None;
    }
    let golden = year.rem_euclid(19);
    let pfm = ((225 - 11 * golden).rem_euclid(30)) + 21;
    let day = find_next_sunday(year, pfm, false) + julian_easter_to_gregorian_offset(year);
    Some(easter_day_to_date(year, day))
}

/// Calculates the Julian Easter date, without conversion to the Gregorian
/// calendar.
///
/// Valid for years `>= 326`; outside that range, returns `None`.
///
/// ```
/// # use annual::easter::easter_julian;
/// let d = easter_julian(2016).unwrap();
/// assert_eq!((d.year(), d.month().number(), d.day()), (2016, 4, 18));
/// ```
pub fn easter_julian(year: i32) -> MaybeDate {
    if year < 326 {
        return None;
    }
    let golden = year.rem_euclid(19);
    let pfm = ((225 - 11 * golden).rem_euclid(30)) + 21;
    let day = find_next_sunday(year, pfm, false);
    Some(easter_day_to_date(year, day))
}

/// The Paschal Full Moon date, counted from 20 March.
fn paschal_full_moon(year: i32) -> i32 {
    let century = year.div_euclid(100);
    let golden = year.rem_euclid(19);

    let mut temp = (century - 15).div_euclid(2) + 202 - 11 * golden;
    match century {
        21 | 24 | 25 | 27 | 28 | 29 | 30 | 31 | 32 | 34 | 35 | 38 => temp -= 1,
        33 | 36 | 37 | 39 | 40 => temp -= 2,
        _ => {}
    }
    temp = temp.rem_euclid(30);

    if temp == 29 || (temp == 28 && golden > 10) {
        temp + 20
    } else {
        temp + 21
    }
}

/// The day (in March, where "32 March" denotes 1 April) of the first Sunday
/// on or after the Paschal Full Moon.
fn find_next_sunday(year: i32, pfm: i32, is_western: bool) -> i32 {
    let term_b = (pfm - 19).rem_euclid(7);
    let mut term_c = (40 - year.div_euclid(100)).rem_euclid(if is_western { 4 } else { 7 });
    if is_western {
        if term_c == 3 {
            term_c += 1;
        }
        if term_c > 1 {
            term_c += 1;
        }
    }
    let temp = year.rem_euclid(100);
    let term_d = (temp + temp.div_euclid(4)).rem_euclid(7);
    pfm + ((20 - term_b - term_c - term_d).rem_euclid(7)) + 1
}

/// The number of days to add to a Julian Easter date to express it in the
/// Gregorian calendar.
fn julian_easter_to_gregorian_offset(year: i32) -> i32 {
    let mut century = year.div_euclid(100);
    let skip = 10;
    if century <= 16 {
        return skip;
    }
    century -= 16;
    skip + century - century.div_euclid(4)
}

/// Converts "days after (and including) 1 March" into a proper date, in
/// March, April, or May.
fn easter_day_to_date(year: i32, day: i32) -> Date {
    if day > 61 {
        Date::new(year, Month::May, (day - 61) as u32)
    } else if day > 31 {
        Date::new(year, Month::April, (day - 31) as u32)
    } else {
        Date::new(year, Month::March, day as u32)
    }
    .expect("easter day offset always falls within March..May")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(d: Date) -> (i32, u32, u32) {
        (d.year(), d.month().number(), d.day())
    }

    #[test]
    fn western_easter_out_of_range() {
        assert_eq!(easter(1), None);
        assert_eq!(easter(4109), None);
    }

    #[test]
    fn western_easter_reference_vector() {
        assert_eq!(ymd(easter(1704).unwrap()), (1704, 3, 23));
        assert_eq!(ymd(easter(1844).unwrap()), (1844, 4, 7));
        assert_eq!(ymd(easter(1950).unwrap()), (1950, 4, 9));
        assert_eq!(ymd(easter(3249).unwrap()), (3249, 4, 25));
        assert_eq!(ymd(easter(3401).unwrap()), (3401, 3, 22));
        assert_eq!(ymd(easter(4099).unwrap()), (4099, 4, 19));
    }

    #[test]
    fn orthodox_easter_reference_vector() {
        assert_eq!(easter_orthodox(1), None);
        assert_eq!(easter_orthodox(4109), None);
        assert_eq!(ymd(easter_orthodox(1589).unwrap()), (1589, 4, 9));
        assert_eq!(ymd(easter_orthodox(1603).unwrap()), (1603, 5, 4));
        assert_eq!(ymd(easter_orthodox(2015).unwrap()), (2015, 4, 12));
        assert_eq!(ymd(easter_orthodox(2016).unwrap()), (2016, 5, 1));
    }

    #[test]
    fn julian_easter_reference_vector() {
        assert_eq!(easter_julian(1), None);
        assert_eq!(ymd(easter_julian(2015).unwrap()), (2015, 3, 30));
        assert_eq!(ymd(easter_julian(2016).unwrap()), (2016, 4, 18));
    }

    #[test]
    fn easter_always_falls_on_a_sunday() {
        for year in [1583, 1900, 2000, 2024, 4099] {
            let d = easter(year).unwrap();
            assert_eq!(d.weekday().value(), 6, "year {year}");
        }
    }
}
