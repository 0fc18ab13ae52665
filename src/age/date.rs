use std::fmt;
use std::ops::RangeInclusive;

use chrono::{Datelike, Duration, NaiveDate};

/// A valid Gregorian calendar date with a 0-based month.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from a year, a 0-based month and a day, rejecting
    /// anything that does not exist on the calendar.
    #[cfg(test)]
    pub fn from_ymd0(year: i32, month0: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month0.checked_add(1)?, day).map(Self)
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Month in `0..=11`.
    pub fn month0(self) -> u32 {
        self.0.month0()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn as_naive(self) -> NaiveDate {
        self.0
    }

    /// The same month and day `years` earlier, normalized like any other
    /// constructed date (Feb 29 lands on Mar 1 in a common year).
    pub fn years_before(self, years: i32) -> Option<Self> {
        normalize(
            self.year().checked_sub(years)?,
            self.month0() as i32,
            self.day() as i32,
        )
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(d: NaiveDate) -> Self {
        Self(d)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Build a date from possibly out-of-range parts, rolling overflow into the
/// neighbouring months and years.
///
/// Month 12 is January of the next year, day 0 is the last day of the
/// previous month and February 30 is March 1 or 2. Returns `None` only when
/// the result falls outside the representable range.
pub fn normalize(year: i32, month0: i32, day: i32) -> Option<CalendarDate> {
    let year = year.checked_add(month0.div_euclid(12))?;
    let month = month0.rem_euclid(12) as u32 + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first
        .checked_add_signed(Duration::days(i64::from(day) - 1))
        .map(CalendarDate)
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the 0-based `month0` of `year`.
///
/// Months past December roll into the following years.
pub fn days_in_month(month0: u32, year: i32) -> u32 {
    let year = year.saturating_add((month0 / 12) as i32);
    match month0 % 12 {
        0 | 2 | 4 | 6 | 7 | 9 | 11 => 31,
        3 | 5 | 8 | 10 => 30,
        _ => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

/// Days offered by a day picker for the given month.
pub fn day_choices(month0: u32, year: i32) -> RangeInclusive<u32> {
    1..=days_in_month(month0, year)
}
