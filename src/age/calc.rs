use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};

use super::date::{CalendarDate, days_in_month};

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;

/// An age as a calendar breakdown plus elapsed totals.
///
/// The breakdown borrows whole months, so it is not derived from the totals.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct AgeResult {
    pub years: i32,
    pub months: i32,
    pub days: i32,
    pub total_days: i64,
    pub total_hours: i64,
    pub total_minutes: i64,
}

/// Age from midnight of `birth` to midnight of `today`.
pub fn compute_age(birth: CalendarDate, today: CalendarDate) -> AgeResult {
    let mut years = today.year() - birth.year();
    let mut months = today.month0() as i32 - birth.month0() as i32;
    let mut days = today.day() as i32 - birth.day() as i32;

    if days < 0 {
        months -= 1;
        let (prev_month0, prev_year) = match today.month0() {
            0 => (11, today.year() - 1),
            m => (m - 1, today.year()),
        };
        days += days_in_month(prev_month0, prev_year) as i32;
    }

    if months < 0 {
        years -= 1;
        months += 12;
    }

    let elapsed_days = (today.as_naive() - birth.as_naive()).num_days();

    AgeResult {
        years,
        months,
        days,
        total_days: elapsed_days,
        total_hours: elapsed_days * 24,
        total_minutes: elapsed_days * 24 * 60,
    }
}

/// Age from midnight of `birth` to the instant `now`.
///
/// Totals include the time of day; the breakdown only looks at the date.
pub fn compute_age_at(birth: CalendarDate, now: NaiveDateTime) -> AgeResult {
    let elapsed_ms = (now - birth.as_naive().and_time(NaiveTime::MIN)).num_milliseconds();

    AgeResult {
        total_days: elapsed_ms.div_euclid(MS_PER_DAY),
        total_hours: elapsed_ms.div_euclid(MS_PER_HOUR),
        total_minutes: elapsed_ms.div_euclid(MS_PER_MINUTE),
        ..compute_age(birth, CalendarDate::from(now.date()))
    }
}

impl fmt::Display for AgeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

fn plural(n: i32) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Group digits in threes with commas: `1234567` -> `1,234,567`.
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
