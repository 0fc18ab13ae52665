use crate::errors::AgeError;

use super::date::{CalendarDate, normalize};

/// Maximum accepted age when no limit is configured.
pub const DEFAULT_MAX_AGE_YEARS: u16 = 150;

/// Raw date fields as entered, before any calendar validation.
///
/// `month` is 0-based. Values may be out of range (day 30 in February);
/// `validate` decides what they mean.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DateParts {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

impl DateParts {
    /// Parse the three text fields of the birth-date form.
    ///
    /// `month` is the human month number (1 = January) and is stored 0-based.
    /// A day or year of `0` counts as not filled in.
    pub fn parse(day: &str, month: &str, year: &str) -> Result<Self, AgeError> {
        let day = parse_field("day", day)?;
        let month_raw = month;
        let month = parse_field("month", month)?;
        let year = parse_field("year", year)?;

        if day == 0 {
            return Err(AgeError::MissingField { field: "day" });
        }
        if year == 0 {
            return Err(AgeError::MissingField { field: "year" });
        }

        let month = month
            .checked_sub(1)
            .ok_or_else(|| AgeError::InvalidNumber {
                field: "month",
                value: month_raw.trim().to_string(),
            })?;

        Ok(Self { year, month, day })
    }
}

fn parse_field(field: &'static str, raw: &str) -> Result<i32, AgeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AgeError::MissingField { field });
    }
    raw.parse::<i32>().map_err(|_| AgeError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// Validate `parts` as a birth date no more than `max_age_years` before
/// `today`.
///
/// The checks run on the normalized date in this order: future, too old,
/// then whether normalization changed any field.
pub fn validate(
    parts: DateParts,
    today: CalendarDate,
    max_age_years: u16,
) -> Result<CalendarDate, AgeError> {
    let date =
        normalize(parts.year, parts.month, parts.day).ok_or(AgeError::InvalidCalendarDate)?;

    if date > today {
        return Err(AgeError::FutureDate);
    }

    let oldest = today
        .years_before(i32::from(max_age_years))
        .ok_or(AgeError::TooOld)?;
    if date < oldest {
        return Err(AgeError::TooOld);
    }

    if date.year() != parts.year
        || date.month0() as i32 != parts.month
        || date.day() as i32 != parts.day
    {
        return Err(AgeError::InvalidCalendarDate);
    }

    Ok(date)
}
