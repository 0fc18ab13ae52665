use chrono::Local;
use log::{info, warn};

use crate::age::{CalendarDate, DateParts, compute_age_at, day_choices, format_thousands, validate};
use crate::config::Settings;
use crate::errors::AgeError;

/// Validate the birth date fields and print the age as of now.
///
/// Errors are printed to stderr here, together with the valid day range
/// when the day does not exist in the chosen month.
pub fn run(day: &str, month: &str, year: &str, settings: &Settings) -> Result<(), AgeError> {
    let parts = DateParts::parse(day, month, year).inspect_err(report)?;
    let now = Local::now().naive_local();
    let birth = validate(
        parts,
        CalendarDate::from(now.date()),
        settings.age.max_age_years,
    )
    .inspect_err(|e| {
        report(e);
        if *e == AgeError::InvalidCalendarDate {
            if let Some(hint) = day_hint(parts) {
                eprintln!("{hint}");
            }
        }
    })?;

    let age = compute_age_at(birth, now);
    info!("computed age for birth date {birth}");

    println!("Age: {age}");
    println!("Total days: {}", format_thousands(age.total_days));
    println!("Total hours: {}", format_thousands(age.total_hours));
    println!("Total minutes: {}", format_thousands(age.total_minutes));
    Ok(())
}

fn report(e: &AgeError) {
    warn!("age input rejected: {e}");
    eprintln!("{e}");
}

/// The days the entered month actually has, when the entered day is not one
/// of them.
fn day_hint(parts: DateParts) -> Option<String> {
    let month0 = u32::try_from(parts.month).ok().filter(|m| *m < 12)?;
    let days = day_choices(month0, parts.year);
    let day = u32::try_from(parts.day).ok();
    if day.is_some_and(|d| days.contains(&d)) {
        return None;
    }
    Some(format!(
        "Day must be between {} and {}.",
        days.start(),
        days.end()
    ))
}
