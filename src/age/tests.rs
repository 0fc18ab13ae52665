use super::*;
use crate::errors::AgeError;
use chrono::NaiveDate;

fn d(year: i32, month0: u32, day: u32) -> CalendarDate {
    CalendarDate::from_ymd0(year, month0, day).unwrap()
}

const MAX_AGE: u16 = DEFAULT_MAX_AGE_YEARS;

fn parts(year: i32, month: i32, day: i32) -> DateParts {
    DateParts { year, month, day }
}

#[test]
fn days_in_month_handles_leap_years() {
    assert_eq!(days_in_month(1, 2024), 29);
    assert_eq!(days_in_month(1, 2023), 28);
    assert_eq!(days_in_month(1, 1900), 28);
    assert_eq!(days_in_month(1, 2000), 29);
    assert_eq!(days_in_month(0, 2023), 31);
    assert_eq!(days_in_month(3, 2023), 30);
    assert_eq!(days_in_month(11, 2023), 31);
    // month 13 is February of the next year
    assert_eq!(days_in_month(13, 2023), 29);
}

#[test]
fn day_choices_follow_month_length() {
    assert_eq!(day_choices(1, 2024), 1..=29);
    assert_eq!(day_choices(8, 2024), 1..=30);
}

#[test]
fn normalize_rolls_overflow_into_next_month() {
    assert_eq!(normalize(2023, 1, 30), Some(d(2023, 2, 2)));
    assert_eq!(normalize(2024, 1, 30), Some(d(2024, 2, 1)));
    assert_eq!(normalize(2024, 12, 1), Some(d(2025, 0, 1)));
    assert_eq!(normalize(2024, 2, 0), Some(d(2024, 1, 29)));
    assert_eq!(normalize(2024, -1, 15), Some(d(2023, 11, 15)));
}

#[test]
fn years_before_normalizes_leap_day() {
    assert_eq!(d(2024, 1, 29).years_before(150), Some(d(1874, 2, 1)));
    assert_eq!(d(2024, 5, 10).years_before(150), Some(d(1874, 5, 10)));
}

#[test]
fn validate_accepts_valid_dates_in_range() {
    let today = d(2024, 2, 14);
    for (y, m, day) in [(2000, 2, 15), (2024, 2, 14), (1874, 2, 14), (1990, 11, 31)] {
        let got = validate(parts(y, m, day), today, MAX_AGE).unwrap();
        assert_eq!(
            (got.year(), got.month0() as i32, got.day() as i32),
            (y, m, day)
        );
    }
}

#[test]
fn validate_rejects_future_dates() {
    let today = d(2024, 2, 14);
    assert_eq!(validate(parts(2024, 2, 15), today, MAX_AGE), Err(AgeError::FutureDate));
    assert_eq!(validate(parts(2030, 0, 1), today, MAX_AGE), Err(AgeError::FutureDate));
}

#[test]
fn validate_rejects_dates_older_than_limit() {
    let today = d(2024, 2, 14);
    assert_eq!(validate(parts(1874, 2, 13), today, MAX_AGE), Err(AgeError::TooOld));
    assert_eq!(
        validate(parts(1990, 0, 1), today, 30),
        Err(AgeError::TooOld)
    );
    assert!(validate(parts(1995, 0, 1), today, 30).is_ok());
}

#[test]
fn validate_rejects_feb_30_and_non_leap_feb_29() {
    let today = d(2025, 5, 1);
    for year in [1999, 2000, 2023, 2024] {
        assert_eq!(
            validate(parts(year, 1, 30), today, MAX_AGE),
            Err(AgeError::InvalidCalendarDate)
        );
    }
    assert!(validate(parts(2024, 1, 29), today, MAX_AGE).is_ok());
    assert!(validate(parts(2000, 1, 29), today, MAX_AGE).is_ok());
    assert_eq!(
        validate(parts(2023, 1, 29), today, MAX_AGE),
        Err(AgeError::InvalidCalendarDate)
    );
    assert_eq!(
        validate(parts(1900, 1, 29), today, MAX_AGE),
        Err(AgeError::InvalidCalendarDate)
    );
}

#[test]
fn validate_checks_future_before_calendar_validity() {
    // Feb 30 2024 normalizes to Mar 1 2024, which is after today.
    let today = d(2024, 1, 20);
    assert_eq!(validate(parts(2024, 1, 30), today, MAX_AGE), Err(AgeError::FutureDate));
}

#[test]
fn parse_reports_missing_and_malformed_fields() {
    assert_eq!(
        DateParts::parse("15", "3", "2000"),
        Ok(parts(2000, 2, 15))
    );
    assert_eq!(
        DateParts::parse(" ", "3", "2000"),
        Err(AgeError::MissingField { field: "day" })
    );
    assert_eq!(
        DateParts::parse("15", "", "2000"),
        Err(AgeError::MissingField { field: "month" })
    );
    assert!(matches!(
        DateParts::parse("15", "3", "20x0"),
        Err(AgeError::InvalidNumber { field: "year", .. })
    ));
    assert_eq!(
        DateParts::parse("1", "-2147483648", "2000"),
        Err(AgeError::InvalidNumber {
            field: "month",
            value: "-2147483648".into()
        })
    );
    assert_eq!(
        DateParts::parse("1", "2147483647", "2000").map(|p| p.month),
        Ok(2147483646)
    );
}

#[test]
fn parse_treats_zero_day_and_year_as_missing() {
    assert_eq!(
        DateParts::parse("0", "3", "2000"),
        Err(AgeError::MissingField { field: "day" })
    );
    assert_eq!(
        DateParts::parse("15", "3", "0"),
        Err(AgeError::MissingField { field: "year" })
    );
    assert_eq!(
        DateParts::parse(" 00 ", "3", "2000"),
        Err(AgeError::MissingField { field: "day" })
    );
    // A negative day is filled in; validation rejects it later.
    assert_eq!(DateParts::parse("-1", "3", "2000"), Ok(parts(2000, 2, -1)));
}

#[test]
fn compute_age_borrows_from_leap_february() {
    let age = compute_age(d(2000, 2, 15), d(2024, 2, 14));
    assert_eq!((age.years, age.months, age.days), (23, 11, 28));
}

#[test]
fn compute_age_borrows_across_january() {
    // Borrowing in January uses December of the previous year.
    let age = compute_age(d(2000, 10, 20), d(2024, 0, 5));
    assert_eq!((age.years, age.months, age.days), (23, 1, 16));
}

#[test]
fn compute_age_on_birthday_is_whole_years() {
    let age = compute_age(d(1990, 6, 4), d(2024, 6, 4));
    assert_eq!((age.years, age.months, age.days), (34, 0, 0));
    assert_eq!(compute_age(d(2024, 6, 4), d(2024, 6, 4)), AgeResult::default());
}

#[test]
fn total_days_match_day_difference() {
    let today = d(2024, 2, 14);
    for birth in [d(2000, 2, 15), d(1874, 2, 14), d(2024, 1, 29), d(1999, 11, 31)] {
        let age = compute_age(birth, today);
        let expected = (today.as_naive() - birth.as_naive()).num_days();
        assert_eq!(age.total_days, expected);
        assert_eq!(age.total_hours, expected * 24);
        assert_eq!(age.total_minutes, expected * 24 * 60);
    }
}

#[test]
fn compute_age_at_counts_time_of_day_in_totals() {
    let now = NaiveDate::from_ymd_opt(2024, 3, 14)
        .unwrap()
        .and_hms_opt(13, 30, 59)
        .unwrap();
    let age = compute_age_at(d(2024, 2, 13), now);
    assert_eq!((age.years, age.months, age.days), (0, 0, 1));
    assert_eq!(age.total_days, 1);
    assert_eq!(age.total_hours, 37);
    assert_eq!(age.total_minutes, 37 * 60 + 30);
}

#[test]
fn age_display_and_thousands() {
    let age = compute_age(d(2023, 1, 13), d(2024, 2, 14));
    assert_eq!(age.to_string(), "1 year, 1 month, 1 day");
    assert_eq!(format_thousands(0), "0");
    assert_eq!(format_thousands(999), "999");
    assert_eq!(format_thousands(1000), "1,000");
    assert_eq!(format_thousands(1234567), "1,234,567");
    assert_eq!(format_thousands(-45000), "-45,000");
}
