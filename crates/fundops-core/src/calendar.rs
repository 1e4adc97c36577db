//! Date-only calendar arithmetic for recurrence calculation.
//!
//! Everything here operates on local calendar dates (`NaiveDate`); there is
//! no time-of-day or timezone semantics anywhere in the engine. The one rule
//! applied throughout is month-end clamping: "day N in month M" always means
//! `min(N, lastDayOf(M))`, which is what makes day-31 anchors and the
//! Jun 30 / Sep 30 quarter ends come out right.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::CoreError;

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Dates beyond chrono's representable range saturate at `NaiveDate::MAX`
/// (or `MIN`); enumeration loops stop advancing there.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(if year > 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Day N in the given month, clamped to the month's actual last day.
pub fn resolve_month_day(year: i32, month: u32, day: u32) -> NaiveDate {
    ymd(year, month, day.max(1).min(last_day_of_month(year, month)))
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    resolve_month_day(date.year(), date.month(), 31)
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days))
        .unwrap_or(if days > 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// Calendar month stepping with month-end clamping: Jan 31 + 1 month is
/// Feb 28 (or 29). Negative `months` steps backward.
pub fn add_months(date: NaiveDate, months: i64) -> NaiveDate {
    let total = date.year() as i64 * 12 + date.month() as i64 - 1 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    if year > i32::MAX as i64 {
        return NaiveDate::MAX;
    }
    if year < i32::MIN as i64 {
        return NaiveDate::MIN;
    }
    resolve_month_day(year as i32, month, date.day())
}

/// Year stepping with leap-day clamping: Feb 29 lands on Feb 28 in common
/// years.
pub fn add_years(date: NaiveDate, years: i64) -> NaiveDate {
    let year = date.year() as i64 + years;
    if year > i32::MAX as i64 {
        return NaiveDate::MAX;
    }
    if year < i32::MIN as i64 {
        return NaiveDate::MIN;
    }
    resolve_month_day(year as i32, date.month(), date.day())
}

/// 1-based quarter of the date's month.
pub fn quarter_of(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}

pub fn start_of_quarter(date: NaiveDate) -> NaiveDate {
    ymd(date.year(), (quarter_of(date) - 1) * 3 + 1, 1)
}

/// Quarter-end reporting dates: Mar 31, Jun 30, Sep 30, Dec 31.
pub fn quarter_end(year: i32, quarter: u32) -> NaiveDate {
    match quarter {
        1 => ymd(year, 3, 31),
        2 => ymd(year, 6, 30),
        3 => ymd(year, 9, 30),
        _ => ymd(year, 12, 31),
    }
}

pub fn current_quarter_end(date: NaiveDate) -> NaiveDate {
    quarter_end(date.year(), quarter_of(date))
}

/// First quarter end strictly after the reference date, wrapping to Q1 of
/// the next year. Returns the date and the quarter number.
pub fn next_quarter_end(reference: NaiveDate) -> (NaiveDate, u32) {
    for quarter in 1..=4 {
        let end = quarter_end(reference.year(), quarter);
        if end > reference {
            return (end, quarter);
        }
    }
    (quarter_end(reference.year() + 1, 1), 1)
}

/// All four quarter ends of a year, as (quarter, date) pairs.
pub fn quarter_ends_for_year(year: i32) -> [(u32, NaiveDate); 4] {
    [
        (1, quarter_end(year, 1)),
        (2, quarter_end(year, 2)),
        (3, quarter_end(year, 3)),
        (4, quarter_end(year, 4)),
    ]
}

/// Strict ISO `YYYY-MM-DD` parsing. Malformed input is an error, never a
/// guessed default: a wrong anchor corrupts every future occurrence.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| CoreError::InvalidDate(format!("Failed to parse date '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[rstest]
    #[case(2026, 2, 28)]
    #[case(2028, 2, 29)]
    #[case(2000, 2, 29)]
    #[case(1900, 2, 28)]
    #[case(2026, 4, 30)]
    #[case(2026, 12, 31)]
    fn test_last_day_of_month(#[case] year: i32, #[case] month: u32, #[case] expected: u32) {
        assert_eq!(last_day_of_month(year, month), expected);
    }

    #[test]
    fn test_resolve_month_day_clamps() {
        assert_eq!(resolve_month_day(2026, 2, 31), d(2026, 2, 28));
        assert_eq!(resolve_month_day(2028, 2, 31), d(2028, 2, 29));
        assert_eq!(resolve_month_day(2026, 4, 31), d(2026, 4, 30));
        assert_eq!(resolve_month_day(2026, 4, 15), d(2026, 4, 15));
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months(d(2026, 1, 31), 1), d(2026, 2, 28));
        assert_eq!(add_months(d(2026, 1, 30), 3), d(2026, 4, 30));
        assert_eq!(add_months(d(2026, 1, 15), 12), d(2027, 1, 15));
        assert_eq!(add_months(d(2026, 3, 31), -1), d(2026, 2, 28));
        assert_eq!(add_months(d(2026, 1, 15), -2), d(2025, 11, 15));
    }

    #[test]
    fn test_add_years_clamps_leap_day() {
        assert_eq!(add_years(d(2024, 2, 29), 1), d(2025, 2, 28));
        assert_eq!(add_years(d(2024, 2, 29), 4), d(2028, 2, 29));
        assert_eq!(add_years(d(2026, 7, 10), -2), d(2024, 7, 10));
    }

    #[rstest]
    #[case(d(2026, 1, 1), 1)]
    #[case(d(2026, 3, 31), 1)]
    #[case(d(2026, 4, 1), 2)]
    #[case(d(2026, 7, 10), 3)]
    #[case(d(2026, 12, 31), 4)]
    fn test_quarter_of(#[case] date: NaiveDate, #[case] expected: u32) {
        assert_eq!(quarter_of(date), expected);
    }

    #[test]
    fn test_start_of_quarter() {
        assert_eq!(start_of_quarter(d(2026, 3, 31)), d(2026, 1, 1));
        assert_eq!(start_of_quarter(d(2026, 11, 2)), d(2026, 10, 1));
    }

    #[test]
    fn test_next_quarter_end_strictly_after() {
        assert_eq!(next_quarter_end(d(2026, 1, 1)), (d(2026, 3, 31), 1));
        assert_eq!(next_quarter_end(d(2026, 3, 31)), (d(2026, 6, 30), 2));
        assert_eq!(next_quarter_end(d(2026, 12, 31)), (d(2027, 3, 31), 1));
    }

    #[test]
    fn test_quarter_ends_for_year() {
        let ends = quarter_ends_for_year(2026);
        assert_eq!(ends[0], (1, d(2026, 3, 31)));
        assert_eq!(ends[1], (2, d(2026, 6, 30)));
        assert_eq!(ends[2], (3, d(2026, 9, 30)));
        assert_eq!(ends[3], (4, d(2026, 12, 31)));
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2026-03-31").unwrap(), d(2026, 3, 31));
        assert!(parse_iso_date("2026-3-31x").is_err());
        assert!(parse_iso_date("03/31/2026").is_err());
        assert!(parse_iso_date("2026-02-30").is_err());
    }

    proptest! {
        #[test]
        fn prop_resolve_month_day_within_month(
            year in 1990i32..2100,
            month in 1u32..=12,
            day in 1u32..=31,
        ) {
            let resolved = resolve_month_day(year, month, day);
            prop_assert_eq!(resolved.year(), year);
            prop_assert_eq!(resolved.month(), month);
            prop_assert!(resolved.day() <= day);
            prop_assert_eq!(
                resolved.day(),
                day.min(last_day_of_month(year, month))
            );
        }

        #[test]
        fn prop_add_months_round_trips_on_safe_days(
            year in 1990i32..2090,
            month in 1u32..=12,
            day in 1u32..=28,
            months in -60i64..60,
        ) {
            let date = d(year, month, day);
            let shifted = add_months(date, months);
            prop_assert_eq!(add_months(shifted, -months), date);
        }

        #[test]
        fn prop_next_quarter_end_is_after_and_quarter_aligned(
            year in 1990i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
        ) {
            let date = d(year, month, day);
            let (end, quarter) = next_quarter_end(date);
            prop_assert!(end > date);
            prop_assert_eq!(quarter_of(end), quarter);
            prop_assert_eq!(end, current_quarter_end(end));
        }
    }
}
