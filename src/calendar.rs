//! Gregorian calendar helpers.
//!
//! Everything here is a pure function of its arguments. Arithmetic on
//! [`IsoDate`](crate::IsoDate) goes through a linear day number (days since
//! 1970-01-01) so that stepping across month and year boundaries needs no
//! special casing.

use crate::consts::{
    CENTURY_CYCLE, DATE_SEPARATOR, DECEMBER, DAYS_PER_WEEK, FEBRUARY_DAYS, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, JANUARY, LEAP_YEAR_CYCLE, MAX_YEAR, MIN_DAY, MIN_YEAR, MONTHS_PER_YEAR,
};
use chrono::Weekday;

/// Days from 0000-03-01 to 1970-01-01 in the proleptic Gregorian calendar.
const UNIX_EPOCH_OFFSET: i64 = 719_468;
const DAYS_PER_ERA: i64 = 146_097;
const YEARS_PER_ERA: i64 = 400;
/// 1970-01-01 was a Thursday.
const EPOCH_DAYS_FROM_SUNDAY: i64 = 4;

/// Gregorian leap year rule, checked in order: 400, then 100, then 4.
pub const fn is_leap_year(year: i32) -> bool {
    if year % GREGORIAN_CYCLE == 0 {
        return true;
    }
    if year % CENTURY_CYCLE == 0 {
        return false;
    }
    year % LEAP_YEAR_CYCLE == 0
}

/// Number of days in `month` of `year`.
///
/// Any month number outside the 31- and 30-day sets is treated as February.
pub const fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(year) => FEBRUARY_DAYS_LEAP,
        _ => FEBRUARY_DAYS,
    }
}

/// Returns true if the components name a real day with a four-digit year.
pub fn is_valid_date(year: i32, month: u32, day: u32) -> bool {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return false;
    }
    if !(JANUARY..=DECEMBER).contains(&month) {
        return false;
    }
    (MIN_DAY..=days_in_month(month, year)).contains(&day)
}

/// Returns true if `s` is exactly `DDDD-DD-DD` (ASCII digits) and names a
/// valid date.
pub fn is_valid_date_string(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 10 {
        return false;
    }
    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == DATE_SEPARATOR as u8,
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return false;
    }

    let year = s[0..4].parse::<i32>();
    let month = s[5..7].parse::<u32>();
    let day = s[8..10].parse::<u32>();
    match (year, month, day) {
        (Ok(y), Ok(m), Ok(d)) => is_valid_date(y, m, d),
        _ => false,
    }
}

/// Folds a possibly out-of-range month into `(year, 1..=12)`.
/// Month 0 is December of the previous year, month 13 is January of the next.
pub(crate) const fn normalize_month(year: i64, month: i64) -> (i64, i64) {
    let zero_based = month - 1;
    (
        year + zero_based.div_euclid(MONTHS_PER_YEAR),
        zero_based.rem_euclid(MONTHS_PER_YEAR) + 1,
    )
}

/// Day number for a civil date whose month is already within 1..=12.
const fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(YEARS_PER_ERA);
    let year_of_era = y - era * YEARS_PER_ERA;
    let shifted_month = (month + 9) % 12; // March = 0
    let day_of_year = (153 * shifted_month + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_PER_ERA + day_of_era - UNIX_EPOCH_OFFSET
}

/// Day number for arbitrary components, rolling month and day overflow
/// forward or backward the way a local-time moment does.
pub(crate) const fn day_number(year: i64, month: i64, day: i64) -> i64 {
    let (year, month) = normalize_month(year, month);
    days_from_civil(year, month, 1) + day - 1
}

/// Day number of `i32::MIN`-01-01, the earliest day an `IsoDate` can step to.
pub(crate) const MIN_DAY_NUMBER: i64 = day_number(i32::MIN as i64, 1, 1);
/// Day number of `i32::MAX`-12-31, the latest day an `IsoDate` can step to.
pub(crate) const MAX_DAY_NUMBER: i64 = day_number(i32::MAX as i64, 12, 31);

/// Inverse of [`day_number`]. Always yields a real `(year, month, day)`.
///
/// Input is clamped to `MIN_DAY_NUMBER..=MAX_DAY_NUMBER`.
pub(crate) const fn civil_from_day_number(days: i64) -> (i64, u32, u32) {
    let days = if days < MIN_DAY_NUMBER {
        MIN_DAY_NUMBER
    } else if days > MAX_DAY_NUMBER {
        MAX_DAY_NUMBER
    } else {
        days
    };
    let z = days + UNIX_EPOCH_OFFSET;
    let era = z.div_euclid(DAYS_PER_ERA);
    let day_of_era = z - era * DAYS_PER_ERA;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * YEARS_PER_ERA + if month <= 2 { 1 } else { 0 };
    (year, month as u32, day as u32)
}

/// Days since the most recent Sunday (0 = Sunday, 6 = Saturday).
pub(crate) const fn days_from_sunday(days: i64) -> i64 {
    (days + EPOCH_DAYS_FROM_SUNDAY).rem_euclid(DAYS_PER_WEEK)
}

pub(crate) const fn weekday_from_sunday(n: i64) -> Weekday {
    match n.rem_euclid(DAYS_PER_WEEK) {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: i32,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase { year: 2024, is_leap: true, description: "divisible by 4" },
            TestCase { year: 2020, is_leap: true, description: "divisible by 4" },
            TestCase { year: 2023, is_leap: false, description: "not divisible by 4" },
            TestCase { year: 2021, is_leap: false, description: "not divisible by 4" },
            TestCase { year: 1900, is_leap: false, description: "century not divisible by 400" },
            TestCase { year: 2100, is_leap: false, description: "century not divisible by 400" },
            TestCase { year: 2000, is_leap: true, description: "divisible by 400" },
            TestCase { year: 2400, is_leap: true, description: "divisible by 400" },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_february_length_tracks_leap_years() {
        for year in [2000, 1900, 2024, 2023] {
            assert_eq!(
                days_in_month(2, year) == 29,
                is_leap_year(year),
                "February {year}"
            );
        }
    }

    #[test]
    fn test_days_in_month_31_day_months() {
        for month in [1, 3, 5, 7, 8, 10, 12] {
            assert_eq!(days_in_month(month, 2023), 31, "Month {month} should have 31 days");
        }
    }

    #[test]
    fn test_days_in_month_30_day_months() {
        for month in [4, 6, 9, 11] {
            assert_eq!(days_in_month(month, 2023), 30, "Month {month} should have 30 days");
        }
    }

    #[test]
    fn test_days_in_month_unknown_month_falls_back_to_february() {
        assert_eq!(days_in_month(13, 2024), 29);
        assert_eq!(days_in_month(0, 2023), 28);
    }

    #[test]
    fn test_days_in_month_takes_month_first() {
        assert_eq!(days_in_month(2, 2024), 29);
        assert_eq!(days_in_month(2, 2023), 28);
        assert_eq!(days_in_month(4, 2024), 30);
    }

    #[test]
    fn test_is_valid_date_bounds() {
        assert!(is_valid_date(1000, 1, 1));
        assert!(is_valid_date(9999, 12, 31));
        assert!(!is_valid_date(999, 12, 31));
        assert!(!is_valid_date(10000, 1, 1));
        assert!(!is_valid_date(2024, 0, 1));
        assert!(!is_valid_date(2024, 13, 1));
        assert!(!is_valid_date(2024, 1, 0));
        assert!(!is_valid_date(2024, 1, 32));
        assert!(!is_valid_date(2024, 4, 31));
        assert!(is_valid_date(2024, 2, 29));
        assert!(!is_valid_date(2023, 2, 29));
    }

    #[test]
    fn test_is_valid_date_string() {
        assert!(is_valid_date_string("2024-02-29"));
        assert!(is_valid_date_string("1000-01-01"));
        assert!(!is_valid_date_string("2023-02-29"), "not a leap year");
        assert!(!is_valid_date_string("2024-2-29"), "month must be two digits");
        assert!(!is_valid_date_string("24-02-29"), "year must be four digits");
        assert!(!is_valid_date_string("02024-02-29"));
        assert!(!is_valid_date_string("2024/02/29"));
        assert!(!is_valid_date_string("2024-02-29 "));
        assert!(!is_valid_date_string("0999-12-31"));
        assert!(!is_valid_date_string("2024-1a-01"));
        assert!(!is_valid_date_string("２０２４-01-01"));
        assert!(!is_valid_date_string(""));
    }

    #[test]
    fn test_normalize_month() {
        assert_eq!(normalize_month(2024, 1), (2024, 1));
        assert_eq!(normalize_month(2024, 13), (2025, 1));
        assert_eq!(normalize_month(2024, 0), (2023, 12));
        assert_eq!(normalize_month(2024, -11), (2022, 1));
        assert_eq!(normalize_month(2024, 25), (2026, 1));
    }

    #[test]
    fn test_day_number_epoch() {
        assert_eq!(day_number(1970, 1, 1), 0);
        assert_eq!(day_number(1969, 12, 31), -1);
        assert_eq!(day_number(2000, 3, 1), 11_017);
    }

    #[test]
    fn test_day_number_rolls_overflowing_days() {
        assert_eq!(day_number(2024, 4, 31), day_number(2024, 5, 1));
        assert_eq!(day_number(2024, 3, 0), day_number(2024, 2, 29));
        assert_eq!(day_number(2024, 13, 1), day_number(2025, 1, 1));
    }

    #[test]
    fn test_civil_round_trip_over_four_centuries() {
        let start = day_number(1800, 1, 1);
        let end = day_number(2200, 12, 31);
        for n in start..=end {
            let (y, m, d) = civil_from_day_number(n);
            assert!((1..=12).contains(&m));
            assert!((1..=days_in_month(m, y as i32)).contains(&d));
            assert_eq!(day_number(y, i64::from(m), i64::from(d)), n);
        }
    }

    #[test]
    fn test_civil_from_day_number_clamps_extremes() {
        assert_eq!(civil_from_day_number(i64::MAX), (i64::from(i32::MAX), 12, 31));
        assert_eq!(civil_from_day_number(i64::MIN), (i64::from(i32::MIN), 1, 1));
        assert_eq!(civil_from_day_number(MAX_DAY_NUMBER), (i64::from(i32::MAX), 12, 31));
    }

    #[test]
    fn test_weekday_of_known_dates() {
        assert_eq!(weekday_from_sunday(days_from_sunday(0)), Weekday::Thu);
        assert_eq!(weekday_from_sunday(days_from_sunday(day_number(2024, 1, 1))), Weekday::Mon);
        assert_eq!(weekday_from_sunday(days_from_sunday(day_number(2024, 1, 6))), Weekday::Sat);
        assert_eq!(weekday_from_sunday(days_from_sunday(day_number(2024, 1, 7))), Weekday::Sun);
        assert_eq!(weekday_from_sunday(days_from_sunday(day_number(1900, 1, 1))), Weekday::Mon);
    }
}
