//! Calendar helpers for purchase and expiry dates.
//!
//! All dates are naive local dates. A date compared against a point in time
//! stands for its local midnight.

use crate::consts::{DATE_SEGMENT_LEN, MIN_FOUR_DIGIT_YEAR, MILLIS_PER_DAY, MONTHS_PER_YEAR};
use crate::types::WarrantyMonths;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Builds a date from a zero-based month index and a day number, letting
/// both overflow into the neighbouring months and years.
///
/// Month index 12 of 2023 is January 2024; day 31 of February is 2 or 3
/// March; day 0 is the last day of the previous month.
/// Returns `None` only when the result leaves chrono's representable range.
pub fn rolling_date(year: i32, month_index: i64, day: i64) -> Option<NaiveDate> {
    let months_per_year = i64::from(MONTHS_PER_YEAR);
    let total = i64::from(year).checked_mul(months_per_year)?.checked_add(month_index)?;
    let year = i32::try_from(total.div_euclid(months_per_year)).ok()?;
    let month = u32::try_from(total.rem_euclid(months_per_year)).ok()? + 1;

    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_signed(TimeDelta::try_days(day.checked_sub(1)?)?)
}

/// Parses an `MMDDYYYY` segment into a purchase date.
///
/// The components are rolled into a date and kept only if the result reads
/// back as the same year, month and day, so month 13, day 0 or 31 April all
/// fail. Years below `MIN_FOUR_DIGIT_YEAR` fail too.
pub fn parse_purchase_date(segment: &str) -> Option<NaiveDate> {
    if segment.len() != DATE_SEGMENT_LEN || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let month: u32 = segment.get(0..2)?.parse().ok()?;
    let day: u32 = segment.get(2..4)?.parse().ok()?;
    let year: i32 = segment.get(4..8)?.parse().ok()?;

    if year < MIN_FOUR_DIGIT_YEAR {
        return None;
    }

    let date = rolling_date(year, i64::from(month) - 1, i64::from(day))?;
    let round_trips = date.year() == year && date.month() == month && date.day() == day;
    round_trips.then_some(date)
}

/// Adds whole calendar months, rolling day-of-month overflow forward
/// instead of clamping to the month's end.
pub fn add_months(date: NaiveDate, months: WarrantyMonths) -> Option<NaiveDate> {
    let month_index = i64::from(date.month0()) + i64::from(months.get());
    rolling_date(date.year(), month_index, i64::from(date.day()))
}

/// Local midnight at the start of `date`
#[inline]
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Whole days from `now` until the start of `end`, rounded up.
/// Zero once `now` has reached `end`.
pub fn days_until(end: NaiveDate, now: NaiveDateTime) -> u32 {
    let millis = (midnight(end) - now).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    let days = millis.div_euclid(MILLIS_PER_DAY) + i64::from(millis.rem_euclid(MILLIS_PER_DAY) != 0);
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Formats as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{at, date, months};

    #[test]
    fn test_parse_purchase_date_cases() {
        struct TestCase {
            segment:     &'static str,
            expected:    Option<(i32, u32, u32)>,
            description: &'static str,
        }

        let cases = [
            TestCase {
                segment:     "01152023",
                expected:    Some((2023, 1, 15)),
                description: "ordinary date",
            },
            TestCase {
                segment:     "02292024",
                expected:    Some((2024, 2, 29)),
                description: "leap day in leap year",
            },
            TestCase {
                segment:     "02292023",
                expected:    None,
                description: "leap day in common year",
            },
            TestCase {
                segment:     "02292000",
                expected:    Some((2000, 2, 29)),
                description: "century divisible by 400",
            },
            TestCase {
                segment:     "02291900",
                expected:    None,
                description: "century not divisible by 400",
            },
            TestCase {
                segment:     "13311999",
                expected:    None,
                description: "month 13",
            },
            TestCase {
                segment:     "00152023",
                expected:    None,
                description: "month 0",
            },
            TestCase {
                segment:     "04312023",
                expected:    None,
                description: "31 April",
            },
            TestCase {
                segment:     "01002023",
                expected:    None,
                description: "day 0",
            },
            TestCase {
                segment:     "01150050",
                expected:    None,
                description: "two-digit year",
            },
            TestCase {
                segment:     "01150000",
                expected:    None,
                description: "year zero",
            },
            TestCase {
                segment:     "12310100",
                expected:    Some((100, 12, 31)),
                description: "smallest four-digit year",
            },
            TestCase {
                segment:     "0115202A",
                expected:    None,
                description: "non-digit",
            },
            TestCase {
                segment:     "0115202",
                expected:    None,
                description: "too short",
            },
        ];

        for case in &cases {
            let expected = case.expected.map(|(y, m, d)| date(y, m, d));
            assert_eq!(
                parse_purchase_date(case.segment),
                expected,
                "segment {:?} ({})",
                case.segment,
                case.description
            );
        }
    }

    #[test]
    fn test_add_months_plain() {
        assert_eq!(add_months(date(2023, 1, 15), months(12)), Some(date(2024, 1, 15)));
        assert_eq!(add_months(date(2023, 11, 30), months(2)), Some(date(2024, 1, 30)));
        assert_eq!(add_months(date(2022, 6, 1), months(24)), Some(date(2024, 6, 1)));
    }

    #[test]
    fn test_add_months_rolls_overflow_forward() {
        // 31 Jan + 1 month is "31 Feb", which rolls into March
        assert_eq!(add_months(date(2023, 1, 31), months(1)), Some(date(2023, 3, 3)));
        assert_eq!(add_months(date(2024, 1, 31), months(1)), Some(date(2024, 3, 2)));
        // 29 Feb + 12 months lands in a common year
        assert_eq!(add_months(date(2024, 2, 29), months(12)), Some(date(2025, 3, 1)));
        assert_eq!(add_months(date(2023, 3, 31), months(1)), Some(date(2023, 5, 1)));
    }

    #[test]
    fn test_rolling_date_underflow() {
        assert_eq!(rolling_date(2024, 0, 0), Some(date(2023, 12, 31)));
        assert_eq!(rolling_date(2024, -1, 1), Some(date(2023, 12, 1)));
        assert_eq!(rolling_date(2024, 12, 1), Some(date(2025, 1, 1)));
    }

    #[test]
    fn test_days_until() {
        let end = date(2024, 1, 15);
        assert_eq!(days_until(end, at(2023, 6, 1, 0, 0)), 228);
        // a partial day counts as a whole one
        assert_eq!(days_until(end, at(2024, 1, 14, 23, 59)), 1);
        assert_eq!(days_until(end, at(2024, 1, 14, 0, 0)), 1);
        assert_eq!(days_until(end, at(2024, 1, 13, 12, 0)), 2);
        assert_eq!(days_until(end, at(2024, 1, 15, 0, 0)), 0);
        assert_eq!(days_until(end, at(2024, 2, 1, 0, 0)), 0);
    }

    #[test]
    fn test_format_date_pads() {
        assert_eq!(format_date(date(2024, 1, 5)), "2024-01-05");
        assert_eq!(format_date(date(999, 12, 31)), "0999-12-31");
    }
}
