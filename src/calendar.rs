//! Business-day calendar.
//!
//! EDGAR only publishes daily indices for days the SEC is open, so the download
//! pipeline walks business days: weekdays that are not US federal holidays.
//!
//! The holiday rules follow the federal calendar. Fixed-date holidays that fall on a
//! weekend are observed on the nearest workday (Saturday moves to Friday, Sunday moves
//! to Monday), which can push New Year's Day into the previous year.

use super::error::{InsiderError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeSet;

/// Parses a `YYYY-MM-DD` (or compact `YYYYMMDD`) date string.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y%m%d"))
        .map_err(|_| InsiderError::InvalidDate(s.to_string()))
}

/// Returns every date in `[start, end]`, ascending, minus weekends and US federal
/// holidays unless they are explicitly included.
///
/// An inverted range (`end < start`) yields an empty list.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use insiderkit::calendar::business_dates;
///
/// let start = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2023, 7, 5).unwrap();
/// let days = business_dates(start, end, false, false);
/// // Jul 1-2 are a weekend, Jul 4 is Independence Day.
/// assert_eq!(days, vec![
///     NaiveDate::from_ymd_opt(2023, 7, 3).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 7, 5).unwrap(),
/// ]);
/// ```
pub fn business_dates(
    start: NaiveDate,
    end: NaiveDate,
    include_weekends: bool,
    include_holidays: bool,
) -> Vec<NaiveDate> {
    if end < start {
        return Vec::new();
    }

    let holidays: BTreeSet<NaiveDate> = if include_holidays {
        BTreeSet::new()
    } else {
        // Neighbouring years too: observed New Year's Day can land on Dec 31.
        (start.year() - 1..=end.year() + 1)
            .flat_map(us_federal_holidays)
            .collect()
    };

    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| include_weekends || !is_weekend(*d))
        .filter(|d| !holidays.contains(d))
        .collect()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns `true` if the SEC is closed on `date` for a federal holiday.
pub fn is_us_federal_holiday(date: NaiveDate) -> bool {
    (date.year()..=date.year() + 1)
        .flat_map(us_federal_holidays)
        .any(|h| h == date)
}

/// Observed US federal holidays for `year`, in calendar order.
pub fn us_federal_holidays(year: i32) -> Vec<NaiveDate> {
    let fixed = |month, day| NaiveDate::from_ymd_opt(year, month, day).map(nearest_workday);
    let nth = |month, weekday, n| NaiveDate::from_weekday_of_month_opt(year, month, weekday, n);

    let holidays = [
        fixed(1, 1),
        if year >= 1986 { nth(1, Weekday::Mon, 3) } else { None },
        nth(2, Weekday::Mon, 3),
        last_weekday_of_month(year, 5, Weekday::Mon),
        if year >= 2021 { fixed(6, 19) } else { None },
        fixed(7, 4),
        nth(9, Weekday::Mon, 1),
        nth(10, Weekday::Mon, 2),
        fixed(11, 11),
        nth(11, Weekday::Thu, 4),
        fixed(12, 25),
    ];

    let mut out: Vec<NaiveDate> = holidays.into_iter().flatten().collect();
    out.sort();
    out
}

fn nearest_workday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date - Duration::days(1),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, 5)
        .or_else(|| NaiveDate::from_weekday_of_month_opt(year, month, weekday, 4))
}
