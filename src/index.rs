//! Locating daily index files and filing documents in the EDGAR archives.
//!
//! EDGAR publishes one *daily index* per business day under
//! `.../edgar/daily-index/<YEAR>/QTR<1-4>/company.<YYYYMMDD>.idx`. Each row of that index
//! names a filing by its archive-relative path (`edgar/data/<cik>/<accession>.txt`), which is
//! joined back onto the archives root to download the document itself.

use chrono::{Datelike, NaiveDate};

/// Fiscal quarter (Q1-Q4).
///
/// EDGAR index directories are grouped by quarter (e.g., `QTR1` .. `QTR4`).
///
/// Each quarter maps to specific months:
/// - Q1: January through March
/// - Q2: April through June
/// - Q3: July through September
/// - Q4: October through December
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quarter {
    Q1 = 1,
    Q2 = 2,
    Q3 = 3,
    Q4 = 4,
}

impl Quarter {
    /// Returns the quarter `date` falls in.
    pub fn of(date: NaiveDate) -> Self {
        match date.month0() / 3 {
            0 => Quarter::Q1,
            1 => Quarter::Q2,
            2 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    /// Converts the quarter to its integer representation (1-4).
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }
}

/// Builds the URL of the company-sorted daily index for `date`.
///
/// # Example
/// ```rust
/// use chrono::NaiveDate;
/// use insiderkit::index::index_url;
///
/// let date = NaiveDate::from_ymd_opt(2023, 8, 15).unwrap();
/// assert_eq!(
///     index_url("https://www.sec.gov/Archives", date),
///     "https://www.sec.gov/Archives/edgar/daily-index/2023/QTR3/company.20230815.idx"
/// );
/// ```
pub fn index_url(archives_url: &str, date: NaiveDate) -> String {
    format!(
        "{}/edgar/daily-index/{}/QTR{}/company.{}.idx",
        archives_url.trim_end_matches('/'),
        date.year(),
        Quarter::of(date).as_i32(),
        date.format("%Y%m%d")
    )
}

/// Joins an index row's `file_name` onto the archives root.
pub fn filing_url(archives_url: &str, file_name: &str) -> String {
    format!(
        "{}/{}",
        archives_url.trim_end_matches('/'),
        file_name.trim_start_matches('/')
    )
}
