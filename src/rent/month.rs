//! Month identifiers for the rent ledger.

use std::fmt::Display;

use time::{Date, Month};

/// An opaque month identifier, e.g. "June 2025".
///
/// Any non-empty string is a legal key. Keys created from dates use the
/// English month name followed by the year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey(String);

impl MonthKey {
    /// Create a month key from arbitrary text, trimming surrounding whitespace.
    pub fn new(key: &str) -> Self {
        Self(key.trim().to_owned())
    }

    pub fn from_parts(month: Month, year: i32) -> Self {
        Self(format!("{month} {year}"))
    }

    /// The key for the month containing `date`.
    pub fn from_date(date: Date) -> Self {
        Self::from_parts(date.month(), date.year())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The `count` months ending with the month containing `today`, oldest first.
pub fn trailing_months(today: Date, count: usize) -> Vec<MonthKey> {
    let mut month = today.month();
    let mut year = today.year();
    let mut months = Vec::with_capacity(count);

    for _ in 0..count {
        months.push(MonthKey::from_parts(month, year));

        if month == Month::January {
            year -= 1;
        }
        month = month.previous();
    }

    months.reverse();
    months
}

#[cfg(test)]
mod month_key_tests {
    use time::macros::date;

    use super::{MonthKey, trailing_months};

    #[test]
    fn key_from_date_uses_month_name_and_year() {
        assert_eq!(MonthKey::from_date(date!(2025 - 06 - 14)).as_str(), "June 2025");
    }

    #[test]
    fn key_accepts_any_text() {
        assert_eq!(MonthKey::new("  Smarch 1993 ").as_str(), "Smarch 1993");
    }

    #[test]
    fn trailing_months_end_with_current_month() {
        let months = trailing_months(date!(2025 - 06 - 14), 6);

        let want = [
            "January 2025",
            "February 2025",
            "March 2025",
            "April 2025",
            "May 2025",
            "June 2025",
        ]
        .map(MonthKey::new);
        assert_eq!(months, want);
    }

    #[test]
    fn trailing_months_cross_year_boundary() {
        let months = trailing_months(date!(2025 - 02 - 01), 3);

        let want = ["December 2024", "January 2025", "February 2025"].map(MonthKey::new);
        assert_eq!(months, want);
    }

    #[test]
    fn zero_months_is_empty() {
        assert!(trailing_months(date!(2025 - 02 - 01), 0).is_empty());
    }
}
