use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};

/// A calendar month, the unit the expense list pages through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first_day: NaiveDate,
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("invalid year-month \"{0}\", expected YYYY-MM")]
pub struct ParseYearMonthError(String);

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Moves by whole calendar months; negative values go back in time.
    pub fn add_months(self, months: i32) -> Self {
        let delta = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            self.first_day.checked_add_months(delta)
        } else {
            self.first_day.checked_sub_months(delta)
        };
        Self {
            first_day: shifted.unwrap_or(self.first_day),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Long label such as "November 2025".
    pub fn label(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = ParseYearMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseYearMonthError(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(err)?;
        let year = year.parse().map_err(|_| err())?;
        let month = month.parse().map_err(|_| err())?;
        Self::new(year, month).ok_or_else(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn navigation_moves_exactly_one_month() {
        assert_eq!(ym(2025, 11).add_months(1), ym(2025, 12));
        assert_eq!(ym(2025, 11).add_months(-1), ym(2025, 10));
    }

    #[test]
    fn navigation_wraps_years() {
        assert_eq!(ym(2025, 12).add_months(1), ym(2026, 1));
        assert_eq!(ym(2025, 1).add_months(-1), ym(2024, 12));
        assert_eq!(ym(2025, 3).add_months(-15), ym(2023, 12));
    }

    #[test]
    fn from_date_snaps_to_first_of_month() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let month = YearMonth::from_date(date);

        assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert!(month.contains(date));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
    }

    #[test]
    fn formats_query_value_and_label() {
        assert_eq!(ym(2025, 3).to_string(), "2025-03");
        assert_eq!(ym(2025, 11).label(), "November 2025");
    }

    #[test]
    fn parses_query_value() {
        assert_eq!("2025-03".parse::<YearMonth>(), Ok(ym(2025, 3)));
        assert!("2025-13".parse::<YearMonth>().is_err());
        assert!("march".parse::<YearMonth>().is_err());
    }
}
