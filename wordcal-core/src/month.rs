//! Resolves a `YYYY-MM` month into its length and starting weekday.
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, Weekday};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MonthError {
    #[error("month '{0}' is not in YYYY-MM format")]
    Format(String),
    #[error("month {0} out of range [1, 12]")]
    OutOfRange(u32),
    #[error("month '{0}' is outside the supported calendar")]
    Unrepresentable(String),
}

/// A calendar month such as `2024-02`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSpec {
    first_day: NaiveDate,
}

impl MonthSpec {
    /// # Errors
    ///
    /// Returns an error if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self, MonthError> {
        if !(1..=12).contains(&month) {
            return Err(MonthError::OutOfRange(month));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or_else(|| MonthError::Unrepresentable(format!("{year:04}-{month:02}")))
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    #[must_use]
    pub fn first_weekday(&self) -> Weekday {
        self.first_day.weekday()
    }

    #[must_use]
    pub fn day_count(&self) -> u32 {
        self.first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map_or(31, |last| last.day())
    }
}

impl FromStr for MonthSpec {
    type Err = MonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || MonthError::Format(s.to_string());
        if s.len() != 7 || s.as_bytes()[4] != b'-' {
            return Err(format_err());
        }
        let (year, month) = s.split_at(4);
        let year: i32 = year.parse().map_err(|_| format_err())?;
        let month: u32 = month[1..].parse().map_err(|_| format_err())?;
        Self::new(year, month)
    }
}

impl fmt::Display for MonthSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
