//! Minimal calendar date with an approximate 365/30 day count
//!
//! Fields are never validated and arithmetic never normalises: month 13 or
//! day 31 in a 30-day month pass through untouched.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::BondError;

/// A (year, month, day) triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Date {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

impl Date {
    pub const fn new(year: i32, month: i32, day: i32) -> Self {
        Self { year, month, day }
    }

    /// Approximate signed day count `self - other`, using a 365-day year and 30-day month
    pub fn days_diff(&self, other: &Date) -> i32 {
        (self.year - other.year) * 365 + (self.month - other.month) * 30 + (self.day - other.day)
    }

    /// Same month and day, `years` later
    pub fn add_years(&self, years: i32) -> Self {
        Self::new(self.year + years, self.month, self.day)
    }

    /// Payment date of the `period`-th coupon when paying `frequency` times a year.
    ///
    /// Year advances by `period / frequency`; month is
    /// `(month + (period % frequency) * 12 / frequency) % 12 + 1`; day is kept.
    pub fn advance_coupon(&self, period: i32, frequency: i32) -> Self {
        let year = self.year + period / frequency;
        let month = (self.month + (period % frequency) * 12 / frequency) % 12 + 1;
        Self::new(year, month, self.day)
    }

    /// Convert to a real calendar date, `None` when the fields are out of range
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        let month = u32::try_from(self.month).ok()?;
        let day = u32::try_from(self.day).ok()?;
        NaiveDate::from_ymd_opt(self.year, month, day)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month() as i32, date.day() as i32)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for Date {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() != 3 {
            return Err(BondError::InvalidDate(s.to_string()));
        }

        let parse = |p: &str| p.parse::<i32>().map_err(|_| BondError::InvalidDate(s.to_string()));
        Ok(Self::new(parse(parts[0])?, parse(parts[1])?, parse(parts[2])?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_diff_uses_fixed_year_and_month() {
        let a = Date::new(2025, 3, 15);
        let b = Date::new(2024, 1, 1);
        assert_eq!(a.days_diff(&b), 365 + 2 * 30 + 14);
        assert_eq!(b.days_diff(&a), -(365 + 2 * 30 + 14));
        assert_eq!(a.days_diff(&a), 0);
    }

    #[test]
    fn test_out_of_range_fields_accepted() {
        let odd = Date::new(2024, 13, 32);
        let base = Date::new(2024, 12, 31);
        assert_eq!(odd.days_diff(&base), 31);
        assert!(odd.to_naive_date().is_none());
    }

    #[test]
    fn test_advance_coupon_semiannual() {
        let settle = Date::new(2024, 1, 1);
        assert_eq!(settle.advance_coupon(1, 2), Date::new(2024, 8, 1));
        assert_eq!(settle.advance_coupon(2, 2), Date::new(2025, 2, 1));
        assert_eq!(settle.advance_coupon(3, 2), Date::new(2025, 8, 1));
    }

    #[test]
    fn test_advance_coupon_keeps_day() {
        // No day-overflow carry
        let settle = Date::new(2024, 1, 31);
        assert_eq!(settle.advance_coupon(1, 12), Date::new(2024, 3, 31));
    }

    #[test]
    fn test_parse_and_display() {
        let date: Date = "2024-07-05".parse().unwrap();
        assert_eq!(date, Date::new(2024, 7, 5));
        assert_eq!(date.to_string(), "2024-07-05");
        assert!("2024/07/05".parse::<Date>().is_err());
        assert!("2024-xx-05".parse::<Date>().is_err());
    }

    #[test]
    fn test_naive_date_round_trip() {
        let naive = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let date = Date::from(naive);
        assert_eq!(date, Date::new(2024, 2, 29));
        assert_eq!(date.to_naive_date(), Some(naive));
    }
}
