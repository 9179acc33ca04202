//! Budget period representation
//!
//! A budget period is a fixed monthly window running from the 26th of the
//! previous month through the 25th of the labeled month, so salary paid late
//! in the month counts toward the month it funds. Period "2025-01" spans
//! 2024-12-26 through 2025-01-25.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The day of month on which a new budget period begins
const PERIOD_START_DAY: u32 = 26;

/// A monthly budget period, labeled by the month containing its end date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BudgetPeriod {
    pub year: i32,
    pub month: u32,
}

impl BudgetPeriod {
    /// Create a period for the given label year/month
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self { year, month }
    }

    /// Get the period containing a specific date
    pub fn containing(date: NaiveDate) -> Self {
        if date.day() >= PERIOD_START_DAY {
            Self::new(date.year(), date.month()).next()
        } else {
            Self::new(date.year(), date.month())
        }
    }

    /// Get the period containing today
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    /// Get the start date of this period (26th of the previous month)
    pub fn start_date(&self) -> NaiveDate {
        let (year, month) = if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        };
        // The 26th exists in every month
        NaiveDate::from_ymd_opt(year, month, PERIOD_START_DAY).unwrap()
    }

    /// Get the end date of this period, inclusive (25th of the labeled month)
    pub fn end_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, PERIOD_START_DAY - 1).unwrap()
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Get the next period
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// Get the previous period
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    /// Get the period `n` steps before this one
    pub fn back(&self, n: u32) -> Self {
        let mut period = *self;
        for _ in 0..n {
            period = period.prev();
        }
        period
    }

    /// Parse a period label of the form "YYYY-MM"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 2 {
            return Err(PeriodParseError::InvalidFormat(s.to_string()));
        }

        let year: i32 = parts[0]
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = parts[1]
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        if !(1..=9999).contains(&year) {
            return Err(PeriodParseError::InvalidYear(year));
        }
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }

        Ok(Self::new(year, month))
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Ord for BudgetPeriod {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start_date().cmp(&other.start_date())
    }
}

impl PartialOrd for BudgetPeriod {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidYear(i32),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidYear(y) => write!(f, "Invalid year: {}", y),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_window() {
        let jan = BudgetPeriod::new(2025, 1);
        assert_eq!(jan.start_date(), date(2024, 12, 26));
        assert_eq!(jan.end_date(), date(2025, 1, 25));
    }

    #[test]
    fn test_containing_before_cutoff() {
        assert_eq!(
            BudgetPeriod::containing(date(2025, 1, 15)),
            BudgetPeriod::new(2025, 1)
        );
        assert_eq!(
            BudgetPeriod::containing(date(2025, 1, 25)),
            BudgetPeriod::new(2025, 1)
        );
    }

    #[test]
    fn test_containing_after_cutoff() {
        // Day 26 and later belongs to the next labeled period
        assert_eq!(
            BudgetPeriod::containing(date(2025, 1, 26)),
            BudgetPeriod::new(2025, 2)
        );
        assert_eq!(
            BudgetPeriod::containing(date(2024, 12, 30)),
            BudgetPeriod::new(2025, 1)
        );
    }

    #[test]
    fn test_contains_matches_containing() {
        let d = date(2025, 3, 26);
        let period = BudgetPeriod::containing(d);
        assert!(period.contains(d));
        assert!(!period.prev().contains(d));
    }

    #[test]
    fn test_navigation() {
        let jan = BudgetPeriod::new(2025, 1);
        assert_eq!(jan.next(), BudgetPeriod::new(2025, 2));
        assert_eq!(jan.prev(), BudgetPeriod::new(2024, 12));

        let dec = BudgetPeriod::new(2024, 12);
        assert_eq!(dec.next(), BudgetPeriod::new(2025, 1));
    }

    #[test]
    fn test_back() {
        let mar = BudgetPeriod::new(2025, 3);
        assert_eq!(mar.back(0), mar);
        assert_eq!(mar.back(3), BudgetPeriod::new(2024, 12));
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            BudgetPeriod::parse("2025-01").unwrap(),
            BudgetPeriod::new(2025, 1)
        );
        assert!(matches!(
            BudgetPeriod::parse("2025-13"),
            Err(PeriodParseError::InvalidMonth(13))
        ));
        assert!(BudgetPeriod::parse("January").is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range_year() {
        // Years outside the four-digit label shape are rejected at parse
        // time, so start_date/end_date never see a date chrono can't build
        assert!(matches!(
            BudgetPeriod::parse("999999-01"),
            Err(PeriodParseError::InvalidYear(999999))
        ));
        assert!(matches!(
            BudgetPeriod::parse("0-01"),
            Err(PeriodParseError::InvalidYear(0))
        ));
        assert!(matches!(
            BudgetPeriod::parse("-5-01"),
            Err(PeriodParseError::InvalidFormat(_))
        ));

        let period = BudgetPeriod::parse("9999-12").unwrap();
        assert_eq!(period.end_date(), date(9999, 12, 25));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", BudgetPeriod::new(2025, 1)), "2025-01");
    }

    #[test]
    fn test_ordering() {
        assert!(BudgetPeriod::new(2024, 12) < BudgetPeriod::new(2025, 1));
    }

    #[test]
    fn test_serialization() {
        let period = BudgetPeriod::new(2025, 1);
        let json = serde_json::to_string(&period).unwrap();
        let deserialized: BudgetPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(period, deserialized);
    }
}
