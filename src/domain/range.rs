//! History range selection: how far back to fetch and at what sampling.

use chrono::{Duration, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Daily,
    Weekly,
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::Daily => f.write_str("1d"),
            Interval::Weekly => f.write_str("1wk"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryRange {
    Week,
    #[default]
    Month,
    ThreeMonths,
    SixMonths,
    Year,
    Max,
}

impl HistoryRange {
    pub const ALL: [HistoryRange; 6] = [
        HistoryRange::Week,
        HistoryRange::Month,
        HistoryRange::ThreeMonths,
        HistoryRange::SixMonths,
        HistoryRange::Year,
        HistoryRange::Max,
    ];

    /// Parse a range code, falling back to one month for anything unknown.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// First date to fetch for a range ending on `as_of`.
    pub fn start_date(&self, as_of: NaiveDate) -> NaiveDate {
        let months_back = |n: u32| as_of.checked_sub_months(Months::new(n)).unwrap_or(NaiveDate::MIN);
        match self {
            HistoryRange::Week => as_of - Duration::days(7),
            HistoryRange::Month => months_back(1),
            HistoryRange::ThreeMonths => months_back(3),
            HistoryRange::SixMonths => months_back(6),
            HistoryRange::Year => months_back(12),
            HistoryRange::Max => NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN),
        }
    }

    /// Sampling interval; only the full history is sampled weekly.
    pub fn interval(&self) -> Interval {
        match self {
            HistoryRange::Max => Interval::Weekly,
            _ => Interval::Daily,
        }
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HistoryRange::Week => "1w",
            HistoryRange::Month => "1m",
            HistoryRange::ThreeMonths => "3m",
            HistoryRange::SixMonths => "6m",
            HistoryRange::Year => "1y",
            HistoryRange::Max => "max",
        };
        f.write_str(s)
    }
}

impl FromStr for HistoryRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1w" => Ok(HistoryRange::Week),
            "1m" => Ok(HistoryRange::Month),
            "3m" => Ok(HistoryRange::ThreeMonths),
            "6m" => Ok(HistoryRange::SixMonths),
            "1y" => Ok(HistoryRange::Year),
            "max" => Ok(HistoryRange::Max),
            other => Err(format!(
                "unknown range '{other}' (expected 1w, 1m, 3m, 6m, 1y or max)"
            )),
        }
    }
}
