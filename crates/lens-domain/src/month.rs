//! Calendar months used to key budget data.
//!
//! Months are plain `(year, month)` pairs. Dates are only materialised through
//! [`chrono::NaiveDate`], which carries no time zone, so counting weekdays can never
//! shift a day across a UTC offset.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A budget month such as `2024-12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BudgetMonth {
    year: i32,
    month: u32,
}

impl BudgetMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(MonthParseError::OutOfRange { year, month });
        }
        Ok(Self { year, month })
    }

    /// Parses `YYYY-MM-DD` (any valid day, normalised to its month) or `YYYY-MM`.
    pub fn parse_iso(input: &str) -> Result<Self, MonthParseError> {
        let trimmed = input.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self::from_date(date));
        }
        let mut parts = trimmed.splitn(2, '-');
        let year = parts.next().and_then(|raw| raw.parse::<i32>().ok());
        let month = parts.next().and_then(|raw| {
            if raw.len() == 2 {
                raw.parse::<u32>().ok()
            } else {
                None
            }
        });
        match (year, month) {
            (Some(year), Some(month)) if trimmed.len() == 7 => Self::new(year, month)
                .map_err(|_| MonthParseError::Malformed(input.to_string())),
            _ => Err(MonthParseError::Malformed(input.to_string())),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of the month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month {
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year) => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// Counts the days of this month falling on `day_from_sunday` (0 = Sunday, 6 = Saturday).
    pub fn weekday_occurrences(&self, day_from_sunday: u32) -> u32 {
        (1..=self.days_in_month())
            .filter_map(|day| NaiveDate::from_ymd_opt(self.year, self.month, day))
            .filter(|date| date.weekday().num_days_from_sunday() == day_from_sunday)
            .count() as u32
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year.saturating_add(1),
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year.saturating_sub(1),
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(&self, other: BudgetMonth) -> i64 {
        let years = other.year as i64 - self.year as i64;
        years * 12 + other.month as i64 - self.month as i64
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

impl fmt::Display for BudgetMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-01", self.year, self.month)
    }
}

impl FromStr for BudgetMonth {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_iso(s)
    }
}

impl Serialize for BudgetMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BudgetMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        BudgetMonth::parse_iso(&raw).map_err(de::Error::custom)
    }
}

/// Errors raised when a month cannot be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    Malformed(String),
    OutOfRange { year: i32, month: u32 },
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::Malformed(input) => {
                write!(f, "`{input}` is not an ISO month (expected YYYY-MM-DD or YYYY-MM)")
            }
            MonthParseError::OutOfRange { year, month } => {
                write!(f, "month {year}-{month} is out of range")
            }
        }
    }
}

impl std::error::Error for MonthParseError {}
