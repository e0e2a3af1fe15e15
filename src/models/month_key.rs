//! Reporting month key (`YYYY-MM`)
//!
//! Mention months are always UTC months. Ordering is chronological.

use crate::error::{Error, Result};
use crate::services::month::month_start;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidInput(format!(
                "Invalid month {} (expected 1-12)",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// UTC month containing the timestamp
    pub fn from_timestamp(ts: DateTime<Utc>) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }

    /// Current UTC month
    pub fn current() -> Self {
        Self::from_timestamp(Utc::now())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First instant of the month in UTC
    pub fn start(&self) -> DateTime<Utc> {
        month_start(self.year, self.month as i32)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| Error::InvalidInput(format!("Invalid month '{}': expected YYYY-MM", s)))?;

        if year.len() != 4 || month.len() != 2 {
            return Err(Error::InvalidInput(format!(
                "Invalid month '{}': expected YYYY-MM",
                s
            )));
        }

        let year = year
            .parse::<i32>()
            .map_err(|e| Error::InvalidInput(format!("Invalid year in '{}': {}", s, e)))?;
        let month = month
            .parse::<u32>()
            .map_err(|e| Error::InvalidInput(format!("Invalid month in '{}': {}", s, e)))?;

        Self::new(year, month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
