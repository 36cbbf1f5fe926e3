//! Relative time windows
//!
//! A [`TimeWindow`] is the only piece of a top-N query that is interpolated
//! into query text. It can only be built by parsing `<amount> <UNIT>`, so the
//! rendered literal is always a positive integer followed by a known unit.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Interval units understood by the analytical engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalUnit {
    /// Minutes
    Minute,
    /// Hours
    Hour,
    /// Days
    Day,
    /// Weeks
    Week,
    /// Months
    Month,
    /// Years
    Year,
}

impl IntervalUnit {
    /// Engine-native spelling of the unit
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "MINUTE",
            Self::Hour => "HOUR",
            Self::Day => "DAY",
            Self::Week => "WEEK",
            Self::Month => "MONTH",
            Self::Year => "YEAR",
        }
    }
}

impl FromStr for IntervalUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "MINUTE" => Ok(Self::Minute),
            "HOUR" => Ok(Self::Hour),
            "DAY" => Ok(Self::Day),
            "WEEK" => Ok(Self::Week),
            "MONTH" => Ok(Self::Month),
            "YEAR" => Ok(Self::Year),
            other => Err(Error::validation(format!(
                "Unknown interval unit '{other}'. Use MINUTE, HOUR, DAY, WEEK, MONTH or YEAR"
            ))),
        }
    }
}

/// Relative window ending now, e.g. `7 DAY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    amount: u32,
    unit: IntervalUnit,
}

impl TimeWindow {
    /// Create a window of `amount` units; `amount` must be positive
    pub fn new(amount: u32, unit: IntervalUnit) -> Result<Self> {
        if amount == 0 {
            return Err(Error::validation(
                "Time window must be positive; omit the window for all time",
            ));
        }
        Ok(Self { amount, unit })
    }

    /// Number of units
    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// Interval unit
    pub fn unit(&self) -> IntervalUnit {
        self.unit
    }

    /// Interval literal in engine syntax (`7 DAY`)
    pub fn interval_literal(&self) -> String {
        self.to_string()
    }

    /// Lower-case token safe for cache keys (`7_day`)
    pub fn key_token(&self) -> String {
        format!("{}_{}", self.amount, self.unit.as_str().to_ascii_lowercase())
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let (Some(amount), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(Error::validation(format!(
                "Invalid time window '{s}'. Expected '<amount> <UNIT>', e.g. '7 DAY'"
            )));
        };

        let amount = amount.parse::<u32>().map_err(|_| {
            Error::validation(format!("Invalid time window amount '{amount}'"))
        })?;

        Self::new(amount, unit.parse()?)
    }
}

impl Serialize for TimeWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeWindow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
