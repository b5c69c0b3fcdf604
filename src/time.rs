use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Seed timestamps are written as local wall-clock time with a fixed +05:30 suffix.
pub const SEED_FORMAT: &str = "%Y-%m-%dT%H:%M:00.000+05:30";
const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000+05:30";

#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, PartialOrd, Hash)]
pub struct Time(pub NaiveDateTime);

impl Time {
    pub fn start_of_day(date: NaiveDate) -> Time {
        Time(date.and_time(NaiveTime::MIN))
    }

    /// `None` when the result leaves chrono's calendar range.
    pub fn checked_add(&self, delta: Duration) -> Option<Time> {
        self.0.checked_add_signed(delta).map(Time)
    }

    pub fn minutes_until(&self, later: Time) -> i64 {
        (later.0 - self.0).num_minutes()
    }

    /// `YYYYMMDD`, used as the barcode key.
    pub fn date_prefix(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }

    pub fn compact(&self) -> String {
        self.0.format("%Y%m%d%H%M").to_string()
    }

    pub fn date_string(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(SEED_FORMAT))
    }
}

impl FromStr for Time {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s, PARSE_FORMAT).map(Time)
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl Add<Duration> for Time {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Time(self.0 + rhs)
    }
}

impl Sub<Duration> for Time {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        Time(self.0 - rhs)
    }
}

impl Sub<Time> for Time {
    type Output = Duration;

    fn sub(self, rhs: Time) -> Self::Output {
        self.0 - rhs.0
    }
}
