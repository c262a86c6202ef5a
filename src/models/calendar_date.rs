// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Timezone-free calendar day value.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A (year, month, day) triple in the proleptic Gregorian calendar.
///
/// Field order makes the derived `Ord` ascend by year, then month, then day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    /// Build a date, returning `None` if the triple is not a real day.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from_naive)
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn to_naive(self) -> NaiveDate {
        // Constructors only admit valid triples.
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).unwrap_or(NaiveDate::MIN)
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn day(self) -> u32 {
        self.day
    }

    pub fn weekday(self) -> Weekday {
        self.to_naive().weekday()
    }

    /// First day of this date's month.
    pub fn first_of_month(self) -> Self {
        Self {
            day: 1,
            ..self
        }
    }

    /// Number of days in this date's month.
    pub fn days_in_month(self) -> u32 {
        let first = self.first_of_month().to_naive();
        first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map(|last| last.day())
            .unwrap_or(31)
    }

    /// The next calendar day.
    pub fn succ(self) -> Option<Self> {
        self.to_naive().succ_opt().map(Self::from_naive)
    }

    /// First day of the month `delta` months away.
    pub fn shift_months(self, delta: i32) -> Option<Self> {
        let first = self.first_of_month().to_naive();
        let shifted = if delta >= 0 {
            first.checked_add_months(Months::new(delta.unsigned_abs()))
        } else {
            first.checked_sub_months(Months::new(delta.unsigned_abs()))
        };
        shifted.map(Self::from_naive)
    }

    /// Inclusive range between two dates, in ascending order regardless of
    /// argument order.
    pub fn range_inclusive(a: Self, b: Self) -> Vec<Self> {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let mut dates = Vec::new();
        let mut current = Some(start);
        while let Some(date) = current {
            if date > end {
                break;
            }
            dates.push(date);
            current = date.succ();
        }
        dates
    }

    /// Backend wire format: `D/M/YYYY`, no zero padding.
    pub fn to_api_string(self) -> String {
        format!("{}/{}/{}", self.day, self.month, self.year)
    }

    /// Parse the backend wire format `D/M/YYYY`.
    pub fn parse_api(s: &str) -> Result<Self, DateParseError> {
        let mut parts = s.trim().split('/');
        let (Some(d), Some(m), Some(y), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(DateParseError(s.to_string()));
        };
        let day = d.parse().map_err(|_| DateParseError(s.to_string()))?;
        let month = m.parse().map_err(|_| DateParseError(s.to_string()))?;
        let year = y.parse().map_err(|_| DateParseError(s.to_string()))?;
        Self::new(year, month, day).ok_or_else(|| DateParseError(s.to_string()))
    }

    /// Parse a persisted day record's `date` field.
    ///
    /// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive ISO timestamps.
    /// Only the calendar day as written is kept; the offset is ignored.
    pub fn parse_record(s: &str) -> Result<Self, DateParseError> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::from_naive(date));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::from_naive(dt.date_naive()));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self::from_naive(dt.date()));
        }
        Err(DateParseError(s.to_string()))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self::from_naive)
            .map_err(|_| DateParseError(s.to_string()))
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A string that is not a recognizable calendar day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid calendar date: {0}")]
pub struct DateParseError(pub String);
