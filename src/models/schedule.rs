// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Month/week/day records as served by the schedule backend.

use super::CalendarDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

/// Response envelope used by every backend endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

/// A training month with its weeks and days.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Month {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// 1-based month number
    pub month_number: u32,
    pub year: i32,
    #[serde(default)]
    pub weeks: Vec<Week>,
}

/// A week inside a month.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub week_number: Option<u32>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub days: Vec<Day>,
}

/// A persisted training day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub day_number: Option<u32>,
    /// ISO 8601 date or timestamp
    pub date: String,
}

/// Location of a persisted day inside a month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRef {
    pub week_id: String,
    pub day_id: String,
    pub date: CalendarDate,
}

impl Month {
    /// First calendar day of this month, if the month number is valid.
    pub fn first_day(&self) -> Option<CalendarDate> {
        CalendarDate::new(self.year, self.month_number, 1)
    }

    /// Every persisted day whose date parses, in week order.
    pub fn day_refs(&self) -> Vec<DayRef> {
        let mut refs = Vec::new();
        for week in &self.weeks {
            for day in &week.days {
                match CalendarDate::parse_record(&day.date) {
                    Ok(date) => refs.push(DayRef {
                        week_id: week.id.clone(),
                        day_id: day.id.clone(),
                        date,
                    }),
                    Err(e) => {
                        tracing::warn!(
                            month_id = %self.id,
                            day_id = %day.id,
                            error = %e,
                            "Skipping day with unparseable date"
                        );
                    }
                }
            }
        }
        refs
    }

    /// The set of persisted training dates.
    pub fn existing_dates(&self) -> BTreeSet<CalendarDate> {
        self.day_refs().into_iter().map(|r| r.date).collect()
    }

    /// Ids of weeks that have no days left.
    pub fn empty_week_ids(&self) -> Vec<String> {
        self.weeks
            .iter()
            .filter(|w| w.days.is_empty())
            .map(|w| w.id.clone())
            .collect()
    }

    pub fn week(&self, week_id: &str) -> Option<&Week> {
        self.weeks.iter().find(|w| w.id == week_id)
    }
}

/// Create/update payload for a month.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MonthForm {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(range(min = 1, max = 12, message = "Month number must be between 1 and 12"))]
    pub month_number: u32,
    #[validate(range(min = 1900, max = 9999, message = "Year out of range"))]
    pub year: i32,
}

/// Payload for adding a week to a month.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WeekForm {
    #[validate(range(min = 1, max = 6, message = "Week number must be between 1 and 6"))]
    pub week_number: u32,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// Payload for adding a day to a week.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DayForm {
    #[validate(length(min = 1, message = "Week id is required"))]
    pub week_id: String,
    #[validate(range(min = 1, max = 7, message = "Day number must be between 1 and 7"))]
    pub day_number: u32,
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
}

/// Body of `POST /months/generate-weeks-days`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateWeeksDays {
    pub month_id: String,
    /// Dates in `D/M/YYYY`
    pub dates: Vec<String>,
}

impl GenerateWeeksDays {
    pub fn new(month_id: &str, dates: &[CalendarDate]) -> Self {
        Self {
            month_id: month_id.to_string(),
            dates: dates.iter().map(|d| d.to_api_string()).collect(),
        }
    }
}
