// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod calendar_date;
pub mod schedule;

pub use calendar_date::{CalendarDate, DateParseError};
pub use schedule::{
    ApiEnvelope, Day, DayForm, DayRef, GenerateWeeksDays, Month, MonthForm, Week, WeekForm,
};
