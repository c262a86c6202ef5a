// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod editors;
pub mod schedule;
pub mod schedule_api;

pub use editors::{EditorRegistry, SubmitTicket};
pub use schedule::{ScheduleService, SubmissionReport};
pub use schedule_api::{ScheduleBackend, ScheduleClient};
