// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Training schedule editor service.
//!
//! This crate provides the backend API behind the dashboard's month schedule
//! editor: a calendar grid with click and drag date selection, reconciled
//! against the training days persisted in the schedule backend.

pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{EditorRegistry, ScheduleService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub schedule: ScheduleService,
    pub editors: EditorRegistry,
}
