// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One open schedule editor: grid, selection, gesture and submission state.

use super::diff::{reconcile, Reconciliation};
use super::gesture::{Disambiguator, DragMode, GestureOutcome, GestureState, PreviewState};
use super::grid::{is_in_scope, DateGrid, MonthScope};
use super::selection::SelectionSet;
use crate::error::AppError;
use crate::models::{CalendarDate, DayRef, Month};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Submission lifecycle. Success closes the editor, so it has no state here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Submitting,
    Failed { message: String },
}

/// Work order handed to the batch submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPlan {
    pub month_id: String,
    pub diff: Reconciliation,
    /// Persisted days whose dates are in `diff.to_remove`
    pub removals: Vec<DayRef>,
}

/// Editor session for a single month.
///
/// Created when the editor opens with the selection seeded from the
/// persisted days, dropped when it closes.
#[derive(Debug, Clone)]
pub struct EditorSession {
    month: Month,
    existing: BTreeSet<CalendarDate>,
    selection: SelectionSet,
    gesture: Disambiguator,
    scope: Option<MonthScope>,
    displayed: CalendarDate,
    submission: SubmissionState,
    last_error: Option<String>,
}

impl EditorSession {
    pub fn open(month: Month, click_threshold: Duration) -> Result<Self, AppError> {
        let first = month.first_day().ok_or_else(|| {
            AppError::ScheduleApi(format!(
                "Month {} has invalid month number {}",
                month.id, month.month_number
            ))
        })?;
        let existing = month.existing_dates();

        Ok(Self {
            selection: existing.iter().copied().collect(),
            existing,
            gesture: Disambiguator::new(click_threshold),
            scope: Some(MonthScope::of(first)),
            displayed: first,
            submission: SubmissionState::Idle,
            last_error: None,
            month,
        })
    }

    pub fn month(&self) -> &Month {
        &self.month
    }

    pub fn month_id(&self) -> &str {
        &self.month.id
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn existing(&self) -> &BTreeSet<CalendarDate> {
        &self.existing
    }

    pub fn gesture(&self) -> &Disambiguator {
        &self.gesture
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == SubmissionState::Submitting
    }

    pub fn grid(&self) -> DateGrid {
        DateGrid::for_month(self.displayed)
    }

    /// Move the displayed month. The month filter is unchanged.
    pub fn navigate(&mut self, delta: i32) -> Result<(), AppError> {
        self.displayed = self
            .displayed
            .shift_months(delta)
            .ok_or_else(|| AppError::BadRequest(format!("Cannot move {} months", delta)))?;
        self.gesture.reset();
        Ok(())
    }

    pub fn pointer_down(&mut self, date: CalendarDate, at: DateTime<Utc>) -> GestureOutcome {
        if self.is_submitting() {
            return GestureOutcome::Ignored;
        }
        self.gesture
            .pointer_down(date, at, &self.selection, self.scope)
    }

    pub fn pointer_enter(&mut self, date: CalendarDate) -> GestureOutcome {
        if self.is_submitting() {
            return GestureOutcome::Ignored;
        }
        self.gesture.pointer_enter(date, self.scope)
    }

    pub fn pointer_up(&mut self, date: Option<CalendarDate>, at: DateTime<Utc>) -> GestureOutcome {
        if self.is_submitting() {
            return GestureOutcome::Ignored;
        }
        self.gesture.pointer_up(date, at, &mut self.selection)
    }

    pub fn pointer_leave(&mut self) -> GestureOutcome {
        self.gesture.pointer_leave()
    }

    /// Diff of the current selection, or `None` while it is empty.
    pub fn pending_diff(&self) -> Option<Reconciliation> {
        reconcile(&self.selection, &self.existing).ok()
    }

    /// Validate the selection and move to `Submitting`.
    pub fn begin_submit(&mut self) -> Result<SubmitPlan, AppError> {
        if self.is_submitting() {
            return Err(AppError::Conflict(format!(
                "Submission already in progress for month {}",
                self.month.id
            )));
        }

        let diff = match reconcile(&self.selection, &self.existing) {
            Ok(diff) => diff,
            Err(e) => {
                if let AppError::Validation(msg) = &e {
                    self.last_error = Some(msg.clone());
                }
                return Err(e);
            }
        };

        let remove: BTreeSet<_> = diff.to_remove.iter().copied().collect();
        let removals = self
            .month
            .day_refs()
            .into_iter()
            .filter(|r| remove.contains(&r.date))
            .collect();

        self.gesture.reset();
        self.submission = SubmissionState::Submitting;
        self.last_error = None;

        Ok(SubmitPlan {
            month_id: self.month.id.clone(),
            diff,
            removals,
        })
    }

    /// The add phase failed: stay open with the selection untouched.
    pub fn fail_submit(&mut self, message: String) {
        self.last_error = Some(message.clone());
        self.submission = SubmissionState::Failed { message };
    }

    pub fn view(&self) -> EditorView {
        let cells = self
            .grid()
            .cells()
            .iter()
            .map(|&cell| CellView {
                date: cell,
                in_scope: is_in_scope(cell, self.scope),
                selected: cell.is_some_and(|d| self.selection.contains(d)),
                existing: cell.is_some_and(|d| self.existing.contains(&d)),
                preview: cell.and_then(|d| self.gesture.preview_state(d, &self.selection)),
            })
            .collect();

        let (to_add, to_remove) = self
            .pending_diff()
            .map(|d| (d.to_add.len(), d.to_remove.len()))
            .unwrap_or((0, self.existing.len()));

        let gesture = match self.gesture.state() {
            GestureState::Idle => "idle",
            GestureState::PointerDown { .. } => "pointer_down",
            GestureState::Dragging { .. } => "dragging",
        };

        EditorView {
            month_id: self.month.id.clone(),
            month_name: self.month.name.clone(),
            displayed_year: self.displayed.year(),
            displayed_month: self.displayed.month(),
            cells,
            selected: self.selection.all(),
            to_add,
            to_remove,
            gesture: gesture.to_string(),
            drag_mode: self.gesture.mode(),
            submission: self.submission.clone(),
            error: self.last_error.clone(),
        }
    }
}

/// One grid cell as rendered by the dashboard.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CellView {
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub date: Option<CalendarDate>,
    pub in_scope: bool,
    pub selected: bool,
    pub existing: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub preview: Option<PreviewState>,
}

/// Snapshot of an editor session.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EditorView {
    pub month_id: String,
    pub month_name: String,
    pub displayed_year: i32,
    pub displayed_month: u32,
    pub cells: Vec<CellView>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string[]"))]
    pub selected: Vec<CalendarDate>,
    /// Dates the next submission would add
    pub to_add: usize,
    /// Persisted dates the next submission would remove
    pub to_remove: usize,
    pub gesture: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub drag_mode: Option<DragMode>,
    pub submission: SubmissionState,
    pub error: Option<String>,
}
