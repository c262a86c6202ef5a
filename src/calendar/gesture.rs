// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Click vs drag disambiguation for pointer gestures on the date grid.
//!
//! States: `Idle -> PointerDown -> (Dragging | released as click) -> Idle`.
//! A press becomes a drag the first time the pointer enters a different
//! in-scope cell. A release on the start cell within the click threshold,
//! with no drag in between, toggles that one date. Any other release that
//! is not a completed drag is an aborted gesture and changes nothing.

use super::grid::{is_in_scope, MonthScope};
use super::selection::SelectionSet;
use crate::models::CalendarDate;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Whether a drag adds or removes dates. Fixed when the gesture starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    Select,
    Deselect,
}

/// How a previewed cell would change if the drag were released now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewState {
    WillSelect,
    AlreadySelected,
    WillDeselect,
    AlreadyDeselected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    PointerDown {
        start: CalendarDate,
        pressed_at: DateTime<Utc>,
        mode: DragMode,
    },
    Dragging {
        start: CalendarDate,
        pressed_at: DateTime<Utc>,
        mode: DragMode,
        /// In-scope dates between start and hover, ascending
        preview: Vec<CalendarDate>,
    },
}

/// Result of feeding one pointer event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Event did not apply (inert cell, no gesture active).
    Ignored,
    /// Gesture still in progress.
    Pending,
    /// Single click toggled a date.
    Toggled { date: CalendarDate, selected: bool },
    /// Drag applied; `changed` lists the dates whose membership flipped.
    Applied {
        mode: DragMode,
        changed: Vec<CalendarDate>,
    },
    /// Gesture ended without touching the selection.
    Aborted,
}

#[derive(Debug, Clone)]
pub struct Disambiguator {
    state: GestureState,
    click_threshold: Duration,
}

impl Disambiguator {
    pub fn new(click_threshold: Duration) -> Self {
        Self {
            state: GestureState::Idle,
            click_threshold,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == GestureState::Idle
    }

    pub fn mode(&self) -> Option<DragMode> {
        match &self.state {
            GestureState::Idle => None,
            GestureState::PointerDown { mode, .. } | GestureState::Dragging { mode, .. } => {
                Some(*mode)
            }
        }
    }

    /// Current drag preview; empty unless dragging.
    pub fn preview(&self) -> &[CalendarDate] {
        match &self.state {
            GestureState::Dragging { preview, .. } => preview,
            _ => &[],
        }
    }

    pub fn preview_state(
        &self,
        date: CalendarDate,
        selection: &SelectionSet,
    ) -> Option<PreviewState> {
        let GestureState::Dragging { mode, preview, .. } = &self.state else {
            return None;
        };
        if preview.binary_search(&date).is_err() {
            return None;
        }
        let selected = selection.contains(date);
        Some(match (mode, selected) {
            (DragMode::Select, false) => PreviewState::WillSelect,
            (DragMode::Select, true) => PreviewState::AlreadySelected,
            (DragMode::Deselect, true) => PreviewState::WillDeselect,
            (DragMode::Deselect, false) => PreviewState::AlreadyDeselected,
        })
    }

    /// Pointer pressed on `date`. Starts a new gesture if the cell is live.
    pub fn pointer_down(
        &mut self,
        date: CalendarDate,
        at: DateTime<Utc>,
        selection: &SelectionSet,
        scope: Option<MonthScope>,
    ) -> GestureOutcome {
        if !is_in_scope(Some(date), scope) {
            return GestureOutcome::Ignored;
        }

        let mode = if selection.contains(date) {
            DragMode::Deselect
        } else {
            DragMode::Select
        };
        self.state = GestureState::PointerDown {
            start: date,
            pressed_at: at,
            mode,
        };
        GestureOutcome::Pending
    }

    /// Pointer moved over `date`.
    pub fn pointer_enter(
        &mut self,
        date: CalendarDate,
        scope: Option<MonthScope>,
    ) -> GestureOutcome {
        if !is_in_scope(Some(date), scope) {
            return GestureOutcome::Ignored;
        }

        let (start, pressed_at, mode) = match &self.state {
            GestureState::Idle => return GestureOutcome::Ignored,
            GestureState::PointerDown { start, .. } if *start == date => {
                return GestureOutcome::Pending
            }
            GestureState::PointerDown {
                start,
                pressed_at,
                mode,
            }
            | GestureState::Dragging {
                start,
                pressed_at,
                mode,
                ..
            } => (*start, *pressed_at, *mode),
        };

        let preview = CalendarDate::range_inclusive(start, date)
            .into_iter()
            .filter(|d| is_in_scope(Some(*d), scope))
            .collect();
        self.state = GestureState::Dragging {
            start,
            pressed_at,
            mode,
            preview,
        };
        GestureOutcome::Pending
    }

    /// Pointer released, over `date` or outside the grid (`None`).
    ///
    /// The gesture state is always reset, whichever branch fires.
    pub fn pointer_up(
        &mut self,
        date: Option<CalendarDate>,
        at: DateTime<Utc>,
        selection: &mut SelectionSet,
    ) -> GestureOutcome {
        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Idle => GestureOutcome::Ignored,
            GestureState::PointerDown {
                start, pressed_at, ..
            } => {
                let quick = at.signed_duration_since(pressed_at) < self.click_threshold;
                if quick && date == Some(start) {
                    let selected = selection.toggle(start);
                    GestureOutcome::Toggled {
                        date: start,
                        selected,
                    }
                } else {
                    GestureOutcome::Aborted
                }
            }
            GestureState::Dragging { mode, preview, .. } => {
                if preview.is_empty() {
                    return GestureOutcome::Aborted;
                }
                let changed = preview
                    .into_iter()
                    .filter(|d| match mode {
                        DragMode::Select => selection.insert(*d),
                        DragMode::Deselect => selection.remove(*d),
                    })
                    .collect();
                GestureOutcome::Applied { mode, changed }
            }
        }
    }

    /// Pointer left the grid entirely.
    pub fn pointer_leave(&mut self) -> GestureOutcome {
        if self.is_idle() {
            return GestureOutcome::Ignored;
        }
        self.reset();
        GestureOutcome::Aborted
    }

    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }
}
