// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar range-select editor: grid layout, selection, pointer gesture
//! state machine and reconciliation against persisted training days.

pub mod diff;
pub mod editor;
pub mod gesture;
pub mod grid;
pub mod selection;

pub use diff::{reconcile, Reconciliation};
pub use editor::{EditorSession, EditorView, SubmissionState, SubmitPlan};
pub use gesture::{Disambiguator, DragMode, GestureOutcome, GestureState, PreviewState};
pub use grid::{DateGrid, MonthScope};
pub use selection::SelectionSet;
