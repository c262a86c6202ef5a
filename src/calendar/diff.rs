// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reconciliation of the edited selection against persisted training days.

use super::selection::SelectionSet;
use crate::error::AppError;
use crate::models::CalendarDate;
use std::collections::BTreeSet;

/// Dates to add and remove, both ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub to_add: Vec<CalendarDate>,
    pub to_remove: Vec<CalendarDate>,
}

impl Reconciliation {
    pub fn is_noop(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Diff `selection` against `existing`.
///
/// An empty selection is rejected before any diff is computed.
pub fn reconcile(
    selection: &SelectionSet,
    existing: &BTreeSet<CalendarDate>,
) -> Result<Reconciliation, AppError> {
    if selection.is_empty() {
        return Err(AppError::Validation(AppError::EMPTY_SELECTION.to_string()));
    }

    let selected = selection.as_set();
    Ok(Reconciliation {
        to_add: selected.difference(existing).copied().collect(),
        to_remove: existing.difference(selected).copied().collect(),
    })
}
