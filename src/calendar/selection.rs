// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Set of selected training dates.

use crate::models::CalendarDate;
use std::collections::BTreeSet;

/// Selected dates, deduplicated by calendar day and kept in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    dates: BTreeSet<CalendarDate>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `date`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, date: CalendarDate) -> bool {
        if self.dates.remove(&date) {
            false
        } else {
            self.dates.insert(date);
            true
        }
    }

    /// Insert `date`; returns `false` if it was already selected.
    pub fn insert(&mut self, date: CalendarDate) -> bool {
        self.dates.insert(date)
    }

    /// Remove `date`; returns `false` if it was not selected.
    pub fn remove(&mut self, date: CalendarDate) -> bool {
        self.dates.remove(&date)
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.dates.contains(&date)
    }

    /// Selected dates in ascending order.
    pub fn all(&self) -> Vec<CalendarDate> {
        self.dates.iter().copied().collect()
    }

    pub fn as_set(&self) -> &BTreeSet<CalendarDate> {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn clear(&mut self) {
        self.dates.clear();
    }
}

impl FromIterator<CalendarDate> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = CalendarDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}
