// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Month grid layout and cell scoping.

use crate::models::CalendarDate;

/// The month an editor is restricted to. Cells outside it are inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthScope {
    pub year: i32,
    pub month: u32,
}

impl MonthScope {
    pub fn of(date: CalendarDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// Whether a cell can be interacted with. `None` scope means no filter.
pub fn is_in_scope(cell: Option<CalendarDate>, scope: Option<MonthScope>) -> bool {
    match (cell, scope) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(date), Some(scope)) => scope.contains(date),
    }
}

/// Calendar grid for one month, Sunday-first.
///
/// Leading `None` cells align day 1 under its weekday column. Trailing
/// blanks are not emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGrid {
    first: CalendarDate,
    cells: Vec<Option<CalendarDate>>,
}

impl DateGrid {
    /// Build the grid for the month containing `reference`.
    pub fn for_month(reference: CalendarDate) -> Self {
        let first = reference.first_of_month();
        let offset = first.weekday().num_days_from_sunday() as usize;
        let days = reference.days_in_month();

        let mut cells = Vec::with_capacity(offset + days as usize);
        cells.resize(offset, None);
        cells.extend((1..=days).map(|day| CalendarDate::new(first.year(), first.month(), day)));

        Self { first, cells }
    }

    pub fn first_day(&self) -> CalendarDate {
        self.first
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_none()).count()
    }

    pub fn cells(&self) -> &[Option<CalendarDate>] {
        &self.cells
    }

    /// Rows of up to seven cells; the last row may be short.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<CalendarDate>]> {
        self.cells.chunks(7)
    }
}
