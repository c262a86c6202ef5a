// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registry of open editor sessions, one per month.

use crate::calendar::{EditorSession, SubmitPlan};
use crate::error::AppError;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

struct OpenEditor {
    generation: u64,
    session: EditorSession,
}

/// Ticket for an in-flight submission. Its result only lands on the session
/// it was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket {
    generation: u64,
}

/// Open editors keyed by month id.
///
/// Guards are never held across an `.await`: callers copy what they need
/// out of the closure passed to [`EditorRegistry::with_session`].
#[derive(Default)]
pub struct EditorRegistry {
    editors: DashMap<String, OpenEditor>,
    next_generation: AtomicU64,
}

impl EditorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fresh session, replacing any editor already open for the
    /// month.
    pub fn open(&self, session: EditorSession) {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let month_id = session.month_id().to_string();
        if self
            .editors
            .insert(month_id.clone(), OpenEditor { generation, session })
            .is_some()
        {
            tracing::debug!(month_id = %month_id, "Replaced open editor");
        }
    }

    /// Close the month's editor. Returns whether one was open.
    pub fn close(&self, month_id: &str) -> bool {
        self.editors.remove(month_id).is_some()
    }

    pub fn is_open(&self, month_id: &str) -> bool {
        self.editors.contains_key(month_id)
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }

    /// Run `f` against the open session for `month_id`.
    pub fn with_session<R>(
        &self,
        month_id: &str,
        f: impl FnOnce(&mut EditorSession) -> R,
    ) -> Result<R, AppError> {
        let mut editor = self
            .editors
            .get_mut(month_id)
            .ok_or_else(|| no_editor(month_id))?;
        Ok(f(&mut editor.session))
    }

    /// Move the session to `Submitting` and hand out the plan.
    pub fn begin_submit(&self, month_id: &str) -> Result<(SubmitTicket, SubmitPlan), AppError> {
        let mut editor = self
            .editors
            .get_mut(month_id)
            .ok_or_else(|| no_editor(month_id))?;
        let plan = editor.session.begin_submit()?;
        Ok((
            SubmitTicket {
                generation: editor.generation,
            },
            plan,
        ))
    }

    /// Submission succeeded: close the editor it belonged to.
    ///
    /// Returns `false` if that editor was closed or replaced meanwhile, in
    /// which case nothing is touched.
    pub fn complete_submit(&self, month_id: &str, ticket: SubmitTicket) -> bool {
        let removed = self
            .editors
            .remove_if(month_id, |_, e| e.generation == ticket.generation)
            .is_some();
        if !removed {
            tracing::debug!(month_id, "Editor gone before submission finished, result discarded");
        }
        removed
    }

    /// Submission failed: keep the editor open with its selection.
    pub fn fail_submit(&self, month_id: &str, ticket: SubmitTicket, message: String) -> bool {
        match self.editors.entry(month_id.to_string()) {
            Entry::Occupied(mut entry) if entry.get().generation == ticket.generation => {
                entry.get_mut().session.fail_submit(message);
                true
            }
            _ => {
                tracing::debug!(month_id, "Editor gone before submission failed, error discarded");
                false
            }
        }
    }
}

fn no_editor(month_id: &str) -> AppError {
    AppError::NotFound(format!("No open editor for month {}", month_id))
}
