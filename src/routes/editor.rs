// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training-date editor routes.
//!
//! The dashboard opens an editor for a month, streams pointer events from
//! the calendar grid, and finally submits or cancels.

use crate::calendar::{EditorSession, EditorView, GestureOutcome};
use crate::error::{AppError, Result};
use crate::models::CalendarDate;
use crate::services::SubmissionReport;
use crate::time_utils::from_epoch_millis;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const SUBMIT_FAILED_MESSAGE: &str = "Failed to update training dates.";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/months/{month_id}/editor",
            post(open_editor).get(get_editor).delete(close_editor),
        )
        .route("/api/months/{month_id}/editor/pointer", post(pointer_event))
        .route("/api/months/{month_id}/editor/navigate", post(navigate))
        .route("/api/months/{month_id}/editor/submit", post(submit))
}

// ─── Session Lifecycle ───────────────────────────────────────

/// Open (or reopen) the editor, seeded with the month's persisted days.
async fn open_editor(
    State(state): State<Arc<AppState>>,
    Path(month_id): Path<String>,
) -> Result<Json<EditorView>> {
    let month = state.schedule.get_month(&month_id).await?;
    let threshold = Duration::milliseconds(state.config.click_threshold_ms);
    let session = EditorSession::open(month, threshold)?;

    tracing::info!(
        month_id = %month_id,
        existing = session.existing().len(),
        "Editor opened"
    );

    let view = session.view();
    state.editors.open(session);
    Ok(Json(view))
}

async fn get_editor(
    State(state): State<Arc<AppState>>,
    Path(month_id): Path<String>,
) -> Result<Json<EditorView>> {
    let view = state.editors.with_session(&month_id, |s| s.view())?;
    Ok(Json(view))
}

#[derive(Serialize)]
pub struct CloseResponse {
    pub closed: bool,
}

/// Cancel the editor. An in-flight submission still runs to completion.
async fn close_editor(
    State(state): State<Arc<AppState>>,
    Path(month_id): Path<String>,
) -> Json<CloseResponse> {
    let closed = state.editors.close(&month_id);
    tracing::debug!(month_id = %month_id, closed, "Editor closed");
    Json(CloseResponse { closed })
}

// ─── Pointer Events ──────────────────────────────────────────

/// Pointer event from the calendar grid. Timestamps are client epoch millis.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        date: CalendarDate,
        at_ms: i64,
    },
    Enter {
        date: CalendarDate,
    },
    Up {
        #[serde(default)]
        date: Option<CalendarDate>,
        at_ms: i64,
    },
    Leave,
}

#[derive(Serialize)]
pub struct PointerResponse {
    pub outcome: &'static str,
    pub view: EditorView,
}

fn parse_at(at_ms: i64) -> Result<DateTime<Utc>> {
    from_epoch_millis(at_ms)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid timestamp: {}", at_ms)))
}

fn outcome_name(outcome: &GestureOutcome) -> &'static str {
    match outcome {
        GestureOutcome::Ignored => "ignored",
        GestureOutcome::Pending => "pending",
        GestureOutcome::Toggled { .. } => "toggled",
        GestureOutcome::Applied { .. } => "applied",
        GestureOutcome::Aborted => "aborted",
    }
}

async fn pointer_event(
    State(state): State<Arc<AppState>>,
    Path(month_id): Path<String>,
    Json(event): Json<PointerEvent>,
) -> Result<Json<PointerResponse>> {
    let (outcome, view) = state.editors.with_session(&month_id, |session| {
        let outcome = match event {
            PointerEvent::Down { date, at_ms } => session.pointer_down(date, parse_at(at_ms)?),
            PointerEvent::Enter { date } => session.pointer_enter(date),
            PointerEvent::Up { date, at_ms } => session.pointer_up(date, parse_at(at_ms)?),
            PointerEvent::Leave => session.pointer_leave(),
        };
        Ok::<_, AppError>((outcome, session.view()))
    })??;

    if let GestureOutcome::Applied { mode, changed } = &outcome {
        tracing::debug!(month_id = %month_id, ?mode, changed = changed.len(), "Drag applied");
    }

    Ok(Json(PointerResponse {
        outcome: outcome_name(&outcome),
        view,
    }))
}

#[derive(Deserialize)]
pub struct NavigateRequest {
    pub delta: i32,
}

/// Show an earlier or later month. Cells outside the edited month stay inert.
async fn navigate(
    State(state): State<Arc<AppState>>,
    Path(month_id): Path<String>,
    Json(req): Json<NavigateRequest>,
) -> Result<Json<EditorView>> {
    let view = state.editors.with_session(&month_id, |session| {
        session.navigate(req.delta)?;
        Ok::<_, AppError>(session.view())
    })??;
    Ok(Json(view))
}

// ─── Submission ──────────────────────────────────────────────

#[derive(Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub report: SubmissionReport,
}

/// Reconcile the selection with the persisted days and apply the diff.
///
/// The batch runs on its own task so that a dropped request does not cut
/// it short. Its result only touches the editor it started from.
async fn submit(
    State(state): State<Arc<AppState>>,
    Path(month_id): Path<String>,
) -> Result<Json<SubmitResponse>> {
    let (ticket, plan) = state.editors.begin_submit(&month_id)?;

    let task_state = state.clone();
    let task = tokio::spawn(async move {
        let result = task_state.schedule.submit(&plan).await;
        match &result {
            Ok(_) => {
                task_state.editors.complete_submit(&plan.month_id, ticket);
            }
            Err(e) => {
                tracing::error!(month_id = %plan.month_id, error = %e, "Submission failed");
                task_state.editors.fail_submit(
                    &plan.month_id,
                    ticket,
                    SUBMIT_FAILED_MESSAGE.to_string(),
                );
            }
        }
        result
    });

    let report = match task.await {
        Ok(result) => result?,
        Err(e) => {
            tracing::error!(month_id = %month_id, error = %e, "Submission task aborted");
            state
                .editors
                .fail_submit(&month_id, ticket, SUBMIT_FAILED_MESSAGE.to_string());
            return Err(AppError::Internal(anyhow::anyhow!(
                "Submission task failed: {}",
                e
            )));
        }
    };

    Ok(Json(SubmitResponse {
        success: true,
        report,
    }))
}
