// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Month/week/day management routes.

use crate::error::Result;
use crate::models::{DayForm, Month, MonthForm, WeekForm};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/months", get(list_months).post(create_month))
        .route(
            "/api/months/{month_id}",
            put(update_month).delete(delete_month),
        )
        .route("/api/months/{month_id}/weeks", post(add_week))
        .route("/api/months/{month_id}/days", post(add_day))
        .route(
            "/api/months/{month_id}/weeks/{week_id}/days/{day_id}",
            delete(remove_day),
        )
}

#[derive(Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl ActionResponse {
    fn ok(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
        })
    }
}

async fn list_months(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Month>>> {
    let months = state.schedule.list_months().await?;
    tracing::debug!(count = months.len(), "Fetched months");
    Ok(Json(months))
}

async fn create_month(
    State(state): State<Arc<AppState>>,
    Json(form): Json<MonthForm>,
) -> Result<(StatusCode, Json<Month>)> {
    form.validate()?;
    let month = state.schedule.create_month(&form).await?;
    Ok((StatusCode::CREATED, Json(month)))
}

async fn update_month(
    State(state): State<Arc<AppState>>,
    Path(month_id): Path<String>,
    Json(form): Json<MonthForm>,
) -> Result<Json<Month>> {
    form.validate()?;
    let month = state.schedule.update_month(&month_id, &form).await?;
    Ok(Json(month))
}

/// Delete a month with all its weeks and days.
async fn delete_month(
    State(state): State<Arc<AppState>>,
    Path(month_id): Path<String>,
) -> Result<Json<ActionResponse>> {
    state.schedule.delete_month_cascade(&month_id).await?;
    if state.editors.close(&month_id) {
        tracing::info!(month_id = %month_id, "Closed editor of deleted month");
    }
    Ok(ActionResponse::ok("Month deleted"))
}

async fn add_week(
    State(state): State<Arc<AppState>>,
    Path(month_id): Path<String>,
    Json(form): Json<WeekForm>,
) -> Result<Json<ActionResponse>> {
    form.validate()?;
    state.schedule.add_week(&month_id, &form).await?;
    Ok(ActionResponse::ok("Week added"))
}

async fn add_day(
    State(state): State<Arc<AppState>>,
    Path(month_id): Path<String>,
    Json(form): Json<DayForm>,
) -> Result<Json<ActionResponse>> {
    form.validate()?;
    state.schedule.add_day(&month_id, &form).await?;
    Ok(ActionResponse::ok("Day added"))
}

async fn remove_day(
    State(state): State<Arc<AppState>>,
    Path((month_id, week_id, day_id)): Path<(String, String, String)>,
) -> Result<Json<ActionResponse>> {
    state
        .schedule
        .remove_day(&month_id, &week_id, &day_id)
        .await?;
    Ok(ActionResponse::ok("Day removed"))
}
