// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Schedule operations layered over the backend: batch submission of an
//! editor plan, cascading deletes and empty-week cleanup.

use super::schedule_api::ScheduleBackend;
use crate::calendar::SubmitPlan;
use crate::error::AppError;
use crate::models::{DayForm, GenerateWeeksDays, Month, MonthForm, WeekForm};
use serde::Serialize;
use std::sync::Arc;

/// What a successful submission did.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReport {
    pub month_id: String,
    /// Days deleted (or already gone)
    pub removed: usize,
    /// Day deletions that failed and were skipped
    pub remove_failures: usize,
    /// Dates sent to the generate call
    pub added: usize,
    /// Authoritative month after the batch, if the reload succeeded
    pub month: Option<Month>,
}

#[derive(Clone)]
pub struct ScheduleService {
    backend: Arc<dyn ScheduleBackend>,
}

impl ScheduleService {
    pub fn new(backend: Arc<dyn ScheduleBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &dyn ScheduleBackend {
        self.backend.as_ref()
    }

    pub async fn list_months(&self) -> Result<Vec<Month>, AppError> {
        self.backend.list_months().await
    }

    pub async fn get_month(&self, month_id: &str) -> Result<Month, AppError> {
        self.backend.get_month(month_id).await
    }

    pub async fn create_month(&self, form: &MonthForm) -> Result<Month, AppError> {
        let month = self.backend.create_month(form).await?;
        tracing::info!(month_id = %month.id, name = %month.name, "Month created");
        Ok(month)
    }

    pub async fn update_month(&self, month_id: &str, form: &MonthForm) -> Result<Month, AppError> {
        let month = self.backend.update_month(month_id, form).await?;
        self.cleanup_empty_weeks(month_id).await;
        Ok(month)
    }

    pub async fn add_week(&self, month_id: &str, form: &WeekForm) -> Result<(), AppError> {
        self.backend.add_week(month_id, form).await?;
        self.cleanup_empty_weeks(month_id).await;
        Ok(())
    }

    pub async fn add_day(&self, month_id: &str, form: &DayForm) -> Result<(), AppError> {
        self.backend.add_day(month_id, form).await?;
        self.cleanup_empty_weeks(month_id).await;
        Ok(())
    }

    /// Run an editor submission: removals first, then one generate call.
    ///
    /// Individual removal failures are logged and skipped. Only a failing
    /// generate call fails the submission.
    pub async fn submit(&self, plan: &SubmitPlan) -> Result<SubmissionReport, AppError> {
        let month_id = plan.month_id.as_str();
        tracing::info!(
            month_id,
            to_add = plan.diff.to_add.len(),
            to_remove = plan.diff.to_remove.len(),
            "Submitting training dates"
        );

        let mut removed = 0;
        let mut remove_failures = 0;
        for day in &plan.removals {
            match self.delete_day_idempotent(&day.day_id).await {
                Ok(()) => removed += 1,
                Err(e) => {
                    remove_failures += 1;
                    tracing::warn!(
                        month_id,
                        day_id = %day.day_id,
                        date = %day.date,
                        error = %e,
                        "Failed to remove day, continuing"
                    );
                }
            }
        }

        if !plan.removals.is_empty() {
            self.cleanup_empty_weeks(month_id).await;
        }

        if !plan.diff.to_add.is_empty() {
            let body = GenerateWeeksDays::new(month_id, &plan.diff.to_add);
            self.backend.generate_weeks_days(&body).await?;
        }

        let month = match self.backend.get_month(month_id).await {
            Ok(month) => Some(month),
            Err(e) => {
                tracing::warn!(month_id, error = %e, "Reload after submission failed");
                None
            }
        };

        tracing::info!(
            month_id,
            removed,
            remove_failures,
            added = plan.diff.to_add.len(),
            "Training dates submitted"
        );

        Ok(SubmissionReport {
            month_id: month_id.to_string(),
            removed,
            remove_failures,
            added: plan.diff.to_add.len(),
            month,
        })
    }

    /// Delete every week of the month that has no days. Best-effort.
    pub async fn cleanup_empty_weeks(&self, month_id: &str) {
        let month = match self.backend.get_month(month_id).await {
            Ok(month) => month,
            Err(e) => {
                tracing::warn!(month_id, error = %e, "Empty week cleanup: reload failed");
                return;
            }
        };

        let empty = month.empty_week_ids();
        if empty.is_empty() {
            return;
        }
        tracing::info!(month_id, count = empty.len(), "Deleting empty weeks");

        for week_id in empty {
            if let Err(e) = self.backend.delete_week(&week_id).await {
                tracing::warn!(month_id, week_id = %week_id, error = %e, "Failed to delete empty week");
            }
        }
    }

    /// Delete a month with all of its days and weeks.
    ///
    /// Day and week failures are logged and skipped; the month delete itself
    /// must succeed.
    pub async fn delete_month_cascade(&self, month_id: &str) -> Result<(), AppError> {
        let month = self.backend.get_month(month_id).await?;
        let day_ids: Vec<&str> = month
            .weeks
            .iter()
            .flat_map(|w| w.days.iter().map(|d| d.id.as_str()))
            .collect();

        tracing::info!(
            month_id,
            weeks = month.weeks.len(),
            days = day_ids.len(),
            "Deleting month"
        );

        for day_id in day_ids {
            if let Err(e) = self.delete_day_idempotent(day_id).await {
                tracing::warn!(month_id, day_id, error = %e, "Failed to delete day");
            }
        }

        for week in &month.weeks {
            if let Err(e) = self.backend.delete_week(&week.id).await {
                tracing::warn!(month_id, week_id = %week.id, error = %e, "Failed to delete week");
            }
        }

        self.backend.delete_month(month_id).await
    }

    /// Delete one day, and its week when that was the week's last day.
    pub async fn remove_day(
        &self,
        month_id: &str,
        week_id: &str,
        day_id: &str,
    ) -> Result<(), AppError> {
        let month = self.backend.get_month(month_id).await?;
        let week = month.week(week_id).ok_or_else(|| {
            AppError::NotFound(format!("Week {} is not part of month {}", week_id, month_id))
        })?;
        if !week.days.iter().any(|d| d.id == day_id) {
            return Err(AppError::NotFound(format!(
                "Day {} is not part of week {}",
                day_id, week_id
            )));
        }
        let days_in_week = week.days.len();

        self.backend.delete_day(day_id).await?;

        if days_in_week <= 1 {
            tracing::info!(month_id, week_id, "Deleting empty week");
            if let Err(e) = self.backend.delete_week(week_id).await {
                tracing::warn!(month_id, week_id, error = %e, "Failed to delete empty week");
            }
        }
        Ok(())
    }

    async fn delete_day_idempotent(&self, day_id: &str) -> Result<(), AppError> {
        match self.backend.delete_day(day_id).await {
            Err(e) if e.is_not_found() => {
                tracing::debug!(day_id, "Day already removed");
                Ok(())
            }
            other => other,
        }
    }
}
