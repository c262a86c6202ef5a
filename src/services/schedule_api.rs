// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Schedule backend API client.
//!
//! Handles:
//! - Month listing and lookup with nested weeks/days
//! - Month, week and day create/update/delete
//! - Batch week/day generation from a list of dates
//! - Response envelope unwrapping and status mapping

use crate::config::Config;
use crate::error::AppError;
use crate::models::{ApiEnvelope, DayForm, GenerateWeeksDays, Month, MonthForm, WeekForm};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Operations the editor needs from the schedule backend.
#[async_trait]
pub trait ScheduleBackend: Send + Sync {
    async fn list_months(&self) -> Result<Vec<Month>, AppError>;

    async fn get_month(&self, month_id: &str) -> Result<Month, AppError>;

    async fn create_month(&self, form: &MonthForm) -> Result<Month, AppError>;

    async fn update_month(&self, month_id: &str, form: &MonthForm) -> Result<Month, AppError>;

    async fn delete_month(&self, month_id: &str) -> Result<(), AppError>;

    async fn add_week(&self, month_id: &str, form: &WeekForm) -> Result<(), AppError>;

    async fn add_day(&self, month_id: &str, form: &DayForm) -> Result<(), AppError>;

    async fn delete_week(&self, week_id: &str) -> Result<(), AppError>;

    async fn delete_day(&self, day_id: &str) -> Result<(), AppError>;

    async fn generate_weeks_days(&self, body: &GenerateWeeksDays) -> Result<(), AppError>;
}

/// HTTP client for the schedule backend.
#[derive(Clone)]
pub struct ScheduleClient {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl ScheduleClient {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.schedule_api_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            http,
            base_url: config.schedule_api_url.trim_end_matches('/').to_string(),
            api_token: config.schedule_api_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.http.request(method, self.url(path));
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and unwrap the `data` field of the envelope.
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::ScheduleApi(e.to_string()))?;
        let response = Self::check_response(response).await?;

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| AppError::ScheduleApi(format!("JSON parse error: {}", e)))?;

        if !envelope.success {
            return Err(AppError::ScheduleApi(
                envelope
                    .message
                    .unwrap_or_else(|| "Request was not successful".to_string()),
            ));
        }

        envelope
            .data
            .ok_or_else(|| AppError::ScheduleApi("Response is missing data".to_string()))
    }

    /// Send a request whose body is irrelevant beyond the success flag.
    async fn send_empty(&self, request: RequestBuilder) -> Result<(), AppError> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::ScheduleApi(e.to_string()))?;
        let response = Self::check_response(response).await?;

        let body = response.text().await.unwrap_or_default();
        if body.trim().is_empty() {
            return Ok(());
        }

        // Non-JSON bodies on a 2xx are accepted as-is.
        if let Ok(envelope) = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body) {
            if !envelope.success {
                return Err(AppError::ScheduleApi(
                    envelope
                        .message
                        .unwrap_or_else(|| "Request was not successful".to_string()),
                ));
            }
        }
        Ok(())
    }

    /// Check response status and return error if not successful.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(url));
        }

        Err(AppError::ScheduleApi(format!("HTTP {}: {}", status, body)))
    }
}

fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[async_trait]
impl ScheduleBackend for ScheduleClient {
    async fn list_months(&self) -> Result<Vec<Month>, AppError> {
        self.send_json(self.request(Method::GET, "months")).await
    }

    async fn get_month(&self, month_id: &str) -> Result<Month, AppError> {
        let path = format!("months/{}", segment(month_id));
        self.send_json(self.request(Method::GET, &path)).await
    }

    async fn create_month(&self, form: &MonthForm) -> Result<Month, AppError> {
        self.send_json(self.request(Method::POST, "months").json(form))
            .await
    }

    async fn update_month(&self, month_id: &str, form: &MonthForm) -> Result<Month, AppError> {
        let path = format!("months/{}", segment(month_id));
        self.send_json(self.request(Method::PUT, &path).json(form))
            .await
    }

    async fn delete_month(&self, month_id: &str) -> Result<(), AppError> {
        let path = format!("months/{}", segment(month_id));
        self.send_empty(self.request(Method::DELETE, &path)).await
    }

    async fn add_week(&self, month_id: &str, form: &WeekForm) -> Result<(), AppError> {
        let path = format!("months/{}/add-week", segment(month_id));
        self.send_empty(self.request(Method::POST, &path).json(form))
            .await
    }

    async fn add_day(&self, month_id: &str, form: &DayForm) -> Result<(), AppError> {
        let path = format!("months/{}/add-day", segment(month_id));
        self.send_empty(self.request(Method::POST, &path).json(form))
            .await
    }

    async fn delete_week(&self, week_id: &str) -> Result<(), AppError> {
        let path = format!("weeks/{}", segment(week_id));
        self.send_empty(self.request(Method::DELETE, &path)).await
    }

    async fn delete_day(&self, day_id: &str) -> Result<(), AppError> {
        let path = format!("days/{}", segment(day_id));
        self.send_empty(self.request(Method::DELETE, &path)).await
    }

    async fn generate_weeks_days(&self, body: &GenerateWeeksDays) -> Result<(), AppError> {
        self.send_empty(
            self.request(Method::POST, "months/generate-weeks-days")
                .json(body),
        )
        .await
    }
}
