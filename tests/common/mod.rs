// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use tower::ServiceExt;
use training_schedule::config::Config;
use training_schedule::error::AppError;
use training_schedule::models::{
    CalendarDate, Day, DayForm, GenerateWeeksDays, Month, MonthForm, Week, WeekForm,
};
use training_schedule::routes::create_router;
use training_schedule::services::{EditorRegistry, ScheduleBackend, ScheduleService};
use training_schedule::AppState;

/// Backend call as seen by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Call {
    ListMonths,
    GetMonth(String),
    CreateMonth(String),
    UpdateMonth(String),
    DeleteMonth(String),
    AddWeek(String),
    AddDay(String),
    DeleteWeek(String),
    DeleteDay(String),
    Generate(GenerateWeeksDays),
}

/// In-memory schedule backend that records every call.
#[derive(Default)]
pub struct FakeBackend {
    months: Mutex<BTreeMap<String, Month>>,
    calls: Mutex<Vec<Call>>,
    failing_days: Mutex<HashSet<String>>,
    fail_generate: AtomicBool,
    fail_week_deletes: AtomicBool,
    panic_generate: AtomicBool,
    generate_gate: Mutex<Option<GenerateGate>>,
    next_id: AtomicUsize,
}

/// Holds generate calls until released.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct GenerateGate {
    /// Notified when a generate call reaches the gate
    pub entered: Arc<Notify>,
    /// Notify to let the held call continue
    pub release: Arc<Notify>,
}

#[allow(dead_code)]
impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_months(months: Vec<Month>) -> Arc<Self> {
        let backend = Self::default();
        {
            let mut map = backend.months.lock().unwrap();
            for month in months {
                map.insert(month.id.clone(), month);
            }
        }
        Arc::new(backend)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Calls other than reads.
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::GetMonth(_) | Call::ListMonths))
            .collect()
    }

    pub fn month(&self, id: &str) -> Option<Month> {
        self.months.lock().unwrap().get(id).cloned()
    }

    pub fn fail_day(&self, day_id: &str) {
        self.failing_days.lock().unwrap().insert(day_id.to_string());
    }

    pub fn set_fail_generate(&self, fail: bool) {
        self.fail_generate.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_week_deletes(&self, fail: bool) {
        self.fail_week_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn set_panic_generate(&self, panic: bool) {
        self.panic_generate.store(panic, Ordering::SeqCst);
    }

    /// Make the next generate calls wait on the returned gate.
    pub fn hold_generate(&self) -> GenerateGate {
        let gate = GenerateGate::default();
        *self.generate_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn fresh_id(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl ScheduleBackend for FakeBackend {
    async fn list_months(&self) -> Result<Vec<Month>, AppError> {
        self.record(Call::ListMonths);
        Ok(self.months.lock().unwrap().values().cloned().collect())
    }

    async fn get_month(&self, month_id: &str) -> Result<Month, AppError> {
        self.record(Call::GetMonth(month_id.to_string()));
        self.month(month_id)
            .ok_or_else(|| AppError::NotFound(format!("/months/{}", month_id)))
    }

    async fn create_month(&self, form: &MonthForm) -> Result<Month, AppError> {
        self.record(Call::CreateMonth(form.name.clone()));
        let month = Month {
            id: self.fresh_id("month-"),
            name: form.name.clone(),
            month_number: form.month_number,
            year: form.year,
            weeks: Vec::new(),
        };
        self.months
            .lock()
            .unwrap()
            .insert(month.id.clone(), month.clone());
        Ok(month)
    }

    async fn update_month(&self, month_id: &str, form: &MonthForm) -> Result<Month, AppError> {
        self.record(Call::UpdateMonth(month_id.to_string()));
        let mut months = self.months.lock().unwrap();
        let month = months
            .get_mut(month_id)
            .ok_or_else(|| AppError::NotFound(month_id.to_string()))?;
        month.name = form.name.clone();
        month.month_number = form.month_number;
        month.year = form.year;
        Ok(month.clone())
    }

    async fn delete_month(&self, month_id: &str) -> Result<(), AppError> {
        self.record(Call::DeleteMonth(month_id.to_string()));
        self.months
            .lock()
            .unwrap()
            .remove(month_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(month_id.to_string()))
    }

    async fn add_week(&self, month_id: &str, form: &WeekForm) -> Result<(), AppError> {
        self.record(Call::AddWeek(month_id.to_string()));
        let id = self.fresh_id("week-");
        let mut months = self.months.lock().unwrap();
        let month = months
            .get_mut(month_id)
            .ok_or_else(|| AppError::NotFound(month_id.to_string()))?;
        month.weeks.push(Week {
            id,
            week_number: Some(form.week_number),
            start_date: Some(form.start_date.clone()),
            end_date: Some(form.end_date.clone()),
            days: Vec::new(),
        });
        Ok(())
    }

    async fn add_day(&self, month_id: &str, form: &DayForm) -> Result<(), AppError> {
        self.record(Call::AddDay(month_id.to_string()));
        let id = self.fresh_id("day-");
        let mut months = self.months.lock().unwrap();
        let week = months
            .get_mut(month_id)
            .and_then(|m| m.weeks.iter_mut().find(|w| w.id == form.week_id))
            .ok_or_else(|| AppError::NotFound(form.week_id.clone()))?;
        week.days.push(Day {
            id,
            day_number: Some(form.day_number),
            date: form.date.clone(),
        });
        Ok(())
    }

    async fn delete_week(&self, week_id: &str) -> Result<(), AppError> {
        self.record(Call::DeleteWeek(week_id.to_string()));
        if self.fail_week_deletes.load(Ordering::SeqCst) {
            return Err(AppError::ScheduleApi("HTTP 500: week delete failed".to_string()));
        }
        let mut months = self.months.lock().unwrap();
        for month in months.values_mut() {
            if let Some(pos) = month.weeks.iter().position(|w| w.id == week_id) {
                month.weeks.remove(pos);
                return Ok(());
            }
        }
        Err(AppError::NotFound(week_id.to_string()))
    }

    async fn delete_day(&self, day_id: &str) -> Result<(), AppError> {
        self.record(Call::DeleteDay(day_id.to_string()));
        if self.failing_days.lock().unwrap().contains(day_id) {
            return Err(AppError::ScheduleApi("HTTP 500: day delete failed".to_string()));
        }
        let mut months = self.months.lock().unwrap();
        for month in months.values_mut() {
            for week in &mut month.weeks {
                if let Some(pos) = week.days.iter().position(|d| d.id == day_id) {
                    week.days.remove(pos);
                    return Ok(());
                }
            }
        }
        Err(AppError::NotFound(day_id.to_string()))
    }

    async fn generate_weeks_days(&self, body: &GenerateWeeksDays) -> Result<(), AppError> {
        self.record(Call::Generate(body.clone()));
        let gate = self.generate_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        if self.panic_generate.load(Ordering::SeqCst) {
            panic!("generate blew up");
        }
        if self.fail_generate.load(Ordering::SeqCst) {
            return Err(AppError::ScheduleApi("HTTP 500: generate failed".to_string()));
        }

        let mut months = self.months.lock().unwrap();
        let month = months
            .get_mut(&body.month_id)
            .ok_or_else(|| AppError::NotFound(body.month_id.clone()))?;
        for raw in &body.dates {
            let date = CalendarDate::parse_api(raw)
                .map_err(|e| AppError::ScheduleApi(e.to_string()))?;
            let week_id = format!("{}-week-{}", month.id, week_of_month(date));
            let day_id = format!("{}-day-{}", month.id, date.day());
            let week = match month.weeks.iter().position(|w| w.id == week_id) {
                Some(pos) => &mut month.weeks[pos],
                None => {
                    month.weeks.push(Week {
                        id: week_id.clone(),
                        week_number: Some(week_of_month(date)),
                        start_date: None,
                        end_date: None,
                        days: Vec::new(),
                    });
                    month.weeks.last_mut().unwrap()
                }
            };
            if !week.days.iter().any(|d| d.id == day_id) {
                week.days.push(Day {
                    id: day_id,
                    day_number: None,
                    date: format!("{}T00:00:00.000Z", date),
                });
            }
        }
        Ok(())
    }
}

/// Sunday-first row of the month grid, 1-based.
pub fn week_of_month(date: CalendarDate) -> u32 {
    let offset = date.first_of_month().weekday().num_days_from_sunday();
    (date.day() + offset - 1) / 7 + 1
}

/// Build a month whose days are grouped into Sunday-first weeks, with ids
/// `{id}-day-{n}` and `{id}-week-{row}`.
#[allow(dead_code)]
pub fn month_with_days(id: &str, year: i32, month_number: u32, days: &[u32]) -> Month {
    let mut weeks: Vec<Week> = Vec::new();
    for &day in days {
        let date = CalendarDate::new(year, month_number, day).expect("valid test date");
        let week_id = format!("{}-week-{}", id, week_of_month(date));
        let pos = match weeks.iter().position(|w| w.id == week_id) {
            Some(pos) => pos,
            None => {
                weeks.push(Week {
                    id: week_id,
                    week_number: Some(week_of_month(date)),
                    start_date: None,
                    end_date: None,
                    days: Vec::new(),
                });
                weeks.len() - 1
            }
        };
        weeks[pos].days.push(Day {
            id: format!("{}-day-{}", id, day),
            day_number: None,
            date: format!("{}T00:00:00.000Z", date),
        });
    }

    Month {
        id: id.to_string(),
        name: format!("Month {}", month_number),
        month_number,
        year,
        weeks,
    }
}

/// Create a test app backed by the given fake.
#[allow(dead_code)]
pub fn create_test_app(backend: Arc<FakeBackend>) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        schedule: ScheduleService::new(backend),
        editors: EditorRegistry::new(),
    });
    (create_router(state.clone()), state)
}

/// Send one JSON request through the router.
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
