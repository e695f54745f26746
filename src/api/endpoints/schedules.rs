//! Schedule CRUD endpoints.
//!
//! All validation happens here, before any persistence call, so the
//! occurrence generator only ever sees well-formed records.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, NaiveTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::Schedule;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub med_id: String,
    pub frequency: i64,
    pub days: Vec<i64>,
    /// RFC 3339. Defaults to today 08:00 UTC when omitted.
    pub start_time: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
    pub med_id: String,
    pub frequency: i64,
    pub days: Vec<i64>,
}

/// `GET /api/schedules` — all schedules.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Schedule>>, ApiError> {
    let conn = ctx.lock_db()?;
    let schedules = repository::list_schedules(&conn)?;
    Ok(Json(schedules))
}

/// `POST /api/schedules` — create a schedule.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<Schedule>), ApiError> {
    let med_id = validate_med_id(&request.med_id)?;
    let frequency = validate_frequency(request.frequency)?;
    let days = validate_days(&request.days)?;
    let start_time = match &request.start_time {
        Some(raw) => parse_rfc3339("startTime", raw)?,
        None => default_start_time(Utc::now()),
    };

    let schedule = Schedule {
        id: Uuid::new_v4().to_string(),
        med_id,
        frequency,
        start_time,
        days,
    };

    let conn = ctx.lock_db()?;
    repository::insert_schedule(&conn, &schedule)?;

    Ok((StatusCode::CREATED, Json(schedule)))
}

/// `PUT /api/schedules/:id` — replace `medId`, `frequency` and `days`.
/// The `startTime` anchor is fixed at creation and never recomputed.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Json(request): Json<UpdateScheduleRequest>,
) -> Result<Json<Schedule>, ApiError> {
    let med_id = validate_med_id(&request.med_id)?;
    let frequency = validate_frequency(request.frequency)?;
    let days = validate_days(&request.days)?;

    let conn = ctx.lock_db()?;
    let schedule = repository::update_schedule(&conn, &id, &med_id, frequency, &days)?;
    Ok(Json(schedule))
}

/// `DELETE /api/schedules/:id`
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let conn = ctx.lock_db()?;
    repository::delete_schedule(&conn, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// First anchor dose when the caller doesn't supply one: today at 08:00
/// in the service's single wall-clock reference (UTC).
pub(crate) fn default_start_time(now: DateTime<Utc>) -> DateTime<Utc> {
    let eight = NaiveTime::from_hms_opt(8, 0, 0).expect("valid time of day");
    now.date_naive().and_time(eight).and_utc()
}

fn validate_med_id(med_id: &str) -> Result<String, ApiError> {
    if med_id.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing 'medId'".into()));
    }
    Ok(med_id.to_string())
}

fn validate_frequency(frequency: i64) -> Result<u32, ApiError> {
    if frequency < 1 {
        return Err(ApiError::BadRequest(
            "'frequency' must be a positive number of hours".into(),
        ));
    }
    u32::try_from(frequency)
        .map_err(|_| ApiError::BadRequest("'frequency' is out of range".into()))
}

fn validate_days(days: &[i64]) -> Result<Vec<u8>, ApiError> {
    // An empty list is accepted: the schedule simply never fires.
    days.iter()
        .map(|&d| {
            if (0..=6).contains(&d) {
                Ok(d as u8)
            } else {
                Err(ApiError::BadRequest(
                    "'days' entries must be weekday indices 0-6".into(),
                ))
            }
        })
        .collect()
}

pub(crate) fn parse_rfc3339(field: &str, raw: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ApiError::BadRequest(format!("'{field}' is not a valid RFC 3339 timestamp")))
}
