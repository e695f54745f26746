//! Taken-dose endpoints: mark (create) and unmark (delete).
//!
//! These are the toggle operations behind the dose view. Marking stores
//! the occurrence's exact `doseTime` string; unmarking deletes by the
//! record id the classifier reported in `takenId`. Both are one-shot
//! writes — a failed insert or delete leaves no partial state behind.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::endpoints::schedules::parse_rfc3339;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::TakenDose;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTakenRequest {
    pub schedule_id: String,
    pub dose_time: String,
}

/// `GET /api/taken` — all taken-dose records.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<TakenDose>>, ApiError> {
    let conn = ctx.lock_db()?;
    let records = repository::list_taken(&conn)?;
    Ok(Json(records))
}

/// `POST /api/taken` — confirm a dose occurrence as taken.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(request): Json<CreateTakenRequest>,
) -> Result<(StatusCode, Json<TakenDose>), ApiError> {
    if request.schedule_id.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing 'scheduleId'".into()));
    }
    // The string itself is stored verbatim as the occurrence identity;
    // parsing only checks it is a real timestamp.
    parse_rfc3339("doseTime", &request.dose_time)?;

    let taken = TakenDose {
        id: Uuid::new_v4().to_string(),
        schedule_id: request.schedule_id,
        dose_time: request.dose_time,
        taken_at: Utc::now(),
    };

    let conn = ctx.lock_db()?;
    repository::insert_taken(&conn, &taken)?;

    Ok((StatusCode::CREATED, Json(taken)))
}

/// `DELETE /api/taken/:id` — unmark a previously confirmed dose.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let conn = ctx.lock_db()?;
    repository::delete_taken(&conn, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
