//! Medication CRUD endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::Medication;

#[derive(Deserialize)]
pub struct MedicationRequest {
    pub name: String,
}

/// `GET /api/meds` — all medications.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Medication>>, ApiError> {
    let conn = ctx.lock_db()?;
    let meds = repository::list_medications(&conn)?;
    Ok(Json(meds))
}

/// `POST /api/meds` — create a medication.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(request): Json<MedicationRequest>,
) -> Result<(StatusCode, Json<Medication>), ApiError> {
    let name = validate_name(&request.name)?;

    let med = Medication {
        id: Uuid::new_v4().to_string(),
        name,
    };

    let conn = ctx.lock_db()?;
    repository::insert_medication(&conn, &med)?;

    Ok((StatusCode::CREATED, Json(med)))
}

/// `PUT /api/meds/:id` — rename a medication.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Json(request): Json<MedicationRequest>,
) -> Result<Json<Medication>, ApiError> {
    let name = validate_name(&request.name)?;

    let conn = ctx.lock_db()?;
    let med = repository::update_medication(&conn, &id, &name)?;
    Ok(Json(med))
}

/// `DELETE /api/meds/:id`
///
/// Schedules referring to this medication are left in place; the dose view
/// falls back to showing the raw medication id for them.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let conn = ctx.lock_db()?;
    repository::delete_medication(&conn, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

fn validate_name(name: &str) -> Result<String, ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest("Missing 'name'".into()));
    }
    Ok(trimmed.to_string())
}
