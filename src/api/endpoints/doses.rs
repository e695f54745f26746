//! The dose view: every schedule's occurrences over the next 24 hours,
//! reconciled against taken records and grouped by time bucket.
//!
//! Recomputed from a fresh snapshot of all three collections on every
//! request — no cache, no staleness.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::api::endpoints::schedules::parse_rfc3339;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::scheduler::{classify, generate, Bucket, ClassifiedDose};

#[derive(Deserialize)]
pub struct DosesQuery {
    /// RFC 3339 override of "now", for deterministic clients and tests.
    pub now: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DosesResponse {
    pub overdue: Vec<ClassifiedDose>,
    pub due_now: Vec<ClassifiedDose>,
    pub later_today: Vec<ClassifiedDose>,
    pub tomorrow: Vec<ClassifiedDose>,
    pub generated_at: String,
}

/// `GET /api/doses[?now=..]` — classified dose occurrences for the next 24h.
pub async fn upcoming(
    State(ctx): State<ApiContext>,
    Query(query): Query<DosesQuery>,
) -> Result<Json<DosesResponse>, ApiError> {
    let now: DateTime<Utc> = match &query.now {
        Some(raw) => parse_rfc3339("now", raw)?,
        None => Utc::now(),
    };
    let horizon_end = now + Duration::hours(24);

    // One consistent snapshot of all three collections before classifying.
    let (meds, schedules, taken) = {
        let conn = ctx.lock_db()?;
        (
            repository::list_medications(&conn)?,
            repository::list_schedules(&conn)?,
            repository::list_taken(&conn)?,
        )
    };

    let mut occurrences = Vec::new();
    for schedule in &schedules {
        // A schedule can outlive its medication; fall back to the raw id.
        let med_name = meds
            .iter()
            .find(|m| m.id == schedule.med_id)
            .map(|m| m.name.as_str())
            .unwrap_or(schedule.med_id.as_str());
        occurrences.extend(generate(schedule, med_name, now, horizon_end));
    }
    occurrences.sort_by(|a, b| {
        a.time
            .cmp(&b.time)
            .then_with(|| a.schedule_id.cmp(&b.schedule_id))
    });

    let classified = classify(&occurrences, now, &taken);

    let mut response = DosesResponse {
        overdue: Vec::new(),
        due_now: Vec::new(),
        later_today: Vec::new(),
        tomorrow: Vec::new(),
        generated_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    for dose in classified {
        match dose.bucket {
            Bucket::Overdue => response.overdue.push(dose),
            Bucket::DueNow => response.due_now.push(dose),
            Bucket::LaterToday => response.later_today.push(dose),
            Bucket::Tomorrow => response.tomorrow.push(dose),
        }
    }

    Ok(Json(response))
}
