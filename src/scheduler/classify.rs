use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::TakenDose;
use crate::scheduler::Occurrence;

/// Window after `now` during which an occurrence counts as due right now.
pub const DUE_NOW_WINDOW_MS: i64 = 15 * 60 * 1000;

/// Time bucket of an occurrence relative to "now", in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    Overdue,
    DueNow,
    LaterToday,
    Tomorrow,
}

/// An occurrence annotated with its taken state and bucket.
///
/// `taken_id` carries the id of the matching taken record so a caller can
/// unmark the dose by deleting it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedDose {
    #[serde(flatten)]
    pub occurrence: Occurrence,
    pub taken: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taken_id: Option<String>,
    #[serde(skip)]
    pub bucket: Bucket,
}

/// Annotate each occurrence with its taken state and time bucket.
///
/// Matching is exact: a taken record marks an occurrence iff its
/// `schedule_id` matches and its `dose_time` string is byte-equal — a
/// one-millisecond difference does not match. When duplicate taken records
/// exist for one occurrence, the first found wins.
///
/// Occurrences beyond tomorrow (bounded anyway by the generator's horizon)
/// are dropped from the result.
pub fn classify(
    occurrences: &[Occurrence],
    now: DateTime<Utc>,
    taken: &[TakenDose],
) -> Vec<ClassifiedDose> {
    occurrences
        .iter()
        .filter_map(|occ| {
            let bucket = bucket_for(occ.time, now)?;
            let matched = taken.iter().find(|t| {
                t.schedule_id == occ.schedule_id && t.dose_time == occ.dose_time
            });
            Some(ClassifiedDose {
                occurrence: occ.clone(),
                taken: matched.is_some(),
                taken_id: matched.map(|t| t.id.clone()),
                bucket,
            })
        })
        .collect()
}

/// Bucket an instant relative to `now`, or `None` if it falls outside the
/// surfaced window. Evaluated strictly in precedence order: an occurrence
/// exactly at `now` is due-now (not overdue), and one exactly fifteen
/// minutes out is due-now (not later-today).
fn bucket_for(time: DateTime<Utc>, now: DateTime<Utc>) -> Option<Bucket> {
    let diff = time.timestamp_millis() - now.timestamp_millis();
    if diff < 0 {
        return Some(Bucket::Overdue);
    }
    if diff <= DUE_NOW_WINDOW_MS {
        return Some(Bucket::DueNow);
    }
    let today = now.date_naive();
    if time.date_naive() == today {
        return Some(Bucket::LaterToday);
    }
    if time.date_naive() == today + Duration::days(1) {
        return Some(Bucket::Tomorrow);
    }
    None
}
