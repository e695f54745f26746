use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Confirmation that one concrete dose occurrence was taken.
///
/// `dose_time` is kept as the exact RFC 3339 millisecond string the
/// occurrence generator produced — together with `schedule_id` it is the
/// occurrence's identity, and matching is exact string equality, never a
/// tolerance window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakenDose {
    pub id: String,
    pub schedule_id: String,
    pub dose_time: String,
    /// When the user confirmed the dose. Server-assigned.
    pub taken_at: DateTime<Utc>,
}
