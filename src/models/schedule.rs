use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recurrence rule for one medication: a fixed hour interval anchored at
/// `start_time`, filtered to the allowed weekdays.
///
/// `days` uses 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: String,
    pub med_id: String,
    /// Hours between doses. Always >= 1 for a persisted record.
    pub frequency: u32,
    /// Anchor for the first dose. Fixed at creation, never recomputed.
    pub start_time: DateTime<Utc>,
    pub days: Vec<u8>,
}
