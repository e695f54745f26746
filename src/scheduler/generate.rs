use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde::Serialize;

use crate::models::Schedule;

const MS_PER_HOUR: i64 = 3_600_000;

/// One concrete, timestamped dose instance predicted by a schedule.
///
/// Derived on every read, never persisted. `dose_time` is the RFC 3339 UTC
/// millisecond rendering of `time` and, together with `schedule_id`, is the
/// occurrence's identity when matching taken doses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub med_name: String,
    pub schedule_id: String,
    pub dose_time: String,
    pub time: DateTime<Utc>,
}

/// Expand `schedule` into the ordered occurrences in `[start_time, horizon_end]`
/// that fall at or after `now`, honoring the weekday filter.
///
/// All interval arithmetic is integer milliseconds; `frequency` hours convert
/// exactly, so there is no drift across many periods. Elapsed ticks between
/// `start_time` and `now` are skipped in O(1) rather than enumerated — with a
/// years-old anchor the walk still starts at the first tick at/after `now`.
///
/// The weekday filter applies *after* the interval walk: a schedule can tick
/// on a day outside `days`, and that tick is skipped, not re-anchored, so raw
/// inter-dose spacing stays uniform. An empty `days` therefore yields an
/// empty result, as does an anchor beyond `horizon_end`.
///
/// `frequency == 0` is a contract violation on a persisted schedule; the
/// record is validated before it ever reaches this point.
pub fn generate(
    schedule: &Schedule,
    med_name: &str,
    now: DateTime<Utc>,
    horizon_end: DateTime<Utc>,
) -> Vec<Occurrence> {
    debug_assert!(schedule.frequency > 0, "schedule frequency must be positive");
    if schedule.frequency == 0 {
        return Vec::new();
    }

    let interval = i64::from(schedule.frequency) * MS_PER_HOUR;
    let now_ms = now.timestamp_millis();
    let horizon_ms = horizon_end.timestamp_millis();

    // Roll-forward: land on the first raw tick at/after now without walking
    // the elapsed ticks one by one. Integer division truncates, so one more
    // step may be needed.
    let mut t = schedule.start_time.timestamp_millis();
    if t < now_ms {
        t += (now_ms - t) / interval * interval;
        if t < now_ms {
            t += interval;
        }
    }

    let mut occurrences = Vec::new();
    while t <= horizon_ms {
        let Some(time) = DateTime::<Utc>::from_timestamp_millis(t) else {
            break;
        };
        let weekday = time.weekday().num_days_from_sunday() as u8;
        if schedule.days.contains(&weekday) {
            occurrences.push(Occurrence {
                med_name: med_name.to_string(),
                schedule_id: schedule.id.clone(),
                dose_time: time.to_rfc3339_opts(SecondsFormat::Millis, true),
                time,
            });
        }
        t += interval;
    }

    occurrences
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn schedule(frequency: u32, days: Vec<u8>, start: DateTime<Utc>) -> Schedule {
        Schedule {
            id: "s1".into(),
            med_id: "m1".into(),
            frequency,
            start_time: start,
            days,
        }
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn raw_tick_count_is_inclusive_of_horizon() {
        // 24h window at 8h frequency, anchored at now: ticks at 0h, 8h, 16h, 24h
        let start = at(2023, 1, 15, 8, 0);
        let s = schedule(8, vec![0, 1, 2, 3, 4, 5, 6], start);
        let occ = generate(&s, "med", start, start + Duration::hours(24));
        assert_eq!(occ.len(), 4);
        assert_eq!(occ[0].time, start);
        assert_eq!(occ[3].time, start + Duration::hours(24));
    }

    #[test]
    fn raw_ticks_are_uniformly_spaced() {
        let start = at(2023, 1, 15, 8, 0);
        let s = schedule(6, vec![0, 1, 2, 3, 4, 5, 6], start);
        let occ = generate(&s, "med", start, start + Duration::hours(48));
        for pair in occ.windows(2) {
            assert_eq!(pair[1].time - pair[0].time, Duration::hours(6));
        }
    }

    #[test]
    fn roll_forward_lands_on_first_tick_at_or_after_now() {
        // Anchor 2023-01-15T08:00Z, every 8h, now 10:30 → first raw tick 16:00.
        let start = at(2023, 1, 15, 8, 0);
        let now = at(2023, 1, 15, 10, 30);
        let s = schedule(8, vec![0, 1, 2, 3, 4, 5, 6], start);
        let occ = generate(&s, "med", now, now + Duration::hours(24));
        assert_eq!(occ[0].dose_time, "2023-01-15T16:00:00.000Z");
        assert_eq!(occ[1].dose_time, "2023-01-16T00:00:00.000Z");
    }

    #[test]
    fn roll_forward_exact_tick_is_included() {
        // When now lands exactly on a tick, that tick is the first occurrence.
        let start = at(2023, 1, 15, 8, 0);
        let now = at(2023, 1, 16, 0, 0);
        let s = schedule(8, vec![0, 1, 2, 3, 4, 5, 6], start);
        let occ = generate(&s, "med", now, now + Duration::hours(24));
        assert_eq!(occ[0].time, now);
    }

    #[test]
    fn weekday_filter_skips_ticks_without_reanchoring() {
        // 2023-01-15 is a Sunday (weekday 0). Mon-Fri filter drops Sunday's
        // 16:00 tick; the first emitted occurrences are Monday's, still on
        // the original 8h grid.
        let start = at(2023, 1, 15, 8, 0);
        let now = at(2023, 1, 15, 10, 30);
        let s = schedule(8, vec![1, 2, 3, 4, 5], start);
        let occ = generate(&s, "med", now, now + Duration::hours(24));
        assert_eq!(occ[0].dose_time, "2023-01-16T00:00:00.000Z");
        assert_eq!(occ[1].dose_time, "2023-01-16T08:00:00.000Z");
    }

    #[test]
    fn empty_days_yields_empty_sequence() {
        let start = at(2023, 1, 15, 8, 0);
        let s = schedule(8, vec![], start);
        let occ = generate(&s, "med", start, start + Duration::hours(24));
        assert!(occ.is_empty());
    }

    #[test]
    fn future_anchor_beyond_horizon_yields_empty_sequence() {
        let now = at(2023, 1, 15, 8, 0);
        let s = schedule(8, vec![0, 1, 2, 3, 4, 5, 6], now + Duration::days(30));
        let occ = generate(&s, "med", now, now + Duration::hours(24));
        assert!(occ.is_empty());
    }

    #[test]
    fn roll_forward_across_years_is_fast_and_correct() {
        // 400 days elapsed at a 7h interval. O(1) roll-forward means this
        // completes instantly; the first occurrence is the smallest tick >= now.
        let start = at(2022, 1, 1, 8, 0);
        let now = start + Duration::days(400) + Duration::minutes(17);
        let s = schedule(7, vec![0, 1, 2, 3, 4, 5, 6], start);

        let began = std::time::Instant::now();
        let occ = generate(&s, "med", now, now + Duration::hours(24));
        assert!(began.elapsed() < std::time::Duration::from_millis(50));

        assert!(!occ.is_empty());
        let first = occ[0].time;
        assert!(first >= now);
        assert!(first - now < Duration::hours(7));
        // On the original grid: whole number of intervals from the anchor
        assert_eq!((first - start).num_milliseconds() % (7 * 3_600_000), 0);
    }

    #[test]
    fn generation_is_idempotent() {
        let start = at(2023, 1, 15, 8, 0);
        let now = at(2023, 3, 2, 11, 45);
        let s = schedule(5, vec![2, 4], start);
        let a = generate(&s, "med", now, now + Duration::hours(24));
        let b = generate(&s, "med", now, now + Duration::hours(24));
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.dose_time, y.dose_time);
        }
    }

    #[test]
    fn dose_time_has_millisecond_precision_and_z_suffix() {
        let start = at(2023, 1, 15, 8, 0);
        let s = schedule(8, vec![0], start);
        let occ = generate(&s, "med", start, start + Duration::hours(1));
        assert_eq!(occ[0].dose_time, "2023-01-15T08:00:00.000Z");
    }
}
