use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::Schedule;

pub fn insert_schedule(conn: &Connection, schedule: &Schedule) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO schedules (id, med_id, frequency, start_time, days)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            schedule.id,
            schedule.med_id,
            schedule.frequency,
            format_timestamp(&schedule.start_time),
            days_to_json(&schedule.days),
        ],
    )?;
    Ok(())
}

pub fn list_schedules(conn: &Connection) -> Result<Vec<Schedule>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT id, med_id, frequency, start_time, days FROM schedules")?;

    let rows = stmt.query_map([], |row| Ok(schedule_row(row)))?;

    let mut schedules = Vec::new();
    for row in rows {
        schedules.push(schedule_from_row(row??)?);
    }
    Ok(schedules)
}

pub fn get_schedule(conn: &Connection, id: &str) -> Result<Option<Schedule>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, med_id, frequency, start_time, days FROM schedules WHERE id = ?1",
            params![id],
            |row| Ok(schedule_row(row)),
        )
        .optional()?;

    match row {
        Some(row) => Ok(Some(schedule_from_row(row?)?)),
        None => Ok(None),
    }
}

/// Wholesale replacement of `med_id`, `frequency` and `days`. The anchor
/// `start_time` is fixed at creation and preserved across updates.
pub fn update_schedule(
    conn: &Connection,
    id: &str,
    med_id: &str,
    frequency: u32,
    days: &[u8],
) -> Result<Schedule, DatabaseError> {
    let changed = conn.execute(
        "UPDATE schedules SET med_id = ?2, frequency = ?3, days = ?4 WHERE id = ?1",
        params![id, med_id, frequency, days_to_json(days)],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "schedule".into(),
            id: id.into(),
        });
    }
    get_schedule(conn, id)?.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "schedule".into(),
        id: id.into(),
    })
}

pub fn delete_schedule(conn: &Connection, id: &str) -> Result<(), DatabaseError> {
    let changed = conn.execute("DELETE FROM schedules WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "schedule".into(),
            id: id.into(),
        });
    }
    Ok(())
}

/// Timestamps are stored as RFC 3339 UTC millisecond strings, the same
/// shape they travel in on the wire.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn parse_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DatabaseError::MalformedColumn {
            column: column.into(),
            value: value.into(),
        })
}

fn days_to_json(days: &[u8]) -> String {
    serde_json::to_string(days).unwrap_or_else(|_| "[]".into())
}

// Internal row type, coerced into the typed record in one place
struct ScheduleRow {
    id: String,
    med_id: String,
    frequency: u32,
    start_time: String,
    days: String,
}

fn schedule_row(row: &rusqlite::Row<'_>) -> Result<ScheduleRow, rusqlite::Error> {
    Ok(ScheduleRow {
        id: row.get(0)?,
        med_id: row.get(1)?,
        frequency: row.get(2)?,
        start_time: row.get(3)?,
        days: row.get(4)?,
    })
}

fn schedule_from_row(row: ScheduleRow) -> Result<Schedule, DatabaseError> {
    let days: Vec<u8> =
        serde_json::from_str(&row.days).map_err(|_| DatabaseError::MalformedColumn {
            column: "days".into(),
            value: row.days.clone(),
        })?;
    Ok(Schedule {
        start_time: parse_timestamp("start_time", &row.start_time)?,
        id: row.id,
        med_id: row.med_id,
        frequency: row.frequency,
        days,
    })
}
