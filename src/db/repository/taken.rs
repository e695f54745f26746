use rusqlite::{params, Connection};

use crate::db::repository::schedule::{format_timestamp, parse_timestamp};
use crate::db::DatabaseError;
use crate::models::TakenDose;

pub fn insert_taken(conn: &Connection, taken: &TakenDose) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO taken_doses (id, schedule_id, dose_time, taken_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            taken.id,
            taken.schedule_id,
            taken.dose_time,
            format_timestamp(&taken.taken_at),
        ],
    )?;
    Ok(())
}

pub fn list_taken(conn: &Connection) -> Result<Vec<TakenDose>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT id, schedule_id, dose_time, taken_at FROM taken_doses")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut records = Vec::new();
    for row in rows {
        let (id, schedule_id, dose_time, taken_at) = row?;
        records.push(TakenDose {
            taken_at: parse_timestamp("taken_at", &taken_at)?,
            id,
            schedule_id,
            dose_time,
        });
    }
    Ok(records)
}

pub fn delete_taken(conn: &Connection, id: &str) -> Result<(), DatabaseError> {
    let changed = conn.execute("DELETE FROM taken_doses WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "taken dose".into(),
            id: id.into(),
        });
    }
    Ok(())
}
