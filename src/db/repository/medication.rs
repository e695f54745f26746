use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::Medication;

pub fn insert_medication(conn: &Connection, med: &Medication) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO medications (id, name) VALUES (?1, ?2)",
        params![med.id, med.name],
    )?;
    Ok(())
}

pub fn list_medications(conn: &Connection) -> Result<Vec<Medication>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, name FROM medications")?;

    let rows = stmt.query_map([], |row| {
        Ok(Medication {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn get_medication(conn: &Connection, id: &str) -> Result<Option<Medication>, DatabaseError> {
    let med = conn
        .query_row(
            "SELECT id, name FROM medications WHERE id = ?1",
            params![id],
            |row| {
                Ok(Medication {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(med)
}

pub fn update_medication(
    conn: &Connection,
    id: &str,
    name: &str,
) -> Result<Medication, DatabaseError> {
    let changed = conn.execute(
        "UPDATE medications SET name = ?2 WHERE id = ?1",
        params![id, name],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "medication".into(),
            id: id.into(),
        });
    }
    Ok(Medication {
        id: id.into(),
        name: name.into(),
    })
}

pub fn delete_medication(conn: &Connection, id: &str) -> Result<(), DatabaseError> {
    let changed = conn.execute("DELETE FROM medications WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "medication".into(),
            id: id.into(),
        });
    }
    Ok(())
}
