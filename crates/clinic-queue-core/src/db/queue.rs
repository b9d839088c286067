//! Queue collection operations.
//!
//! Free functions take `&Connection` so they compose inside a
//! transaction; the `Database` methods below cover one-shot use.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::{Database, DbResult};
use crate::models::{MedicalNote, QueueNumber, Visit, VisitStatus};

const VISIT_COLUMNS: &str = "employee_id, name, email, queue_number, status, notes, timestamp";

fn row_to_visit(row: &rusqlite::Row<'_>) -> rusqlite::Result<Visit> {
    let status_text: String = row.get(4)?;
    let status = VisitStatus::parse(&status_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            format!("unknown status: {status_text}").into(),
        )
    })?;

    let timestamp_text: String = row.get(6)?;
    let timestamp = DateTime::parse_from_rfc3339(&timestamp_text)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                6,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?
        .with_timezone(&Utc);

    Ok(Visit {
        employee_id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        queue_number: row
            .get::<_, Option<String>>(3)?
            .as_deref()
            .and_then(QueueNumber::parse),
        status,
        notes: row
            .get::<_, Option<String>>(5)?
            .map(|text| MedicalNote::from_text(&text)),
        timestamp,
    })
}

/// Point write keyed by employee ID. Re-registration overwrites the
/// existing row wholesale, keeping the identifier.
pub fn upsert_visit(conn: &Connection, visit: &Visit) -> DbResult<()> {
    conn.execute(
        r#"
        INSERT OR REPLACE INTO queue (
            employee_id, name, email, queue_number, status, notes, timestamp
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
        params![
            visit.employee_id,
            visit.name,
            visit.email,
            visit.queue_number.map(|n| n.to_string()),
            visit.status.as_str(),
            visit.notes.as_ref().map(|n| n.as_text().to_string()),
            visit.timestamp.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Get a visit by employee ID.
pub fn get_visit(conn: &Connection, employee_id: &str) -> DbResult<Option<Visit>> {
    conn.query_row(
        &format!("SELECT {VISIT_COLUMNS} FROM queue WHERE employee_id = ?"),
        [employee_id],
        row_to_visit,
    )
    .optional()
    .map_err(Into::into)
}

/// Field-subset update of `status`.
pub fn update_status(
    conn: &Connection,
    employee_id: &str,
    status: VisitStatus,
) -> DbResult<bool> {
    let rows_affected = conn.execute(
        "UPDATE queue SET status = ?2, updated_at = datetime('now') WHERE employee_id = ?1",
        params![employee_id, status.as_str()],
    )?;
    Ok(rows_affected > 0)
}

/// Field-subset update of `notes`.
pub fn set_notes(conn: &Connection, employee_id: &str, note: &MedicalNote) -> DbResult<bool> {
    let rows_affected = conn.execute(
        "UPDATE queue SET notes = ?2, updated_at = datetime('now') WHERE employee_id = ?1",
        params![employee_id, note.as_text()],
    )?;
    Ok(rows_affected > 0)
}

/// The live queue: waiting and being-attended visits in arrival order.
pub fn list_active(conn: &Connection) -> DbResult<Vec<Visit>> {
    let mut stmt = conn.prepare(&format!(
        r#"
        SELECT {VISIT_COLUMNS} FROM queue
        WHERE status IN ('waiting', 'being_attended')
        ORDER BY timestamp ASC
        "#
    ))?;
    let rows = stmt.query_map([], row_to_visit)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// The live queue in TV-board order: status descending, then arrival.
pub fn list_active_board(conn: &Connection) -> DbResult<Vec<Visit>> {
    let mut stmt = conn.prepare(&format!(
        r#"
        SELECT {VISIT_COLUMNS} FROM queue
        WHERE status IN ('waiting', 'being_attended')
        ORDER BY status DESC, timestamp ASC
        "#
    ))?;
    let rows = stmt.query_map([], row_to_visit)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Allocate the next ticket number: scan every row ever written
/// (completed ones included), parse what parses, max + 1. Run inside
/// the registration transaction so two registrations cannot both see
/// the same maximum.
pub fn next_queue_number(conn: &Connection) -> DbResult<QueueNumber> {
    let mut stmt = conn.prepare("SELECT queue_number FROM queue")?;
    let rows = stmt.query_map([], |row| row.get::<_, Option<String>>(0))?;

    let mut seen = Vec::new();
    for row in rows {
        // Rows lacking the field, or holding junk, do not participate
        if let Some(number) = row?.as_deref().and_then(QueueNumber::parse) {
            seen.push(number);
        }
    }
    Ok(QueueNumber::next_after(seen))
}

impl Database {
    /// See [`upsert_visit`].
    pub fn upsert_visit(&self, visit: &Visit) -> DbResult<()> {
        upsert_visit(self.conn(), visit)
    }

    /// See [`get_visit`].
    pub fn get_visit(&self, employee_id: &str) -> DbResult<Option<Visit>> {
        get_visit(self.conn(), employee_id)
    }

    /// See [`update_status`].
    pub fn update_status(&self, employee_id: &str, status: VisitStatus) -> DbResult<bool> {
        update_status(self.conn(), employee_id, status)
    }

    /// See [`set_notes`].
    pub fn set_notes(&self, employee_id: &str, note: &MedicalNote) -> DbResult<bool> {
        set_notes(self.conn(), employee_id, note)
    }

    /// See [`list_active`].
    pub fn list_active(&self) -> DbResult<Vec<Visit>> {
        list_active(self.conn())
    }

    /// See [`list_active_board`].
    pub fn list_active_board(&self) -> DbResult<Vec<Visit>> {
        list_active_board(self.conn())
    }

    /// See [`next_queue_number`].
    pub fn next_queue_number(&self) -> DbResult<QueueNumber> {
        next_queue_number(self.conn())
    }
}
