//! Queue lifecycle logic.
//!
//! Pipeline: Register → Waiting → Being attended → Completed
//!
//! Registration allocates the ticket number and writes the visit inside
//! one transaction, so two concurrent registrations can never both read
//! the same maximum. The invite operation is transactional for the same
//! reason: completion and promotion land together or not at all.

mod invite;
mod validate;

pub use invite::*;
pub use validate::*;

use thiserror::Error;
use tracing::info;

use crate::db::{self, Database, DbError};
use crate::models::{MedicalNote, QueueNumber, Visit, VisitStatus};

/// Lifecycle errors.
#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Employee ID must be exactly 6 digits")]
    InvalidEmployeeId,

    #[error("Name must contain only letters and spaces")]
    InvalidName,

    #[error("Visit not found: {0}")]
    VisitNotFound(String),
}

pub type QueueResult<T> = Result<T, QueueError>;

/// Registration input from the admin console or the self-service form.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub employee_id: String,
    pub name: String,
    pub email: Option<String>,
}

/// Register a walk-in patient: validate, allocate the next ticket
/// number, and upsert the visit with status `Waiting` — all in one
/// transaction. Re-registering an employee ID overwrites its record.
/// Returns the assigned ticket number for display.
pub fn register_visit(db: &mut Database, req: &RegisterRequest) -> QueueResult<QueueNumber> {
    validate_employee_id(&req.employee_id)?;
    validate_name(&req.name)?;

    let tx = db.transaction()?;
    let number = db::queue::next_queue_number(&tx)?;
    let visit = Visit::new(
        req.employee_id.clone(),
        req.name.clone(),
        req.email.clone(),
        number,
    );
    db::queue::upsert_visit(&tx, &visit)?;
    tx.commit().map_err(DbError::from)?;

    info!("Registered visit {} with ticket {}", req.employee_id, number);
    Ok(number)
}

/// Attach a note to a visit. Point update; the visit must exist.
pub fn update_notes(db: &Database, employee_id: &str, note: MedicalNote) -> QueueResult<()> {
    if !db.set_notes(employee_id, &note)? {
        return Err(QueueError::VisitNotFound(employee_id.to_string()));
    }
    info!("Updated notes for visit {}", employee_id);
    Ok(())
}

/// Mark a visit completed directly (doctor action). Works from any
/// active state; a visit that is already completed stays completed.
pub fn complete_visit(db: &Database, employee_id: &str) -> QueueResult<()> {
    let visit = db
        .get_visit(employee_id)?
        .ok_or_else(|| QueueError::VisitNotFound(employee_id.to_string()))?;

    if !visit.status.can_advance_to(VisitStatus::Completed) {
        // Already completed; terminal state, nothing to write
        return Ok(());
    }

    db.update_status(employee_id, VisitStatus::Completed)?;
    info!("Completed visit {}", employee_id);
    Ok(())
}
