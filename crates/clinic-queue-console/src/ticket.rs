//! Personal ticket-status view.
//!
//! Self-service registration remembers the employee ID on the kiosk
//! (a small file standing in for browser storage); the status page
//! reads it back to find "my" visit.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use clinic_queue_core::{ClinicError, ClinicQueue, QueueNumber, RegisterRequest};

/// Ticket view errors.
#[derive(Error, Debug)]
pub enum TicketError {
    #[error("Cache I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Clinic(#[from] ClinicError),
}

/// The kiosk-local persisted employee ID.
pub struct TicketCache {
    path: PathBuf,
}

impl TicketCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Remember the ID after a successful self-registration.
    pub fn save(&self, employee_id: &str) -> Result<(), TicketError> {
        fs::write(&self.path, employee_id)?;
        Ok(())
    }

    /// The remembered ID, if any.
    pub fn load(&self) -> Option<String> {
        let text = fs::read_to_string(&self.path).ok()?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Forget the remembered ID.
    pub fn clear(&self) -> Result<(), TicketError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// The "Your Ticket Number is" page.
pub struct TicketView {
    clinic: Arc<ClinicQueue>,
    cache: TicketCache,
}

impl TicketView {
    pub fn new(clinic: Arc<ClinicQueue>, cache: TicketCache) -> Self {
        Self { clinic, cache }
    }

    /// Self-service registration: submit the form, remember the ID so
    /// the status page can find "my" visit, and hand back the ticket.
    pub fn register(
        &self,
        employee_id: &str,
        name: &str,
        email: Option<&str>,
    ) -> Result<QueueNumber, TicketError> {
        let number = self.clinic.register_visit(&RegisterRequest {
            employee_id: employee_id.to_string(),
            name: name.to_string(),
            email: email.map(str::to_string),
        })?;
        self.cache.save(employee_id)?;
        Ok(number)
    }

    /// Render the page for the remembered visitor.
    pub fn render(&self) -> Result<String, TicketError> {
        let Some(employee_id) = self.cache.load() else {
            return Ok("User not registered!".to_string());
        };

        let ticket = match self.clinic.ticket_status(&employee_id)? {
            Some(visit) => visit
                .queue_number
                .map(|n| n.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            None => "N/A".to_string(),
        };

        Ok(format!(
            "Your Ticket Number is\n{ticket}\nThank you for visiting our clinic"
        ))
    }
}
