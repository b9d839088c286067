//! Visit models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MedicalNote, QueueNumber};

/// Lifecycle state of a visit. Transitions only move forward;
/// `Completed` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    /// In the queue, not yet called
    Waiting,
    /// Currently with the doctor
    BeingAttended,
    /// Consultation finished; excluded from the live queue
    Completed,
}

impl VisitStatus {
    /// Canonical storage form, also used for ordering in the board view.
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitStatus::Waiting => "waiting",
            VisitStatus::BeingAttended => "being_attended",
            VisitStatus::Completed => "completed",
        }
    }

    /// Parse the canonical storage form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "waiting" => Some(VisitStatus::Waiting),
            "being_attended" => Some(VisitStatus::BeingAttended),
            "completed" => Some(VisitStatus::Completed),
            _ => None,
        }
    }

    /// Whether a visit in this state counts toward the live queue.
    pub fn is_active(&self) -> bool {
        matches!(self, VisitStatus::Waiting | VisitStatus::BeingAttended)
    }

    /// Whether moving to `next` is a forward transition.
    pub fn can_advance_to(&self, next: VisitStatus) -> bool {
        match (self, next) {
            (VisitStatus::Waiting, VisitStatus::BeingAttended) => true,
            (VisitStatus::Waiting, VisitStatus::Completed) => true,
            (VisitStatus::BeingAttended, VisitStatus::Completed) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One patient's queue entry for a single clinic session, keyed by
/// employee ID. Re-registering the same ID overwrites the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Visit {
    /// Six-digit employee ID, the record's identifier
    pub employee_id: String,
    /// Patient name
    pub name: String,
    /// Contact email, captured by self-service registration
    pub email: Option<String>,
    /// Display ticket number, assigned at registration. Absent only on
    /// rows written by clients that never allocated one.
    pub queue_number: Option<QueueNumber>,
    /// Lifecycle state
    pub status: VisitStatus,
    /// Doctor's notes
    pub notes: Option<MedicalNote>,
    /// Registration instant, the FIFO ordering key
    pub timestamp: DateTime<Utc>,
}

impl Visit {
    /// Create a freshly registered visit in the `Waiting` state.
    pub fn new(
        employee_id: String,
        name: String,
        email: Option<String>,
        queue_number: QueueNumber,
    ) -> Self {
        Self {
            employee_id,
            name,
            email,
            queue_number: Some(queue_number),
            status: VisitStatus::Waiting,
            notes: None,
            timestamp: Utc::now(),
        }
    }

    /// Whether this visit is still in the live queue.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
