//! Clinic Queue Core Library
//!
//! Walk-in clinic queue management: registration with ticket
//! allocation, the FIFO visit lifecycle, whole-snapshot live feeds, and
//! role-gated staff sessions, all over a SQLite-backed document store.
//!
//! # Architecture
//!
//! ```text
//! Registration (admin console / self-service form)
//!        │  validate → allocate D-number → upsert   [one transaction]
//!        ▼
//!  ┌─────────┐  invite next   ┌────────────────┐  complete   ┌───────────┐
//!  │ waiting │ ─────────────▶ │ being_attended │ ──────────▶ │ completed │
//!  └─────────┘                └────────────────┘             └───────────┘
//!        │                            │
//!        └───────── every write ──────┘
//!                       │
//!             ┌─────────▼─────────┐
//!             │     QueueFeed     │  full snapshot per mutation
//!             └─────────┬─────────┘
//!        ┌──────────────┼──────────────────┐
//!        ▼              ▼                  ▼
//!   Admin console  Doctor console   TV board / ticket view
//! ```
//!
//! # Core Principle
//!
//! **Status only moves forward.** Waiting, then being attended, then
//! completed; completed is terminal and enforced both by the lifecycle
//! logic and by a store trigger.
//!
//! # Modules
//!
//! - [`db`]: SQLite document collections (`queue`, `users`)
//! - [`models`]: Domain types (Visit, QueueNumber, MedicalNote, Role, ...)
//! - [`queue`]: Lifecycle logic — register, invite next, notes, complete
//! - [`live`]: Whole-snapshot live query feed
//! - [`auth`]: Registration, login, and the session context

pub mod auth;
pub mod db;
pub mod live;
pub mod models;
pub mod queue;

// Re-export commonly used types
pub use auth::{AuthError, Session};
pub use db::{Database, DbError};
pub use live::{QueueFeed, SnapshotOrder, Subscription};
pub use models::{
    MedicalNote, NewAccount, QueueNumber, Role, UserAccount, Visit, VisitStatus, NOTE_PRESETS,
};
pub use queue::{InviteOutcome, QueueError, RegisterRequest};

use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// Top-level error for facade callers.
#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error(transparent)]
    Database(#[from] db::DbError),

    #[error(transparent)]
    Queue(#[from] queue::QueueError),

    #[error(transparent)]
    Auth(#[from] auth::AuthError),

    #[error("Store lock poisoned: {0}")]
    LockPoisoned(String),
}

impl<T> From<PoisonError<T>> for ClinicError {
    fn from(e: PoisonError<T>) -> Self {
        ClinicError::LockPoisoned(e.to_string())
    }
}

/// Thread-safe entry point tying the store, the lifecycle logic, and
/// the live feed together. Every successful mutation publishes a fresh
/// snapshot to all subscribers.
pub struct ClinicQueue {
    db: Mutex<Database>,
    feed: QueueFeed,
}

impl ClinicQueue {
    /// Open or create the store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ClinicError> {
        Ok(Self {
            db: Mutex::new(Database::open(path)?),
            feed: QueueFeed::new(),
        })
    }

    /// In-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, ClinicError> {
        Ok(Self {
            db: Mutex::new(Database::open_in_memory()?),
            feed: QueueFeed::new(),
        })
    }

    // =========================================================================
    // Queue Lifecycle Operations
    // =========================================================================

    /// Register a walk-in patient and return the assigned ticket number.
    pub fn register_visit(&self, req: &RegisterRequest) -> Result<QueueNumber, ClinicError> {
        let mut db = self.db.lock()?;
        let number = queue::register_visit(&mut db, req)?;
        self.publish(&db)?;
        Ok(number)
    }

    /// Complete the attended visit (if any) and call in the earliest
    /// waiting patient.
    pub fn invite_next(&self) -> Result<InviteOutcome, ClinicError> {
        let mut db = self.db.lock()?;
        let outcome = queue::invite_next(&mut db)?;
        if outcome != InviteOutcome::EmptyQueue {
            self.publish(&db)?;
        }
        Ok(outcome)
    }

    /// Attach a note to a visit.
    pub fn update_notes(&self, employee_id: &str, note: MedicalNote) -> Result<(), ClinicError> {
        let db = self.db.lock()?;
        queue::update_notes(&db, employee_id, note)?;
        self.publish(&db)?;
        Ok(())
    }

    /// Mark a visit completed directly.
    pub fn complete_visit(&self, employee_id: &str) -> Result<(), ClinicError> {
        let db = self.db.lock()?;
        queue::complete_visit(&db, employee_id)?;
        self.publish(&db)?;
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// One-shot read of the live queue in arrival order.
    pub fn active_queue(&self) -> Result<Vec<Visit>, ClinicError> {
        Ok(self.db.lock()?.list_active()?)
    }

    /// One-shot read of the live queue in TV-board order.
    pub fn board_queue(&self) -> Result<Vec<Visit>, ClinicError> {
        Ok(self.db.lock()?.list_active_board()?)
    }

    /// Look up a visit by employee ID — the personal ticket-status page.
    pub fn ticket_status(&self, employee_id: &str) -> Result<Option<Visit>, ClinicError> {
        Ok(self.db.lock()?.get_visit(employee_id)?)
    }

    // =========================================================================
    // Live Subscriptions
    // =========================================================================

    /// Open a live subscription; the initial snapshot is delivered
    /// before this returns.
    pub fn subscribe(&self, order: SnapshotOrder) -> Result<Subscription, ClinicError> {
        let db = self.db.lock()?;
        let initial = match order {
            SnapshotOrder::Arrival => db.list_active()?,
            SnapshotOrder::Board => db.list_active_board()?,
        };
        Ok(self.feed.subscribe(order, initial))
    }

    /// Stop deliveries to one subscription.
    pub fn unsubscribe(&self, id: u64) {
        self.feed.unsubscribe(id);
    }

    // =========================================================================
    // Sessions
    // =========================================================================

    /// Create a staff identity and its role record.
    pub fn register_account(&self, new: NewAccount) -> Result<(), ClinicError> {
        let db = self.db.lock()?;
        auth::register_account(&db, new)?;
        Ok(())
    }

    /// Verify credentials and open a session.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Session, ClinicError> {
        let db = self.db.lock()?;
        Ok(auth::authenticate(&db, email, password)?)
    }

    fn publish(&self, db: &Database) -> Result<(), ClinicError> {
        let arrival = db.list_active()?;
        let board = db.list_active_board()?;
        self.feed.publish(&arrival, &board);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: &str, name: &str) -> RegisterRequest {
        RegisterRequest {
            employee_id: id.into(),
            name: name.into(),
            email: None,
        }
    }

    #[test]
    fn test_mutations_reach_subscribers() {
        let clinic = ClinicQueue::open_in_memory().unwrap();
        let sub = clinic.subscribe(SnapshotOrder::Arrival).unwrap();
        assert_eq!(sub.try_snapshot().unwrap().len(), 0);

        clinic.register_visit(&request("123456", "Jane Doe")).unwrap();

        let snapshot = sub.try_snapshot().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].employee_id, "123456");
    }

    #[test]
    fn test_empty_invite_publishes_nothing() {
        let clinic = ClinicQueue::open_in_memory().unwrap();
        let sub = clinic.subscribe(SnapshotOrder::Arrival).unwrap();
        sub.try_snapshot();

        assert_eq!(clinic.invite_next().unwrap(), InviteOutcome::EmptyQueue);
        assert!(sub.try_snapshot().is_none());
    }

    #[test]
    fn test_ticket_status_lookup() {
        let clinic = ClinicQueue::open_in_memory().unwrap();
        clinic.register_visit(&request("123456", "Jane Doe")).unwrap();

        let visit = clinic.ticket_status("123456").unwrap().unwrap();
        assert_eq!(visit.queue_number.unwrap().to_string(), "D0001");
        assert!(clinic.ticket_status("654321").unwrap().is_none());
    }
}
