//! The "invite next patient" operation.

use tracing::info;

use super::{QueueError, QueueResult};
use crate::db::{self, Database, DbError};
use crate::models::{Visit, VisitStatus};

/// What an invite call did.
#[derive(Debug, Clone, PartialEq)]
pub enum InviteOutcome {
    /// A waiting patient was promoted to being attended.
    Invited(Visit),
    /// Nobody was waiting. If a patient had been with the doctor, their
    /// visit was completed first.
    NoneWaiting { completed: Option<String> },
    /// The live queue held no records at all; nothing was written.
    EmptyQueue,
}

/// The writes an invite would perform against a snapshot, by employee
/// ID. Completion always precedes promotion.
#[derive(Debug, Clone, PartialEq)]
pub struct InvitePlan {
    pub complete: Option<String>,
    pub promote: Option<String>,
}

/// Pure invite rule over a caller-held snapshot of the live queue:
/// complete the currently attended visit if there is one, then promote
/// the earliest waiting visit.
pub fn plan_invite(snapshot: &[Visit]) -> InvitePlan {
    let complete = snapshot
        .iter()
        .find(|v| v.status == VisitStatus::BeingAttended)
        .map(|v| v.employee_id.clone());

    let promote = snapshot
        .iter()
        .filter(|v| v.status == VisitStatus::Waiting)
        .min_by_key(|v| v.timestamp)
        .map(|v| v.employee_id.clone());

    InvitePlan { complete, promote }
}

/// Invite the next patient. The snapshot read and both status writes
/// share one transaction, so an invite either lands whole or not at
/// all, and two racing invites cannot each promote a different patient.
pub fn invite_next(db: &mut Database) -> QueueResult<InviteOutcome> {
    let tx = db.transaction()?;

    let snapshot = db::queue::list_active(&tx)?;
    if snapshot.is_empty() {
        return Ok(InviteOutcome::EmptyQueue);
    }

    let plan = plan_invite(&snapshot);
    if let Some(id) = &plan.complete {
        db::queue::update_status(&tx, id, VisitStatus::Completed)?;
    }

    match &plan.promote {
        Some(id) => {
            db::queue::update_status(&tx, id, VisitStatus::BeingAttended)?;
            let invited = db::queue::get_visit(&tx, id)?
                .ok_or_else(|| QueueError::VisitNotFound(id.clone()))?;
            tx.commit().map_err(DbError::from)?;

            info!("Invited {} ({})", invited.name, invited.employee_id);
            Ok(InviteOutcome::Invited(invited))
        }
        None => {
            tx.commit().map_err(DbError::from)?;
            info!("No patients waiting");
            Ok(InviteOutcome::NoneWaiting {
                completed: plan.complete,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QueueNumber;
    use chrono::Duration;

    fn visit(id: &str, name: &str, number: u32, status: VisitStatus) -> Visit {
        let mut v = Visit::new(id.into(), name.into(), None, QueueNumber::new(number));
        v.status = status;
        v
    }

    #[test]
    fn test_plan_completes_then_promotes() {
        let attended = visit("111111", "Alice Smith", 1, VisitStatus::BeingAttended);
        let mut waiting = visit("222222", "Bob Jones", 2, VisitStatus::Waiting);
        waiting.timestamp = attended.timestamp + Duration::seconds(5);

        let plan = plan_invite(&[attended, waiting]);
        assert_eq!(plan.complete, Some("111111".into()));
        assert_eq!(plan.promote, Some("222222".into()));
    }

    #[test]
    fn test_plan_picks_earliest_waiting() {
        let mut early = visit("111111", "Alice Smith", 1, VisitStatus::Waiting);
        let late = visit("222222", "Bob Jones", 2, VisitStatus::Waiting);
        early.timestamp = late.timestamp - Duration::seconds(30);

        // Order in the slice does not matter, only the timestamps
        let plan = plan_invite(&[late, early]);
        assert_eq!(plan.complete, None);
        assert_eq!(plan.promote, Some("111111".into()));
    }

    #[test]
    fn test_plan_empty_snapshot() {
        let plan = plan_invite(&[]);
        assert_eq!(plan.complete, None);
        assert_eq!(plan.promote, None);
    }

    #[test]
    fn test_invite_promotes_and_completes() {
        let mut db = Database::open_in_memory().unwrap();

        let attended = visit("111111", "Alice Smith", 1, VisitStatus::BeingAttended);
        let mut waiting = visit("222222", "Bob Jones", 2, VisitStatus::Waiting);
        waiting.timestamp = attended.timestamp + Duration::seconds(5);
        db.upsert_visit(&attended).unwrap();
        db.upsert_visit(&waiting).unwrap();

        let outcome = invite_next(&mut db).unwrap();
        match outcome {
            InviteOutcome::Invited(v) => assert_eq!(v.employee_id, "222222"),
            other => panic!("expected Invited, got {:?}", other),
        }

        let former = db.get_visit("111111").unwrap().unwrap();
        assert_eq!(former.status, VisitStatus::Completed);
        let current = db.get_visit("222222").unwrap().unwrap();
        assert_eq!(current.status, VisitStatus::BeingAttended);
    }

    #[test]
    fn test_invite_empty_queue_writes_nothing() {
        let mut db = Database::open_in_memory().unwrap();

        let mut done = visit("111111", "Alice Smith", 1, VisitStatus::Completed);
        done.notes = None;
        db.upsert_visit(&done).unwrap();

        let outcome = invite_next(&mut db).unwrap();
        assert_eq!(outcome, InviteOutcome::EmptyQueue);

        let unchanged = db.get_visit("111111").unwrap().unwrap();
        assert_eq!(unchanged.status, VisitStatus::Completed);
    }

    #[test]
    fn test_invite_with_nobody_waiting_completes_current() {
        let mut db = Database::open_in_memory().unwrap();
        db.upsert_visit(&visit("111111", "Alice Smith", 1, VisitStatus::BeingAttended))
            .unwrap();

        let outcome = invite_next(&mut db).unwrap();
        assert_eq!(
            outcome,
            InviteOutcome::NoneWaiting {
                completed: Some("111111".into())
            }
        );

        let former = db.get_visit("111111").unwrap().unwrap();
        assert_eq!(former.status, VisitStatus::Completed);
    }

    #[test]
    fn test_single_attended_invariant_holds_across_invites() {
        let mut db = Database::open_in_memory().unwrap();

        for (id, name, n) in [
            ("111111", "Alice Smith", 1),
            ("222222", "Bob Jones", 2),
            ("333333", "Carol White", 3),
        ] {
            let mut v = visit(id, name, n, VisitStatus::Waiting);
            v.timestamp = v.timestamp + Duration::seconds(n as i64);
            db.upsert_visit(&v).unwrap();
        }

        for _ in 0..3 {
            invite_next(&mut db).unwrap();
            let attended: i64 = db
                .conn()
                .query_row(
                    "SELECT COUNT(*) FROM queue WHERE status = 'being_attended'",
                    [],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(attended, 1);
        }
    }
}
