//! Admin console: register walk-ins, call the next patient.

use std::sync::Arc;

use clinic_queue_core::{
    ClinicError, ClinicQueue, InviteOutcome, QueueNumber, RegisterRequest, Visit,
};

/// The front-desk view. Holds no queue state of its own; every render
/// works from the latest delivered snapshot.
pub struct AdminConsole {
    clinic: Arc<ClinicQueue>,
}

impl AdminConsole {
    pub fn new(clinic: Arc<ClinicQueue>) -> Self {
        Self { clinic }
    }

    /// Submit the registration form.
    pub fn register(
        &self,
        employee_id: &str,
        name: &str,
        email: Option<&str>,
    ) -> Result<QueueNumber, ClinicError> {
        self.clinic.register_visit(&RegisterRequest {
            employee_id: employee_id.to_string(),
            name: name.to_string(),
            email: email.map(str::to_string),
        })
    }

    /// The "Invite Next Patient" button.
    pub fn invite_next(&self) -> Result<InviteOutcome, ClinicError> {
        self.clinic.invite_next()
    }
}

/// Confirmation banner for a completed registration.
pub fn registration_banner(number: QueueNumber) -> String {
    format!("Patient registered successfully! Your queue number is {number}")
}

/// Banner for the outcome of an invite.
pub fn invite_banner(outcome: &InviteOutcome) -> String {
    match outcome {
        InviteOutcome::Invited(visit) => format!("Invited: {}", visit.name),
        InviteOutcome::NoneWaiting { .. } => "No more patients waiting!".to_string(),
        InviteOutcome::EmptyQueue => "No patients available in the queue!".to_string(),
    }
}

/// Render the live queue for the admin screen.
pub fn render_queue(snapshot: &[Visit]) -> String {
    if snapshot.is_empty() {
        return "No patients found.".to_string();
    }

    let mut out = String::new();
    for visit in snapshot {
        let ticket = visit
            .queue_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "----".to_string());
        out.push_str(&format!(
            "{}  {}  {}  [{}]\n",
            ticket, visit.employee_id, visit.name, visit.status
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_queue_core::SnapshotOrder;

    fn setup() -> AdminConsole {
        AdminConsole::new(Arc::new(ClinicQueue::open_in_memory().unwrap()))
    }

    #[test]
    fn test_register_and_banner() {
        let console = setup();

        let number = console
            .register("123456", "Jane Doe", Some("jane@clinic.example"))
            .unwrap();
        assert_eq!(
            registration_banner(number),
            "Patient registered successfully! Your queue number is D0001"
        );
    }

    #[test]
    fn test_invite_banners() {
        let console = setup();

        assert_eq!(
            invite_banner(&console.invite_next().unwrap()),
            "No patients available in the queue!"
        );

        console.register("123456", "Jane Doe", None).unwrap();
        assert_eq!(
            invite_banner(&console.invite_next().unwrap()),
            "Invited: Jane Doe"
        );
        assert_eq!(
            invite_banner(&console.invite_next().unwrap()),
            "No more patients waiting!"
        );
    }

    #[test]
    fn test_render_queue() {
        let console = setup();
        assert_eq!(render_queue(&[]), "No patients found.");

        console.register("123456", "Jane Doe", None).unwrap();
        let sub = console.clinic.subscribe(SnapshotOrder::Arrival).unwrap();
        let snapshot = sub.try_snapshot().unwrap();

        let rendered = render_queue(&snapshot);
        assert!(rendered.contains("D0001"));
        assert!(rendered.contains("Jane Doe"));
        assert!(rendered.contains("[waiting]"));
    }
}
