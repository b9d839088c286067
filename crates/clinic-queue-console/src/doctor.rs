//! Doctor console: review the queue, attach notes, complete visits.

use std::sync::Arc;

use clinic_queue_core::{ClinicError, ClinicQueue, MedicalNote, Visit, NOTE_PRESETS};

/// Label of the dropdown entry that opens the free-text field.
pub const OTHERS_OPTION: &str = "Others";

/// The consultation-room view.
pub struct DoctorConsole {
    clinic: Arc<ClinicQueue>,
}

impl DoctorConsole {
    pub fn new(clinic: Arc<ClinicQueue>) -> Self {
        Self { clinic }
    }

    /// Current patients, arrival order.
    pub fn patients(&self) -> Result<Vec<Visit>, ClinicError> {
        self.clinic.active_queue()
    }

    /// Save the notes form for the selected patient.
    pub fn save_notes(
        &self,
        employee_id: &str,
        selection: &str,
        custom: &str,
    ) -> Result<(), ClinicError> {
        self.clinic
            .update_notes(employee_id, note_from_selection(selection, custom))
    }

    /// The "Mark as Completed" button.
    pub fn mark_completed(&self, employee_id: &str) -> Result<(), ClinicError> {
        self.clinic.complete_visit(employee_id)
    }
}

/// Entries for the notes dropdown: the presets plus the free-text
/// escape hatch.
pub fn note_options() -> Vec<&'static str> {
    let mut options = NOTE_PRESETS.to_vec();
    options.push(OTHERS_OPTION);
    options
}

/// Resolve the dropdown + free-text pair into a note. An untouched
/// dropdown saves the literal "No Notes", matching the original form.
pub fn note_from_selection(selection: &str, custom: &str) -> MedicalNote {
    if selection == OTHERS_OPTION {
        MedicalNote::other(custom)
    } else if selection.is_empty() {
        MedicalNote::other("No Notes")
    } else {
        MedicalNote::from_text(selection)
    }
}

/// Render the patient list for the doctor screen.
pub fn render_patients(snapshot: &[Visit]) -> String {
    if snapshot.is_empty() {
        return "No patients found.".to_string();
    }

    let mut out = String::new();
    for visit in snapshot {
        out.push_str(&format!(
            "Employee ID: {} | Name: {} | Status: {}\n",
            visit.employee_id, visit.name, visit.status
        ));
    }
    out
}
