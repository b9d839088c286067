//! Console views for the clinic queue.
//!
//! Four surfaces mirror the clinic floor: the admin console registers
//! walk-ins and calls the next patient, the doctor console reviews the
//! queue and attaches notes, the TV board shows the room what is
//! happening, and the ticket view answers "where am I in line". Each
//! view renders a snapshot to text and translates user actions into
//! core operations; no terminal handling lives here.

pub mod admin;
pub mod board;
pub mod doctor;
pub mod ticket;

pub use admin::AdminConsole;
pub use board::BoardView;
pub use doctor::DoctorConsole;
pub use ticket::{TicketCache, TicketView};

use std::sync::Arc;

use clinic_queue_core::{ClinicQueue, Role, Session};

/// The console an authenticated session receives.
pub enum ConsoleView {
    Admin(AdminConsole),
    Doctor(DoctorConsole),
}

/// Hand the session its console, by role.
pub fn route(clinic: Arc<ClinicQueue>, session: &Session) -> ConsoleView {
    match session.role {
        Role::Admin => ConsoleView::Admin(AdminConsole::new(clinic)),
        Role::Doctor => ConsoleView::Doctor(DoctorConsole::new(clinic)),
    }
}
