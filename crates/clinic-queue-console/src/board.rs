//! TV board: the waiting-room display.

use serde::Serialize;

use clinic_queue_core::{Visit, VisitStatus};

/// One card on the board.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BoardCard {
    pub queue_number: Option<String>,
    pub name: String,
}

impl BoardCard {
    fn from_visit(visit: &Visit) -> Self {
        Self {
            queue_number: visit.queue_number.map(|n| n.to_string()),
            name: visit.name.clone(),
        }
    }
}

/// The board contents derived from a board-ordered snapshot: who is
/// with the doctor, and who is up next.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BoardView {
    pub now_serving: Option<BoardCard>,
    pub waiting: Vec<BoardCard>,
}

impl BoardView {
    /// Project a live snapshot onto the board.
    pub fn from_snapshot(snapshot: &[Visit]) -> Self {
        let now_serving = snapshot
            .iter()
            .find(|v| v.status == VisitStatus::BeingAttended)
            .map(BoardCard::from_visit);

        let waiting = snapshot
            .iter()
            .filter(|v| v.status == VisitStatus::Waiting)
            .map(BoardCard::from_visit)
            .collect();

        Self {
            now_serving,
            waiting,
        }
    }

    /// Render for a text display.
    pub fn render(&self) -> String {
        let mut out = String::from("Queue Status\n");

        match &self.now_serving {
            Some(card) => out.push_str(&format!(
                "Now Serving: {} {}\n",
                card.queue_number.as_deref().unwrap_or("----"),
                card.name
            )),
            None => out.push_str("Now Serving: -\n"),
        }

        out.push_str("Upcoming Patients:\n");
        for card in &self.waiting {
            out.push_str(&format!(
                "  {}  {}\n",
                card.queue_number.as_deref().unwrap_or("----"),
                card.name
            ));
        }
        out
    }

    /// JSON feed for the web shell that drives the actual TV.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
