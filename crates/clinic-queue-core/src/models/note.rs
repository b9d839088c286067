//! Doctor's notes attached to a visit.

use serde::{Deserialize, Serialize};

/// Preset labels offered by the doctor console, in display order.
pub const NOTE_PRESETS: &[&str] = &["Flu", "Cough", "Headache"];

/// A medical note: one of the fixed presets or free text.
/// Persists as plain text either way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(into = "String", from = "String")]
pub enum MedicalNote {
    Flu,
    Cough,
    Headache,
    Other(String),
}

impl MedicalNote {
    /// Free-text note.
    pub fn other(text: impl Into<String>) -> Self {
        MedicalNote::Other(text.into())
    }

    /// Map stored text back to a preset where it matches.
    pub fn from_text(text: &str) -> Self {
        match text {
            "Flu" => MedicalNote::Flu,
            "Cough" => MedicalNote::Cough,
            "Headache" => MedicalNote::Headache,
            other => MedicalNote::Other(other.to_string()),
        }
    }

    /// The stored text form.
    pub fn as_text(&self) -> &str {
        match self {
            MedicalNote::Flu => "Flu",
            MedicalNote::Cough => "Cough",
            MedicalNote::Headache => "Headache",
            MedicalNote::Other(text) => text,
        }
    }
}

impl std::fmt::Display for MedicalNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_text())
    }
}

impl From<MedicalNote> for String {
    fn from(note: MedicalNote) -> Self {
        note.as_text().to_string()
    }
}

impl From<String> for MedicalNote {
    fn from(text: String) -> Self {
        MedicalNote::from_text(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_roundtrip() {
        for preset in NOTE_PRESETS {
            let note = MedicalNote::from_text(preset);
            assert_eq!(note.as_text(), *preset);
            assert!(!matches!(note, MedicalNote::Other(_)));
        }
    }

    #[test]
    fn test_custom_text() {
        let note = MedicalNote::from_text("Sprained ankle, follow up in a week");
        assert_eq!(note.as_text(), "Sprained ankle, follow up in a week");
        assert!(matches!(note, MedicalNote::Other(_)));
    }
}
