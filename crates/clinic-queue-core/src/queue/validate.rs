//! Registration input validation.
//!
//! Both checks run before any store call; a rejected request writes
//! nothing.

use super::{QueueError, QueueResult};

/// Employee IDs are exactly six ASCII digits.
pub fn validate_employee_id(id: &str) -> QueueResult<()> {
    if id.len() == 6 && id.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(QueueError::InvalidEmployeeId)
    }
}

/// Names are non-empty and contain only ASCII letters and spaces.
pub fn validate_name(name: &str) -> QueueResult<()> {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        Ok(())
    } else {
        Err(QueueError::InvalidName)
    }
}
