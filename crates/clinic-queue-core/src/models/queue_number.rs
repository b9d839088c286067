//! Display ticket numbers.

use serde::{Deserialize, Serialize};

/// Ticket prefix shown on every display surface.
pub const TICKET_PREFIX: char = 'D';

/// A display ticket number, rendered as `D` plus a zero-padded
/// four-digit sequence (`D0001`). Allocation is max-seen + 1 over the
/// whole collection, so numbers are strictly increasing and gaps are
/// never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct QueueNumber(u32);

impl QueueNumber {
    /// Wrap a raw sequence value.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// The raw sequence value.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The number allocated after this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Parse a stored ticket string. Lenient: the prefix may be absent
    /// (legacy rows), anything non-numeric is treated as no number.
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.strip_prefix(TICKET_PREFIX).unwrap_or(s);
        digits.parse::<u32>().ok().map(Self)
    }

    /// Allocate the next number after everything already seen:
    /// max(0, seen) + 1.
    pub fn next_after<I>(seen: I) -> Self
    where
        I: IntoIterator<Item = QueueNumber>,
    {
        let max = seen.into_iter().map(|n| n.0).max().unwrap_or(0);
        Self(max + 1)
    }
}

impl std::fmt::Display for QueueNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:04}", TICKET_PREFIX, self.0)
    }
}

impl From<QueueNumber> for String {
    fn from(n: QueueNumber) -> Self {
        n.to_string()
    }
}

impl TryFrom<String> for QueueNumber {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        QueueNumber::parse(&s).ok_or_else(|| format!("invalid queue number: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_display_zero_padded() {
        assert_eq!(QueueNumber::new(1).to_string(), "D0001");
        assert_eq!(QueueNumber::new(42).to_string(), "D0042");
        assert_eq!(QueueNumber::new(12345).to_string(), "D12345");
    }

    #[test]
    fn test_parse() {
        assert_eq!(QueueNumber::parse("D0001"), Some(QueueNumber::new(1)));
        assert_eq!(QueueNumber::parse("D0042"), Some(QueueNumber::new(42)));
        // Legacy rows without the prefix still parse
        assert_eq!(QueueNumber::parse("0007"), Some(QueueNumber::new(7)));
        assert_eq!(QueueNumber::parse("ticket"), None);
        assert_eq!(QueueNumber::parse(""), None);
    }

    #[test]
    fn test_next_after_empty_collection() {
        assert_eq!(QueueNumber::next_after([]), QueueNumber::new(1));
    }

    #[test]
    fn test_next_after_skips_gaps() {
        let seen = [QueueNumber::new(1), QueueNumber::new(3)];
        // max + 1, never gap-filled
        assert_eq!(QueueNumber::next_after(seen), QueueNumber::new(4));
    }

    proptest! {
        #[test]
        fn prop_display_parse_roundtrip(value in 0u32..100_000) {
            let n = QueueNumber::new(value);
            prop_assert_eq!(QueueNumber::parse(&n.to_string()), Some(n));
        }

        #[test]
        fn prop_allocation_is_strictly_increasing(values in prop::collection::vec(0u32..10_000, 0..32)) {
            let seen: Vec<QueueNumber> = values.iter().copied().map(QueueNumber::new).collect();
            let next = QueueNumber::next_after(seen.iter().copied());
            for n in &seen {
                prop_assert!(next > *n);
            }
        }
    }
}
