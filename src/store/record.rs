//! Customer record model.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

/// Stable identity of a record; the 1-based ordinal it was generated at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u32);

impl RecordId {
    pub const fn new(ordinal: u32) -> Self {
        Self(ordinal)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One immutable customer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Score in `0..100`
    pub score: u8,
    pub last_activity: DateTime<Utc>,
    /// Who added the record
    pub added_by: &'static str,
    /// Avatar color token (`#rrggbb`)
    pub avatar: &'static str,
}

impl Record {
    /// Last activity as an ISO-8601 instant with millisecond precision.
    pub fn last_activity_iso(&self) -> String {
        self.last_activity
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Initials of the display name, e.g. "Jane Smith" -> "JS".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Record {
        Record {
            id: RecordId::new(7),
            name: "Lisa Smith".to_string(),
            phone: "+1 (207) 107-1007".to_string(),
            email: "lisa.smith7@example.com".to_string(),
            score: 42,
            last_activity: Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap(),
            added_by: "Support",
            avatar: "#3b82f6",
        }
    }

    #[test]
    fn test_initials() {
        assert_eq!(sample().initials(), "LS");
    }

    #[test]
    fn test_last_activity_iso() {
        assert_eq!(sample().last_activity_iso(), "2026-03-01T12:30:00.000Z");
    }

    #[test]
    fn test_record_id_display() {
        assert_eq!(RecordId::new(1_000_000).to_string(), "1000000");
        assert!(RecordId::new(2) > RecordId::new(1));
    }
}
