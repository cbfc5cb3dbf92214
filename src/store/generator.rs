//! Synthetic customer generation.
//!
//! Every field except the score is a pure function of the record ordinal, built with
//! modular arithmetic over small fixed pools. Scores come from a seeded ChaCha8 stream so
//! a `(count, seed)` pair always reproduces the same dataset.

use crate::store::record::{Record, RecordId};
use chrono::{DateTime, Duration, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const FIRST_NAMES: [&str; 16] = [
    "John", "Jane", "Michael", "Sarah", "David", "Emma", "Chris", "Lisa", "James", "Mary",
    "Robert", "Patricia", "William", "Jennifer", "Richard", "Linda",
];

pub const LAST_NAMES: [&str; 16] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Wilson", "Anderson", "Taylor", "Thomas", "Moore", "Jackson",
];

pub const ADDED_BY_USERS: [&str; 5] = ["Admin", "Sales Team", "Support", "Marketing", "Manager"];

pub const AVATAR_COLORS: [&str; 6] = [
    "#3b82f6", "#8b5cf6", "#ec4899", "#f59e0b", "#10b981", "#06b6d4",
];

/// Exclusive upper bound of generated scores.
pub const SCORE_CEILING: u8 = 100;

/// Deterministic record factory.
#[derive(Debug, Clone)]
pub struct RecordGenerator {
    anchor: DateTime<Utc>,
    rng: ChaCha8Rng,
}

impl RecordGenerator {
    /// `anchor` is the instant last-activity timestamps count back from.
    pub fn new(seed: u64, anchor: DateTime<Utc>) -> Self {
        Self {
            anchor,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    /// Build the record at `ordinal` with an explicit score.
    pub fn record(&self, ordinal: u32, score: u8) -> Record {
        let i = ordinal as usize;
        let first = FIRST_NAMES[i % FIRST_NAMES.len()];
        let last = LAST_NAMES[(i / FIRST_NAMES.len()) % LAST_NAMES.len()];

        Record {
            id: RecordId::new(ordinal),
            name: format!("{first} {last}"),
            phone: phone_for(ordinal),
            email: email_for(first, last, ordinal),
            score,
            last_activity: self.anchor - Duration::days(i64::from(ordinal % 365)),
            added_by: ADDED_BY_USERS[i % ADDED_BY_USERS.len()],
            avatar: AVATAR_COLORS[i % AVATAR_COLORS.len()],
        }
    }

    /// Build the record at `ordinal`, drawing its score from the seeded stream.
    pub fn next_record(&mut self, ordinal: u32) -> Record {
        let score = self.rng.gen_range(0..SCORE_CEILING);
        self.record(ordinal, score)
    }

    /// Generate ordinals `1..=count`.
    pub fn generate(&mut self, count: u32) -> Vec<Record> {
        let mut records = Vec::with_capacity(count as usize);
        for ordinal in 1..=count {
            records.push(self.next_record(ordinal));
        }
        records
    }
}

/// `+1 (AAA) PPP-LLLL`
pub fn phone_for(ordinal: u32) -> String {
    let area = 200 + ordinal % 800;
    let prefix = 100 + ordinal % 900;
    let line = 1000 + ordinal % 9000;
    format!("+1 ({area}) {prefix}-{line}")
}

pub fn email_for(first: &str, last: &str, ordinal: u32) -> String {
    format!(
        "{}.{}{}@example.com",
        first.to_lowercase(),
        last.to_lowercase(),
        ordinal
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_fields_follow_ordinal() {
        let generator = RecordGenerator::new(1, anchor());
        let record = generator.record(17, 55);

        assert_eq!(record.id, RecordId::new(17));
        assert_eq!(record.name, "Jane Johnson");
        assert_eq!(record.email, "jane.johnson17@example.com");
        assert_eq!(record.phone, "+1 (217) 117-1017");
        assert_eq!(record.added_by, "Support");
        assert_eq!(record.avatar, "#06b6d4");
        assert_eq!(record.last_activity, anchor() - Duration::days(17));
    }

    #[test]
    fn test_last_activity_wraps_yearly() {
        let generator = RecordGenerator::new(1, anchor());
        assert_eq!(generator.record(365, 0).last_activity, anchor());
        assert_eq!(
            generator.record(366, 0).last_activity,
            anchor() - Duration::days(1)
        );
    }

    #[test]
    fn test_same_seed_same_scores() {
        let first = RecordGenerator::new(99, anchor()).generate(200);
        let second = RecordGenerator::new(99, anchor()).generate(200);
        assert_eq!(first, second);
        assert!(first.iter().all(|r| r.score < SCORE_CEILING));
    }

    #[test]
    fn test_different_seed_changes_only_scores() {
        let first = RecordGenerator::new(1, anchor()).generate(50);
        let second = RecordGenerator::new(2, anchor()).generate(50);

        assert_ne!(
            first.iter().map(|r| r.score).collect::<Vec<_>>(),
            second.iter().map(|r| r.score).collect::<Vec<_>>()
        );
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.email, b.email);
        }
    }
}
