//! Record store: the full, immutable customer dataset.
//!
//! A [`RecordStore`] is an explicitly constructed value that is cheap to clone (the records
//! sit behind an `Arc`), so the pipeline and tests can inject small synthetic stores. The
//! binary uses [`RecordStore::shared_with`], a process-wide memoized instance that pays the
//! generation cost once.

pub mod generator;
pub mod record;

pub use generator::RecordGenerator;
pub use record::{Record, RecordId};

use crate::config::ViewerConfig;
use crate::error::{Result, RollcallError};
use chrono::{DateTime, Utc};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

static SHARED_STORE: OnceLock<RecordStore> = OnceLock::new();

/// Immutable dataset indexed by record ordinal.
///
/// Records are stored in ordinal order, so `RecordId(n)` lives at position `n - 1`.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Arc<[Record]>,
    anchor: DateTime<Utc>,
}

impl RecordStore {
    /// Generate `count` records with the given score seed.
    pub fn generate(count: u32, seed: u64, anchor: DateTime<Utc>) -> Self {
        let started = Instant::now();
        let records = RecordGenerator::new(seed, anchor).generate(count);
        log::info!(
            "Generated {} customers in {:?}",
            records.len(),
            started.elapsed()
        );
        Self {
            records: records.into(),
            anchor,
        }
    }

    /// Generate a store sized and seeded by `config`.
    pub fn from_config(config: &ViewerConfig, anchor: DateTime<Utc>) -> Self {
        let count = u32::try_from(config.dataset_size).unwrap_or(u32::MAX);
        Self::generate(count, config.seed, anchor)
    }

    /// Wrap prepared records. Ids must be the ordinals `1..=len` in order.
    pub fn from_records(records: Vec<Record>, anchor: DateTime<Utc>) -> Result<Self> {
        for (position, record) in records.iter().enumerate() {
            if record.id.get() as usize != position + 1 {
                return Err(RollcallError::invalid_argument(format!(
                    "record at position {position} has id {}, expected {}",
                    record.id,
                    position + 1
                )));
            }
        }
        Ok(Self {
            records: records.into(),
            anchor,
        })
    }

    /// Process-wide store, built by `init` on first access.
    ///
    /// Later calls return the memoized store and never run `init`.
    pub fn shared_with(init: impl FnOnce() -> RecordStore) -> RecordStore {
        SHARED_STORE.get_or_init(init).clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Instant the last-activity timestamps were generated against.
    pub fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Record at a 0-based store position.
    pub fn at(&self, position: usize) -> Option<&Record> {
        self.records.get(position)
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        (id.get() as usize)
            .checked_sub(1)
            .and_then(|position| self.records.get(position))
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }
}
