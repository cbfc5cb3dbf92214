//! Query engine: one full search, filter and sort pass over the store.
//!
//! The engine never reorders or mutates the store. Every call builds a fresh [`View`]
//! holding store positions, so the cost is O(N) to scan plus O(M log M) to sort the M
//! survivors.

use crate::query::filter::FilterSet;
use crate::query::sort::{case_tiebreak, collation_key, SortState};
use crate::store::{Record, RecordId, RecordStore};
use std::ops::Range;
use std::time::Instant;

/// Ordered, filtered sequence of references into a [`RecordStore`].
#[derive(Debug, Clone)]
pub struct View {
    store: RecordStore,
    positions: Vec<u32>,
}

impl View {
    /// Every record, in store order.
    pub fn all(store: &RecordStore) -> Self {
        Self {
            store: store.clone(),
            positions: (0..store.len() as u32).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Record at view position `index`.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.positions
            .get(index)
            .and_then(|&position| self.store.at(position as usize))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.positions
            .iter()
            .filter_map(|&position| self.store.at(position as usize))
    }

    /// Records in `range` paired with their view positions. The range is clamped to the view.
    pub fn slice(&self, range: Range<usize>) -> impl Iterator<Item = (usize, &Record)> + '_ {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        (start..end).filter_map(move |index| self.get(index).map(|record| (index, record)))
    }

    /// Identities of the records in `range`.
    pub fn ids_in(&self, range: Range<usize>) -> Vec<RecordId> {
        self.slice(range).map(|(_, record)| record.id).collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.iter().map(|record| record.id)
    }
}

/// Run search, filters and sort against the full store.
///
/// Search is a case-insensitive substring match against name, email and phone; empty
/// text matches everything. Filters AND-combine. Sorting is stable, so records that
/// compare equal keep their store order.
pub fn apply(store: &RecordStore, search: &str, filters: &FilterSet, sort: SortState) -> View {
    let started = Instant::now();
    let needle = search.to_lowercase();
    let records = store.records();

    let mut positions: Vec<u32> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_search(record, &needle) && filters.matches(record))
        .map(|(position, _)| position as u32)
        .collect();

    sort_positions(records, &mut positions, sort);

    log::debug!(
        "Query pass matched {} of {} records in {:?} (search={:?}, filters={}, sort={:?})",
        positions.len(),
        records.len(),
        started.elapsed(),
        search,
        filters.len(),
        sort
    );

    View {
        store: store.clone(),
        positions,
    }
}

/// Stable sort of store positions. Text columns build one collation key per survivor up
/// front; comparisons then reduce to byte slices plus a rare case tiebreak.
fn sort_positions(records: &[Record], positions: &mut Vec<u32>, sort: SortState) {
    let SortState::Sorted { field, direction } = sort else {
        return;
    };
    let text = |position: u32| field.text(&records[position as usize]).unwrap_or_default();

    if !field.is_text() {
        positions.sort_by(|&a, &b| sort.compare(&records[a as usize], &records[b as usize]));
        return;
    }

    let mut keyed: Vec<(Box<[u8]>, u32)> = positions
        .iter()
        .map(|&position| (collation_key(text(position)), position))
        .collect();
    keyed.sort_by(|(key_a, a), (key_b, b)| {
        direction.apply(
            key_a
                .cmp(key_b)
                .then_with(|| case_tiebreak(text(*a), text(*b))),
        )
    });
    *positions = keyed.into_iter().map(|(_, position)| position).collect();
}

/// True if any searchable field contains `needle`, which must already be lowercase.
pub fn matches_search(record: &Record, needle: &str) -> bool {
    needle.is_empty()
        || contains_folded(&record.name, needle)
        || contains_folded(&record.email, needle)
        || contains_folded(&record.phone, needle)
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if !needle.is_ascii() {
        return haystack.to_lowercase().contains(needle);
    }
    let (haystack, needle) = (haystack.as_bytes(), needle.as_bytes());
    haystack.windows(needle.len()).any(|window| {
        window
            .iter()
            .zip(needle)
            .all(|(h, n)| h.to_ascii_lowercase() == *n)
    })
}
