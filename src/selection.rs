//! Selection set.
//!
//! Tracks selected record identities independently of the current view and window:
//! a record stays selected when a filter hides it or when it scrolls out of the window.

use crate::store::RecordId;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    selected: HashSet<RecordId>,
    last_bulk: Option<BulkToggle>,
}

/// Membership changes made by the latest [`SelectionSet::toggle_all`].
#[derive(Debug, Clone)]
struct BulkToggle {
    scope: Vec<RecordId>,
    changed: Vec<RecordId>,
    selected: bool,
}

impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.selected == other.selected
    }
}

impl Eq for SelectionSet {}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`; returns whether it is now selected.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        self.last_bulk = None;
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    pub fn select_all(&mut self, ids: &[RecordId]) {
        self.last_bulk = None;
        self.selected.extend(ids.iter().copied());
    }

    pub fn deselect_all(&mut self, ids: &[RecordId]) {
        self.last_bulk = None;
        for id in ids {
            self.selected.remove(id);
        }
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selected.contains(&id)
    }

    /// True iff `ids` is non-empty and every member is selected.
    pub fn all_selected(&self, ids: &[RecordId]) -> bool {
        !ids.is_empty() && ids.iter().all(|id| self.selected.contains(id))
    }

    /// "Select all visible" checkbox: deselect `ids` if all are selected, else select them.
    ///
    /// A repeated toggle over the same `ids`, with no selection change in between, undoes
    /// the previous one exactly, so records that were selected beforehand stay selected.
    /// Returns whether `ids` ended up selected.
    pub fn toggle_all(&mut self, ids: &[RecordId]) -> bool {
        if let Some(previous) = self.last_bulk.take() {
            if previous.scope == ids {
                self.revert(&previous);
                return self.all_selected(ids);
            }
        }

        let select = !self.all_selected(ids);
        let changed: Vec<RecordId> = if select {
            ids.iter()
                .copied()
                .filter(|id| self.selected.insert(*id))
                .collect()
        } else {
            ids.iter()
                .copied()
                .filter(|id| self.selected.remove(id))
                .collect()
        };
        self.last_bulk = Some(BulkToggle {
            scope: ids.to_vec(),
            changed,
            selected: select,
        });
        select && !ids.is_empty()
    }

    fn revert(&mut self, bulk: &BulkToggle) {
        for id in &bulk.changed {
            if bulk.selected {
                self.selected.remove(id);
            } else {
                self.selected.insert(*id);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.last_bulk = None;
        self.selected.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.selected.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: std::ops::Range<u32>) -> Vec<RecordId> {
        range.map(RecordId::new).collect()
    }

    #[test]
    fn test_toggle() {
        let mut selection = SelectionSet::new();
        assert!(selection.toggle(RecordId::new(4)));
        assert!(selection.is_selected(RecordId::new(4)));
        assert!(!selection.toggle(RecordId::new(4)));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_all_selected_requires_members() {
        let mut selection = SelectionSet::new();
        assert!(!selection.all_selected(&[]));

        selection.select_all(&ids(1..4));
        assert!(selection.all_selected(&ids(1..4)));
        assert!(!selection.all_selected(&ids(1..5)));
    }

    #[test]
    fn test_deselect_only_touches_given_ids() {
        let mut selection = SelectionSet::new();
        selection.select_all(&ids(1..10));
        selection.deselect_all(&ids(3..6));
        assert_eq!(selection.len(), 6);
        assert!(selection.is_selected(RecordId::new(2)));
        assert!(!selection.is_selected(RecordId::new(4)));
    }

    #[test]
    fn test_toggle_all_twice_restores_partial_selection() {
        let mut selection = SelectionSet::new();
        selection.toggle(RecordId::new(2));
        selection.toggle(RecordId::new(40));
        let before = selection.clone();
        let visible = ids(1..4);

        assert!(selection.toggle_all(&visible));
        assert!(selection.all_selected(&visible));
        assert!(!selection.toggle_all(&visible));

        assert_eq!(selection, before);
        assert!(selection.is_selected(RecordId::new(2)));
        assert!(!selection.is_selected(RecordId::new(1)));
    }

    #[test]
    fn test_toggle_all_twice_restores_from_fully_selected_or_empty() {
        let visible = ids(10..20);

        let mut empty = SelectionSet::new();
        assert!(empty.toggle_all(&visible));
        assert!(!empty.toggle_all(&visible));
        assert_eq!(empty, SelectionSet::new());

        let mut full = SelectionSet::new();
        full.select_all(&visible);
        full.select_all(&ids(50..52));
        let before = full.clone();
        assert!(!full.toggle_all(&visible));
        assert!(full.toggle_all(&visible));
        assert_eq!(full, before);
    }

    #[test]
    fn test_toggle_all_on_new_scope_starts_fresh() {
        let mut selection = SelectionSet::new();
        selection.toggle_all(&ids(1..4));
        // A different window: plain select-all semantics apply again.
        assert!(selection.toggle_all(&ids(3..6)));
        assert_eq!(selection.len(), 5);

        // An individual toggle in between also ends the undo pairing.
        selection.toggle(RecordId::new(9));
        assert!(!selection.toggle_all(&ids(3..6)));
        assert!(!selection.is_selected(RecordId::new(3)));
        assert!(selection.is_selected(RecordId::new(9)));
    }

    #[test]
    fn test_toggle_all_with_no_ids() {
        let mut selection = SelectionSet::new();
        assert!(!selection.toggle_all(&[]));
        assert!(selection.is_empty());
    }
}
