//! Query state owner.
//!
//! Holds the search text (raw and applied), the active filters and the sort directive.
//! Every mutator reports whether the applied query changed, so the owner knows exactly
//! when a new engine pass is due. Raw search text is routed through a [`Debouncer`] and
//! only becomes the applied search once input has been quiet for the configured interval.

use crate::query::debounce::Debouncer;
use crate::query::engine::{self, View};
use crate::query::filter::{Filter, FilterSet};
use crate::query::sort::{SortField, SortPreset, SortState};
use crate::store::RecordStore;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct QueryState {
    search_input: String,
    applied_search: String,
    filters: FilterSet,
    sort: SortState,
    debouncer: Debouncer<String>,
}

impl QueryState {
    pub fn new(debounce: Duration) -> Self {
        Self {
            search_input: String::new(),
            applied_search: String::new(),
            filters: FilterSet::new(),
            sort: SortState::Unsorted,
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Search text as typed, possibly not yet applied.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Search text the current view was computed with.
    pub fn applied_search(&self) -> &str {
        &self.applied_search
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// Record new search text and (re)start the quiet period.
    pub fn set_search_input(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.search_input.clone_from(&text);
        if self.debouncer.push(text, now) {
            log::trace!("Superseded pending search text");
        }
    }

    /// When the pending search text becomes due, if any.
    pub fn search_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Apply pending search text whose quiet period has elapsed.
    ///
    /// Returns true if the applied search changed.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(text) => self.apply_search(text),
            None => false,
        }
    }

    /// Apply pending search text immediately.
    pub fn commit_search(&mut self) -> bool {
        match self.debouncer.flush() {
            Some(text) => self.apply_search(text),
            None => false,
        }
    }

    /// Drop pending and applied search text.
    pub fn clear_search(&mut self) -> bool {
        self.debouncer.cancel();
        self.search_input.clear();
        self.apply_search(String::new())
    }

    fn apply_search(&mut self, text: String) -> bool {
        if text == self.applied_search {
            return false;
        }
        self.applied_search = text;
        true
    }

    /// Add a filter; duplicates are ignored.
    pub fn add_filter(&mut self, filter: Filter) -> bool {
        let label = filter.label();
        let added = self.filters.add(filter);
        if added {
            log::debug!("Added filter {label}");
        }
        added
    }

    pub fn remove_filter(&mut self, filter: &Filter) -> bool {
        let removed = self.filters.remove(filter);
        if removed {
            log::debug!("Removed filter {}", filter.label());
        }
        removed
    }

    /// Remove the most recently added filter.
    pub fn pop_filter(&mut self) -> Option<Filter> {
        let last = self.filters.len().checked_sub(1)?;
        self.filters.remove_at(last)
    }

    pub fn clear_filters(&mut self) -> bool {
        self.filters.clear()
    }

    /// Header click on `field`; returns the new directive.
    pub fn click_sort(&mut self, field: SortField) -> SortState {
        self.sort = self.sort.cycle(field);
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortState) -> bool {
        let changed = self.sort != sort;
        self.sort = sort;
        changed
    }

    pub fn apply_preset(&mut self, preset: SortPreset) -> bool {
        self.set_sort(preset.sort_state())
    }

    /// Run the engine with the applied query.
    pub fn evaluate(&self, store: &RecordStore) -> View {
        engine::apply(store, &self.applied_search, &self.filters, self.sort)
    }
}
