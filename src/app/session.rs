//! Browsing session: the single owner of query, view, viewport and selection state.
//!
//! Data flows one way: store -> query engine -> windower -> rendered rows. The engine only
//! re-runs on a query trigger (applied search change, filter change, sort change), never
//! on scroll or resize. Selection is keyed by record identity and survives refiltering.

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::query::{Filter, QueryState, SortField, SortPreset, SortState, View};
use crate::selection::SelectionSet;
use crate::store::{Record, RecordId, RecordStore};
use crate::viewport::{ViewportState, WindowRange, Windower};
use std::time::Instant;

#[derive(Debug)]
pub struct Session {
    store: RecordStore,
    query: QueryState,
    view: View,
    windower: Windower,
    viewport: ViewportState,
    selection: SelectionSet,
    cursor: usize,
    passes: u64,
}

impl Session {
    /// Create a session and run the initial (empty) query.
    pub fn new(store: RecordStore, config: &ViewerConfig) -> Self {
        let query = QueryState::new(config.debounce());
        let view = query.evaluate(&store);
        Self {
            store,
            query,
            view,
            windower: Windower::from_config(config),
            viewport: ViewportState::new(),
            selection: SelectionSet::new(),
            cursor: 0,
            passes: 1,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn windower(&self) -> &Windower {
        &self.windower
    }

    /// View index of the keyboard cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of query engine passes run so far, including the initial one.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn total_count(&self) -> usize {
        self.store.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.view.len()
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn sort(&self) -> SortState {
        self.query.sort()
    }

    // Window

    pub fn window(&self) -> WindowRange {
        self.windower.compute(self.view.len(), &self.viewport)
    }

    /// Materialized rows with their view indices.
    pub fn window_rows(&self) -> impl Iterator<Item = (usize, &Record)> + '_ {
        self.view.slice(self.window().range())
    }

    pub fn window_ids(&self) -> Vec<RecordId> {
        self.view.ids_in(self.window().range())
    }

    /// First view index intersecting the container.
    pub fn first_visible(&self) -> usize {
        self.windower
            .visible_rows(self.view.len(), &self.viewport)
            .start
    }

    // Query triggers

    /// Record typed search text; it is applied once input stays quiet.
    pub fn set_search_text(&mut self, text: impl Into<String>, now: Instant) {
        self.query.set_search_input(text, now);
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.query.search_deadline()
    }

    /// Apply due search text. Returns true if the view was recomputed.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        let changed = self.query.poll_search(now);
        self.recompute_if(changed)
    }

    /// Apply pending search text without waiting for the quiet period.
    pub fn commit_search(&mut self) -> bool {
        let changed = self.query.commit_search();
        self.recompute_if(changed)
    }

    pub fn clear_search(&mut self) -> bool {
        let changed = self.query.clear_search();
        self.recompute_if(changed)
    }

    pub fn add_filter(&mut self, filter: Filter) -> bool {
        let changed = self.query.add_filter(filter);
        self.recompute_if(changed)
    }

    /// Parse filter text (relative dates resolve against the store anchor) and add it.
    pub fn add_filter_text(&mut self, text: &str) -> Result<bool> {
        let filter = Filter::parse(text, self.store.anchor())?;
        Ok(self.add_filter(filter))
    }

    pub fn remove_filter(&mut self, filter: &Filter) -> bool {
        let changed = self.query.remove_filter(filter);
        self.recompute_if(changed)
    }

    /// Remove the most recently added filter.
    pub fn pop_filter(&mut self) -> Option<Filter> {
        let removed = self.query.pop_filter();
        self.recompute_if(removed.is_some());
        removed
    }

    pub fn clear_filters(&mut self) -> bool {
        let changed = self.query.clear_filters();
        self.recompute_if(changed)
    }

    /// Header click: cycles the sort for `field` and recomputes.
    pub fn click_sort(&mut self, field: SortField) -> SortState {
        let sort = self.query.click_sort(field);
        self.recompute();
        sort
    }

    pub fn set_sort(&mut self, sort: SortState) -> bool {
        let changed = self.query.set_sort(sort);
        self.recompute_if(changed)
    }

    pub fn apply_preset(&mut self, preset: SortPreset) -> bool {
        let changed = self.query.apply_preset(preset);
        self.recompute_if(changed)
    }

    fn recompute_if(&mut self, changed: bool) -> bool {
        if changed {
            self.recompute();
        }
        changed
    }

    fn recompute(&mut self) {
        self.view = self.query.evaluate(&self.store);
        self.passes += 1;
        self.viewport.scroll_offset = self.windower.clamp_scroll(
            self.viewport.scroll_offset,
            self.view.len(),
            &self.viewport,
        );
        self.cursor = self.cursor.min(self.view.len().saturating_sub(1));
    }

    // Viewport

    /// Set the scroll offset in pixels, clamped to the content.
    pub fn scroll_to(&mut self, offset: u64) {
        self.viewport.scroll_offset =
            self.windower
                .clamp_scroll(offset, self.view.len(), &self.viewport);
        self.keep_cursor_visible();
    }

    /// Scroll by whole rows (negative scrolls up).
    pub fn scroll_by_rows(&mut self, rows: i64) {
        let delta = rows.unsigned_abs().saturating_mul(self.windower.row_height());
        let offset = if rows < 0 {
            self.viewport.scroll_offset.saturating_sub(delta)
        } else {
            self.viewport.scroll_offset.saturating_add(delta)
        };
        self.scroll_to(offset);
    }

    /// Container resized; `container_height` is in pixels.
    pub fn resize(&mut self, container_height: u64) {
        self.viewport.container_height = Some(container_height);
        self.viewport.scroll_offset = self.windower.clamp_scroll(
            self.viewport.scroll_offset,
            self.view.len(),
            &self.viewport,
        );
        self.reveal_cursor();
    }

    pub fn rows_per_page(&self) -> usize {
        self.windower.rows_per_page(&self.viewport)
    }

    /// Move the cursor by `rows` and scroll it into view.
    pub fn move_cursor(&mut self, rows: i64) {
        let target = if rows < 0 {
            self.cursor.saturating_sub(rows.unsigned_abs() as usize)
        } else {
            self.cursor.saturating_add(rows as usize)
        };
        self.cursor_to(target);
    }

    pub fn cursor_to(&mut self, index: usize) {
        self.cursor = index.min(self.view.len().saturating_sub(1));
        self.reveal_cursor();
    }

    pub fn page_down(&mut self) {
        self.move_cursor(self.rows_per_page() as i64);
    }

    pub fn page_up(&mut self) {
        self.move_cursor(-(self.rows_per_page() as i64));
    }

    pub fn go_to_start(&mut self) {
        self.cursor_to(0);
    }

    pub fn go_to_end(&mut self) {
        self.cursor_to(self.view.len().saturating_sub(1));
    }

    fn reveal_cursor(&mut self) {
        if self.view.is_empty() {
            self.viewport.scroll_offset = 0;
            return;
        }
        let offset = self.windower.reveal(self.cursor, &self.viewport);
        self.viewport.scroll_offset =
            self.windower
                .clamp_scroll(offset, self.view.len(), &self.viewport);
    }

    fn keep_cursor_visible(&mut self) {
        let visible = self.windower.visible_rows(self.view.len(), &self.viewport);
        if visible.is_empty() {
            return;
        }
        let rows_per_page = self.rows_per_page();
        let last_full = (visible.start + rows_per_page)
            .min(visible.end)
            .saturating_sub(1)
            .max(visible.start);
        self.cursor = self.cursor.clamp(visible.start, last_full);
    }

    // Selection

    /// Toggle a record; identities absent from the store are ignored.
    pub fn toggle_selection(&mut self, id: RecordId) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        self.selection.toggle(id)
    }

    /// Toggle the record under the cursor. Returns its new state, or `None` for an empty view.
    pub fn toggle_cursor_selection(&mut self) -> Option<bool> {
        let id = self.view.get(self.cursor)?.id;
        Some(self.selection.toggle(id))
    }

    /// "Select all visible": toggles the materialized window only.
    pub fn toggle_select_visible(&mut self) -> bool {
        let ids = self.window_ids();
        self.selection.toggle_all(&ids)
    }

    pub fn all_visible_selected(&self) -> bool {
        self.selection.all_selected(&self.window_ids())
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selection.is_selected(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordGenerator;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    fn config() -> ViewerConfig {
        ViewerConfig {
            row_height: 60,
            default_container_height: 600,
            buffer_rows: 10,
            debounce_ms: 250,
            dataset_size: 1000,
            seed: 7,
            ..ViewerConfig::default()
        }
    }

    fn session_with(count: u32) -> Session {
        let anchor = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        Session::new(RecordStore::generate(count, 7, anchor), &config())
    }

    fn session_with_scores(scores: &[u8]) -> Session {
        let anchor = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let generator = RecordGenerator::new(0, anchor);
        let records = scores
            .iter()
            .enumerate()
            .map(|(i, &score)| generator.record(i as u32 + 1, score))
            .collect();
        let store = RecordStore::from_records(records, anchor).unwrap();
        Session::new(store, &config())
    }

    fn view_scores(session: &Session) -> Vec<u8> {
        session.view().iter().map(|r| r.score).collect()
    }

    #[test]
    fn test_initial_window_uses_default_height() {
        let session = session_with(1000);
        assert_eq!(session.passes(), 1);
        assert_eq!(session.window().range(), 0..20);
        assert_eq!(session.window_rows().count(), 20);
    }

    #[test]
    fn test_rapid_typing_runs_one_pass_with_last_value() {
        let mut session = session_with(1000);
        let start = Instant::now();

        for (i, text) in ["j", "ja", "jan", "jane"].iter().enumerate() {
            session.set_search_text(*text, start + Duration::from_millis(100 * i as u64));
            assert!(!session.poll_search(start + Duration::from_millis(100 * i as u64 + 50)));
        }
        assert_eq!(session.passes(), 1);

        assert!(session.poll_search(start + Duration::from_millis(300 + 250)));
        assert_eq!(session.passes(), 2);
        assert_eq!(session.query().applied_search(), "jane");
        assert!(session.view().iter().all(|r| r.name.starts_with("Jane")));

        assert!(!session.poll_search(start + Duration::from_secs(10)));
        assert_eq!(session.passes(), 2);
    }

    #[test]
    fn test_scroll_and_resize_do_not_rerun_query() {
        let mut session = session_with(1000);
        session.resize(1200);
        session.scroll_by_rows(30);
        session.scroll_to(12_345);
        assert_eq!(session.passes(), 1);
    }

    #[test]
    fn test_reference_window_after_scroll() {
        let mut session = session_with(1000);
        session.resize(600);
        session.scroll_to(1200);
        let window = session.window();
        assert_eq!(window.range(), 10..40);
        assert_eq!(window.top_offset, 600);
        assert_eq!(session.first_visible(), 20);
        assert_eq!(session.cursor(), 20);
    }

    #[test]
    fn test_filter_and_sort_cycle() {
        let mut session = session_with_scores(&[10, 50, 50, 90, 30]);

        assert!(session.add_filter_text("score:26-50").unwrap());
        assert_eq!(view_scores(&session), vec![50, 50, 30]);
        assert!(!session.add_filter_text("score 26-50").unwrap());
        assert_eq!(session.passes(), 2);

        session.click_sort(SortField::Score);
        assert_eq!(view_scores(&session), vec![30, 50, 50]);
        let ids: Vec<u32> = session.view().ids().map(RecordId::get).collect();
        assert_eq!(ids, vec![5, 2, 3]);

        session.click_sort(SortField::Score);
        assert_eq!(view_scores(&session), vec![50, 50, 30]);
        assert_eq!(session.click_sort(SortField::Score), SortState::Unsorted);
        assert_eq!(view_scores(&session), vec![50, 50, 30]);
    }

    #[test]
    fn test_remove_filter_recomputes_once() {
        let mut session = session_with(1000);
        let admin = Filter::added_by("Admin");
        session.add_filter(Filter::score_range(0, 100));
        session.add_filter(admin.clone());
        assert_eq!(session.filtered_count(), 200);
        let passes = session.passes();

        assert!(session.remove_filter(&admin));
        assert_eq!(session.passes(), passes + 1);
        assert_eq!(session.filtered_count(), 1000);
        assert_eq!(session.query().filters().len(), 1);

        assert!(!session.remove_filter(&admin));
        assert_eq!(session.passes(), passes + 1);
    }

    #[test]
    fn test_invalid_filter_text_is_rejected() {
        let mut session = session_with(10);
        assert!(session.add_filter_text("score:90-10").is_err());
        assert!(session.query().filters().is_empty());
        assert_eq!(session.passes(), 1);
    }

    #[test]
    fn test_empty_result_is_valid() {
        let mut session = session_with(100);
        session.set_search_text("no such customer", Instant::now());
        assert!(session.commit_search());
        assert_eq!(session.filtered_count(), 0);
        assert!(session.window().is_empty());
        assert_eq!(session.window().total_height, 0);
        assert_eq!(session.toggle_cursor_selection(), None);
        assert!(!session.toggle_select_visible());
    }

    #[test]
    fn test_scroll_is_clamped_when_view_shrinks() {
        let mut session = session_with(1000);
        session.resize(600);
        session.go_to_end();
        assert_eq!(session.viewport().scroll_offset, 59_400);

        session.add_filter(Filter::added_by("Admin"));
        assert_eq!(session.filtered_count(), 200);
        assert_eq!(session.viewport().scroll_offset, 200 * 60 - 600);
        assert_eq!(session.cursor(), 199);
    }

    #[test]
    fn test_selection_survives_refilter() {
        let mut session = session_with(100);
        // ordinal 1 was added by "Sales Team"
        assert!(session.toggle_selection(RecordId::new(1)));
        session.add_filter(Filter::added_by("Admin"));
        assert!(session.view().ids().all(|id| id != RecordId::new(1)));
        assert!(session.is_selected(RecordId::new(1)));

        session.clear_filters();
        assert!(session.is_selected(RecordId::new(1)));
    }

    #[test]
    fn test_unknown_ids_never_enter_selection() {
        let mut session = session_with(10);
        assert!(!session.toggle_selection(RecordId::new(11)));
        assert!(!session.toggle_selection(RecordId::new(0)));
        assert_eq!(session.selected_count(), 0);
    }

    #[test]
    fn test_select_visible_targets_window_only() {
        let mut session = session_with(1000);
        session.resize(600);
        session.scroll_to(1200);

        assert!(session.toggle_select_visible());
        assert_eq!(session.selected_count(), 30);
        assert!(session.all_visible_selected());
        assert!(session.is_selected(RecordId::new(11)));
        assert!(!session.is_selected(RecordId::new(10)));
        assert!(!session.is_selected(RecordId::new(41)));

        assert!(!session.toggle_select_visible());
        assert_eq!(session.selected_count(), 0);
    }

    #[test]
    fn test_cursor_navigation() {
        let mut session = session_with(100);
        session.resize(600);

        session.move_cursor(15);
        assert_eq!(session.cursor(), 15);
        assert_eq!(session.viewport().scroll_offset, 16 * 60 - 600);

        session.page_up();
        assert_eq!(session.cursor(), 5);
        session.move_cursor(-50);
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.viewport().scroll_offset, 0);

        session.go_to_end();
        assert_eq!(session.cursor(), 99);
        assert_eq!(session.toggle_cursor_selection(), Some(true));
        assert!(session.is_selected(RecordId::new(100)));
    }
}
