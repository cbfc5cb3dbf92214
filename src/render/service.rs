//! Render loop coordination.
//!
//! Applies [`InputAction`]s to the [`Session`] and rebuilds the [`ViewState`] snapshot that
//! the renderer draws. One terminal line shows one row, so the container height handed to
//! the windower is the body line count times the configured row height.

use crate::app::Session;
use crate::input::InputAction;
use crate::render::ui::state::{PromptKind, RowView, ViewState};
use chrono::{DateTime, Utc};
use std::time::Instant;

#[derive(Debug)]
pub struct RenderLoopState {
    row_height: u64,
}

impl RenderLoopState {
    pub fn new(row_height: u64) -> Self {
        Self {
            row_height: row_height.max(1),
        }
    }

    /// Apply one action. Returns false when the loop should stop.
    pub fn process_action(
        &mut self,
        action: InputAction,
        session: &mut Session,
        view_state: &mut ViewState,
        now: Instant,
    ) -> bool {
        if !matches!(
            action,
            InputAction::Resize { .. } | InputAction::Scroll { .. } | InputAction::NoAction
        ) {
            view_state.status_line.clear_message();
        }

        match action {
            InputAction::Quit => return false,
            InputAction::Scroll { direction, rows } => {
                session.scroll_by_rows(direction.signed(rows))
            }
            InputAction::MoveCursor { direction, rows } => {
                session.move_cursor(direction.signed(rows))
            }
            InputAction::PageUp => session.page_up(),
            InputAction::PageDown => session.page_down(),
            InputAction::GoToStart => session.go_to_start(),
            InputAction::GoToEnd => session.go_to_end(),
            InputAction::StartSearch => {
                let current = session.query().search_input().to_string();
                view_state
                    .status_line
                    .open_prompt(PromptKind::Search, current);
            }
            InputAction::UpdateSearch { text } => {
                view_state
                    .status_line
                    .open_prompt(PromptKind::Search, text.clone());
                session.set_search_text(text, now);
            }
            InputAction::CommitSearch => {
                view_state.status_line.close_prompt();
                session.commit_search();
            }
            InputAction::ClearSearch => {
                view_state.status_line.close_prompt();
                session.clear_search();
            }
            InputAction::StartFilter => {
                view_state
                    .status_line
                    .open_prompt(PromptKind::Filter, String::new());
            }
            InputAction::UpdateFilterBuffer { buffer } => {
                view_state
                    .status_line
                    .open_prompt(PromptKind::Filter, buffer);
            }
            InputAction::SubmitFilter { text } => {
                view_state.status_line.close_prompt();
                match session.add_filter_text(&text) {
                    Ok(true) => {}
                    Ok(false) => view_state.status_line.set_message("Filter already active"),
                    Err(err) => view_state.status_line.set_message(err.to_string()),
                }
            }
            InputAction::CancelFilter => view_state.status_line.close_prompt(),
            InputAction::PopFilter => match session.pop_filter() {
                Some(filter) => view_state
                    .status_line
                    .set_message(format!("Removed {}", filter.label())),
                None => view_state.status_line.set_message("No active filters"),
            },
            InputAction::ClearFilters => {
                session.clear_filters();
            }
            InputAction::SortBy(field) => {
                session.click_sort(field);
            }
            InputAction::ApplyPreset(preset) => {
                session.apply_preset(preset);
                view_state
                    .status_line
                    .set_message(format!("Sorted by {}", preset.label()));
            }
            InputAction::ToggleSelection => {
                session.toggle_cursor_selection();
            }
            InputAction::ToggleSelectVisible => {
                session.toggle_select_visible();
            }
            InputAction::Resize { width, height } => {
                self.resize(session, view_state, width, height);
            }
            InputAction::NoAction | InputAction::InvalidInput => {}
        }
        true
    }

    /// Adopt new terminal dimensions.
    pub fn resize(
        &mut self,
        session: &mut Session,
        view_state: &mut ViewState,
        width: u16,
        height: u16,
    ) {
        view_state.update_terminal_size(width, height);
        session.resize(u64::from(view_state.body_lines()) * self.row_height);
    }

    /// Rebuild the snapshot from the session.
    pub fn sync(&self, session: &Session, view_state: &mut ViewState, now: DateTime<Utc>) {
        let window = session.window();
        let skip = session.first_visible().saturating_sub(window.start);
        let body = usize::from(view_state.body_lines());

        view_state.rows = session
            .window_rows()
            .skip(skip)
            .take(body)
            .map(|(index, record)| {
                RowView::from_record(index, record, session.is_selected(record.id), now)
            })
            .collect();
        view_state.cursor = session.cursor();
        view_state.sort = session.sort();
        view_state.filter_labels = session.query().filters().labels();
        view_state.search_text = session.query().search_input().to_string();
        view_state.search_pending = session.search_deadline().is_some();
        view_state.total_count = session.total_count();
        view_state.filtered_count = session.filtered_count();
        view_state.selected_count = session.selected_count();
        view_state.all_visible_selected = session.all_visible_selected();
    }
}
