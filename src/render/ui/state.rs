//! Render snapshot.
//!
//! [`ViewState`] holds exactly what one frame needs: the rows visible in the terminal,
//! counts for the status display, the sort indicator and any open prompt. It is rebuilt
//! from the session after each batch of actions and never reaches back into it.

use crate::query::{SortField, SortState};
use crate::render::ui::format::{format_count, relative_label};
use crate::store::{Record, RecordId};
use chrono::{DateTime, Utc};

/// Title, search bar, column header and status line.
pub const CHROME_LINES: u16 = 4;

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Position in the current view
    pub index: usize,
    pub id: RecordId,
    pub initials: String,
    pub avatar: &'static str,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub score: u8,
    pub activity: String,
    pub added_by: &'static str,
    pub selected: bool,
}

impl RowView {
    pub fn from_record(index: usize, record: &Record, selected: bool, now: DateTime<Utc>) -> Self {
        Self {
            index,
            id: record.id,
            initials: record.initials(),
            avatar: record.avatar,
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            score: record.score,
            activity: relative_label(record.last_activity, now),
            added_by: record.added_by,
            selected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Search,
    Filter,
}

impl PromptKind {
    pub fn indicator(self) -> char {
        match self {
            PromptKind::Search => '/',
            PromptKind::Filter => ':',
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
    pub prompt: Option<(PromptKind, String)>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn open_prompt(&mut self, kind: PromptKind, buffer: impl Into<String>) {
        self.prompt = Some((kind, buffer.into()));
    }

    pub fn close_prompt(&mut self) {
        self.prompt = None;
    }

    pub fn format(&self) -> String {
        match (&self.prompt, &self.message) {
            (Some((kind, buffer)), _) => format!("{}{}", kind.indicator(), buffer),
            (None, Some(message)) => message.clone(),
            (None, None) => KEY_HINTS.to_string(),
        }
    }
}

const KEY_HINTS: &str =
    "/ search  : filter  x clear  1-5 sort  r/h/z presets  space select  a select visible  q quit";

#[derive(Debug)]
pub struct ViewState {
    /// Rows intersecting the terminal body, top first
    pub rows: Vec<RowView>,
    /// View index under the keyboard cursor
    pub cursor: usize,
    pub sort: SortState,
    pub filter_labels: Vec<String>,
    /// Search text as typed
    pub search_text: String,
    /// Typed text not yet applied
    pub search_pending: bool,
    pub total_count: usize,
    pub filtered_count: usize,
    pub selected_count: usize,
    pub all_visible_selected: bool,
    pub status_line: StatusLine,
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl ViewState {
    pub fn new(viewport_width: u16, viewport_height: u16) -> Self {
        Self {
            rows: Vec::new(),
            cursor: 0,
            sort: SortState::Unsorted,
            filter_labels: Vec::new(),
            search_text: String::new(),
            search_pending: false,
            total_count: 0,
            filtered_count: 0,
            selected_count: 0,
            all_visible_selected: false,
            status_line: StatusLine::new(),
            viewport_width,
            viewport_height,
        }
    }

    /// Terminal lines available for rows.
    pub fn body_lines(&self) -> u16 {
        self.viewport_height.saturating_sub(CHROME_LINES)
    }

    /// Returns true if the dimensions changed.
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;
        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
            self.rows.clear();
        }
        changed
    }

    /// "1,234 of 1,000,000 customers", plus the selected count when non-zero.
    pub fn counts_line(&self) -> String {
        let mut line = format!(
            "{} of {} customers",
            format_count(self.filtered_count),
            format_count(self.total_count)
        );
        if self.selected_count > 0 {
            line.push_str(&format!(" · {} selected", format_count(self.selected_count)));
        }
        line
    }

    /// Column title with the sort indicator when `field` is the active sort.
    pub fn header_label(&self, field: SortField) -> String {
        match self.sort.direction_for(field) {
            Some(direction) => format!("{} {}", field.label(), direction.indicator()),
            None => field.label().to_string(),
        }
    }

    pub fn format_status_line(&self) -> String {
        self.status_line.format()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_state_creation() {
        let state = ViewState::new(80, 24);
        assert!(state.rows.is_empty());
        assert_eq!(state.body_lines(), 20);
        assert_eq!(ViewState::new(80, 2).body_lines(), 0);
    }

    #[test]
    fn test_counts_line() {
        let mut state = ViewState::new(80, 24);
        state.total_count = 1_000_000;
        state.filtered_count = 62_500;
        assert_eq!(state.counts_line(), "62,500 of 1,000,000 customers");

        state.selected_count = 3;
        assert_eq!(
            state.counts_line(),
            "62,500 of 1,000,000 customers · 3 selected"
        );
    }

    #[test]
    fn test_header_label_shows_direction() {
        let mut state = ViewState::new(80, 24);
        assert_eq!(state.header_label(SortField::Score), "Score");

        state.sort = SortState::descending(SortField::Score);
        assert_eq!(state.header_label(SortField::Score), "Score ▼");
        assert_eq!(state.header_label(SortField::Name), "Name");
    }

    #[test]
    fn test_status_line_format() {
        let mut status = StatusLine::new();
        assert_eq!(status.format(), KEY_HINTS);

        status.set_message("Invalid filter");
        assert_eq!(status.format(), "Invalid filter");

        status.open_prompt(PromptKind::Filter, "score:1");
        assert_eq!(status.format(), ":score:1");

        status.close_prompt();
        status.clear_message();
        status.open_prompt(PromptKind::Search, "");
        assert_eq!(status.format(), "/");
    }

    #[test]
    fn test_terminal_resize() {
        let mut state = ViewState::new(80, 24);
        assert!(!state.update_terminal_size(80, 24));
        assert!(state.update_terminal_size(120, 30));
        assert_eq!(state.body_lines(), 26);
    }
}
