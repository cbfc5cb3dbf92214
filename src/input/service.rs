//! High-level input service.
//!
//! Runs the key binding state machine over raw events and yields [`InputAction`]s for the
//! render loop. Three modes exist: list navigation, the search prompt (live, debounced)
//! and the filter prompt (applied on Enter).

use crate::error::Result;
use crate::input::raw::{RawInputCollector, RawInputEvent, ScrollDirection};
use crate::query::{SortField, SortPreset};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Navigation,
    SearchInput,
    FilterInput,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// Wheel scroll; the cursor follows the viewport
    Scroll {
        direction: ScrollDirection,
        rows: u64,
    },
    /// Keyboard cursor movement; the viewport follows the cursor
    MoveCursor {
        direction: ScrollDirection,
        rows: u64,
    },
    PageUp,
    PageDown,
    GoToStart,
    GoToEnd,
    Quit,
    /// Search prompt opened with the current text
    StartSearch,
    /// Search text edited; applied after the debounce interval
    UpdateSearch { text: String },
    /// Enter in the search prompt: apply now
    CommitSearch,
    /// Esc in the search prompt: drop the search
    ClearSearch,
    StartFilter,
    UpdateFilterBuffer { buffer: String },
    SubmitFilter { text: String },
    CancelFilter,
    PopFilter,
    ClearFilters,
    SortBy(SortField),
    ApplyPreset(SortPreset),
    ToggleSelection,
    ToggleSelectVisible,
    Resize { width: u16, height: u16 },
    NoAction,
    InvalidInput,
}

/// Key binding state machine.
#[derive(Debug)]
pub struct InputStateMachine {
    state: InputState,
    search_buffer: String,
    filter_buffer: String,
}

fn plain(modifiers: KeyModifiers) -> bool {
    !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn sort_field_for(digit: char) -> Option<SortField> {
    let index = digit.to_digit(10)?.checked_sub(1)?;
    SortField::ALL.get(index as usize).copied()
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self {
            state: InputState::Navigation,
            search_buffer: String::new(),
            filter_buffer: String::new(),
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> InputAction {
        if key.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return InputAction::Quit;
        }

        match self.state {
            InputState::Navigation => self.handle_navigation(key),
            InputState::SearchInput => self.handle_search(key),
            InputState::FilterInput => self.handle_filter(key),
        }
    }

    fn handle_navigation(&mut self, key: KeyEvent) -> InputAction {
        let cursor = |direction, rows| InputAction::MoveCursor { direction, rows };
        match key.code {
            KeyCode::Down => cursor(ScrollDirection::Down, 1),
            KeyCode::Up => cursor(ScrollDirection::Up, 1),
            KeyCode::PageDown => InputAction::PageDown,
            KeyCode::PageUp => InputAction::PageUp,
            KeyCode::Home => InputAction::GoToStart,
            KeyCode::End => InputAction::GoToEnd,
            KeyCode::Char(ch) if plain(key.modifiers) => match ch {
                'j' => cursor(ScrollDirection::Down, 1),
                'k' => cursor(ScrollDirection::Up, 1),
                'f' => InputAction::PageDown,
                'b' => InputAction::PageUp,
                'g' => InputAction::GoToStart,
                'G' => InputAction::GoToEnd,
                'q' => InputAction::Quit,
                ' ' => InputAction::ToggleSelection,
                'a' => InputAction::ToggleSelectVisible,
                '/' => {
                    self.state = InputState::SearchInput;
                    InputAction::StartSearch
                }
                ':' => {
                    self.state = InputState::FilterInput;
                    self.filter_buffer.clear();
                    InputAction::StartFilter
                }
                'X' => InputAction::PopFilter,
                'x' => InputAction::ClearFilters,
                'r' => InputAction::ApplyPreset(SortPreset::MostRecent),
                'h' => InputAction::ApplyPreset(SortPreset::HighestScore),
                'z' => InputAction::ApplyPreset(SortPreset::NameAToZ),
                digit => sort_field_for(digit)
                    .map(InputAction::SortBy)
                    .unwrap_or(InputAction::InvalidInput),
            },
            _ => InputAction::InvalidInput,
        }
    }

    fn handle_search(&mut self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Enter => {
                self.state = InputState::Navigation;
                InputAction::CommitSearch
            }
            KeyCode::Esc => {
                self.state = InputState::Navigation;
                self.search_buffer.clear();
                InputAction::ClearSearch
            }
            KeyCode::Backspace => {
                if self.search_buffer.pop().is_some() {
                    self.search_update()
                } else {
                    InputAction::NoAction
                }
            }
            KeyCode::Char(ch) if plain(key.modifiers) && !ch.is_control() => {
                self.search_buffer.push(ch);
                self.search_update()
            }
            _ => InputAction::InvalidInput,
        }
    }

    fn search_update(&self) -> InputAction {
        InputAction::UpdateSearch {
            text: self.search_buffer.clone(),
        }
    }

    fn handle_filter(&mut self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Enter => {
                self.state = InputState::Navigation;
                let text = std::mem::take(&mut self.filter_buffer);
                if text.trim().is_empty() {
                    InputAction::CancelFilter
                } else {
                    InputAction::SubmitFilter { text }
                }
            }
            KeyCode::Esc => {
                self.state = InputState::Navigation;
                self.filter_buffer.clear();
                InputAction::CancelFilter
            }
            KeyCode::Backspace => {
                self.filter_buffer.pop();
                InputAction::UpdateFilterBuffer {
                    buffer: self.filter_buffer.clone(),
                }
            }
            KeyCode::Char(ch) if plain(key.modifiers) && !ch.is_control() => {
                self.filter_buffer.push(ch);
                InputAction::UpdateFilterBuffer {
                    buffer: self.filter_buffer.clone(),
                }
            }
            _ => InputAction::InvalidInput,
        }
    }

    /// Preload the search prompt, e.g. with text given on the command line.
    pub fn set_search_buffer(&mut self, text: impl Into<String>) {
        self.search_buffer = text.into();
    }

    pub fn search_buffer(&self) -> &str {
        &self.search_buffer
    }

    pub fn filter_buffer(&self) -> &str {
        &self.filter_buffer
    }

    pub fn state(&self) -> InputState {
        self.state
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns terminal events into [`InputAction`]s.
#[derive(Debug, Default)]
pub struct InputService {
    state_machine: InputStateMachine,
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_text(text: impl Into<String>) -> Self {
        let mut service = Self::new();
        service.state_machine.set_search_buffer(text);
        service
    }

    /// Wait up to `timeout` for input; returns every action that became ready.
    pub fn poll_actions(&mut self, timeout: Option<Duration>) -> Result<Vec<InputAction>> {
        let mut actions = Vec::new();
        if let Some(event) = self.raw_input.poll_event(timeout)? {
            self.push_action(event, &mut actions);
            self.drain_ready(Instant::now(), &mut actions);
        }
        Ok(actions)
    }

    /// Feed one event read elsewhere and return the actions ready at `now`.
    pub fn process_event(&mut self, event: Event, now: Instant) -> Vec<InputAction> {
        let mut actions = Vec::new();
        self.raw_input.process_event(event, now);
        self.drain_ready(now, &mut actions);
        actions
    }

    /// Actions that became ready without new input (a quiet wheel burst).
    pub fn flush_ready(&mut self, now: Instant) -> Vec<InputAction> {
        let mut actions = Vec::new();
        self.drain_ready(now, &mut actions);
        actions
    }

    fn drain_ready(&mut self, now: Instant, actions: &mut Vec<InputAction>) {
        while let Some(event) = self.raw_input.next_ready(now) {
            self.push_action(event, actions);
        }
    }

    fn push_action(&mut self, event: RawInputEvent, actions: &mut Vec<InputAction>) {
        let action = match event {
            RawInputEvent::Key(key) => self.state_machine.handle_key_event(key),
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
            RawInputEvent::Wheel { direction, rows } => InputAction::Scroll { direction, rows },
        };
        match action {
            InputAction::NoAction | InputAction::InvalidInput => {}
            action => actions.push(action),
        }
    }

    pub fn state_machine(&self) -> &InputStateMachine {
        &self.state_machine
    }
}
