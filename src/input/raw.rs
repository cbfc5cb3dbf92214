//! Raw terminal input: crossterm polling and mouse wheel coalescing.
//!
//! A fast wheel spin produces dozens of events per frame. They are folded into one
//! row delta per direction so the windower recomputes once per burst.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyEvent, MouseEvent, MouseEventKind};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Quiet time after which an accumulated wheel burst is released.
const DEFAULT_COALESCE_WINDOW_MS: u64 = 12;
/// Rows moved per wheel notch.
pub const WHEEL_ROWS: u64 = 3;
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Signed row delta for `rows` in this direction.
    pub fn signed(self, rows: u64) -> i64 {
        let rows = i64::try_from(rows).unwrap_or(i64::MAX);
        match self {
            ScrollDirection::Up => -rows,
            ScrollDirection::Down => rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    Wheel { direction: ScrollDirection, rows: u64 },
}

/// Folds consecutive same-direction wheel events into one delta.
#[derive(Debug, Clone)]
pub struct WheelCoalescer {
    window: Duration,
    pending: Option<PendingWheel>,
}

#[derive(Debug, Clone, Copy)]
struct PendingWheel {
    direction: ScrollDirection,
    rows: u64,
    last_event: Instant,
}

impl WheelCoalescer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Add a wheel event. A direction change releases the previous burst.
    pub fn push(
        &mut self,
        direction: ScrollDirection,
        rows: u64,
        now: Instant,
    ) -> Option<(ScrollDirection, u64)> {
        match &mut self.pending {
            Some(pending) if pending.direction == direction => {
                pending.rows = pending.rows.saturating_add(rows);
                pending.last_event = now;
                None
            }
            slot => slot
                .replace(PendingWheel {
                    direction,
                    rows,
                    last_event: now,
                })
                .map(|previous| (previous.direction, previous.rows)),
        }
    }

    /// Release the burst once no wheel event arrived for the coalescing window.
    pub fn release_if_quiet(&mut self, now: Instant) -> Option<(ScrollDirection, u64)> {
        let pending = self.pending?;
        if now.saturating_duration_since(pending.last_event) >= self.window {
            self.release()
        } else {
            None
        }
    }

    pub fn release(&mut self) -> Option<(ScrollDirection, u64)> {
        self.pending
            .take()
            .map(|pending| (pending.direction, pending.rows))
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}

/// Polls crossterm and queues raw events in arrival order.
#[derive(Debug)]
pub struct RawInputCollector {
    wheel: WheelCoalescer,
    queued: VecDeque<RawInputEvent>,
}

impl Default for RawInputCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl RawInputCollector {
    pub fn new() -> Self {
        Self::with_window(Duration::from_millis(DEFAULT_COALESCE_WINDOW_MS))
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            wheel: WheelCoalescer::new(window),
            queued: VecDeque::new(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.queued.is_empty() && self.wheel.is_empty()
    }

    /// Feed an event that was read elsewhere (tests, replay).
    pub fn process_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) => {
                self.release_wheel();
                self.queued.push_back(RawInputEvent::Key(key));
            }
            Event::Resize(width, height) => {
                self.release_wheel();
                self.queued.push_back(RawInputEvent::Resize { width, height });
            }
            Event::Mouse(mouse) => self.process_mouse(mouse, now),
            _ => {}
        }
    }

    /// Next ready event without blocking: queued events first, then a quiet wheel burst.
    pub fn next_ready(&mut self, now: Instant) -> Option<RawInputEvent> {
        self.queued.pop_front().or_else(|| {
            self.wheel
                .release_if_quiet(now)
                .map(|(direction, rows)| RawInputEvent::Wheel { direction, rows })
        })
    }

    /// Wait up to `timeout` for terminal input and return the next ready event.
    pub fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<RawInputEvent>> {
        if let Some(event) = self.next_ready(Instant::now()) {
            return Ok(Some(event));
        }

        let timeout = if self.wheel.is_empty() {
            timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS))
        } else {
            // Wake up in time to release a pending burst
            self.wheel.window
        };
        if event::poll(timeout)? {
            let event = event::read()?;
            self.process_event(event, Instant::now());
        }
        Ok(self.next_ready(Instant::now()))
    }

    fn process_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let direction = match mouse.kind {
            MouseEventKind::ScrollUp => ScrollDirection::Up,
            MouseEventKind::ScrollDown => ScrollDirection::Down,
            _ => return,
        };
        if let Some((direction, rows)) = self.wheel.push(direction, WHEEL_ROWS, now) {
            self.queued
                .push_back(RawInputEvent::Wheel { direction, rows });
        }
    }

    fn release_wheel(&mut self) {
        if let Some((direction, rows)) = self.wheel.release() {
            self.queued
                .push_back(RawInputEvent::Wheel { direction, rows });
        }
    }
}
