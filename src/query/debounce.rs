//! Trailing-edge debouncer for rapidly changing input.
//!
//! Time is passed in explicitly, the same way scroll coalescing works in the input layer,
//! so the owner decides how to wait for [`Debouncer::deadline`] and tests stay deterministic.

use std::time::{Duration, Instant};

/// Holds at most one pending value and the instant it becomes due.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    interval: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

impl<T> Debouncer<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedule `value`, replacing any pending value and restarting the quiet period.
    ///
    /// Returns true if a pending value was superseded.
    pub fn push(&mut self, value: T, now: Instant) -> bool {
        let superseded = self.pending.is_some();
        self.pending = Some(Pending {
            value,
            deadline: now + self.interval,
        });
        superseded
    }

    /// Instant at which the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.flush(),
            _ => None,
        }
    }

    /// Take the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    /// Drop the pending value without applying it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(250);

    #[test]
    fn fires_once_after_quiet_period() {
        let mut debouncer = Debouncer::new(INTERVAL);
        let start = Instant::now();

        assert!(!debouncer.push("a", start));
        assert_eq!(debouncer.poll(start + Duration::from_millis(249)), None);
        assert_eq!(debouncer.poll(start + INTERVAL), Some("a"));
        assert_eq!(debouncer.poll(start + INTERVAL * 2), None);
    }

    #[test]
    fn new_input_restarts_the_timer() {
        let mut debouncer = Debouncer::new(INTERVAL);
        let start = Instant::now();

        debouncer.push("a", start);
        assert!(debouncer.push("ab", start + Duration::from_millis(200)));
        assert!(debouncer.push("abc", start + Duration::from_millis(400)));

        // The first deadline has passed, but the latest push moved it.
        assert_eq!(debouncer.poll(start + Duration::from_millis(500)), None);
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(650))
        );
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(650)),
            Some("abc")
        );
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn flush_and_cancel() {
        let mut debouncer = Debouncer::new(INTERVAL);
        let start = Instant::now();

        debouncer.push(1, start);
        assert_eq!(debouncer.flush(), Some(1));
        assert_eq!(debouncer.flush(), None);

        debouncer.push(2, start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + INTERVAL), None);
        assert_eq!(debouncer.deadline(), None);
    }
}
