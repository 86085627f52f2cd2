//! One-shot timers on page time
//!
//! Page time is the [`Duration`] elapsed since page-ready. Timers due at the
//! same instant fire in the order they were scheduled. Recurring behavior is
//! expressed by rescheduling from the callback.

use std::collections::BTreeMap;
use std::time::Duration;

/// Ordered set of pending timers carrying a task payload
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    pending: BTreeMap<(Duration, u64), T>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            pending: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire at page time `at`
    pub fn schedule(&mut self, at: Duration, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert((at, seq), task);
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(at, _)| *at)
    }

    /// Remove and return the earliest timer if it is due at `now`
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, T)> {
        match self.pending.first_key_value() {
            Some(((at, _), _)) if *at <= now => {
                self.pending.pop_first().map(|((at, _), task)| (at, task))
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Shorthand for millisecond durations
#[inline]
pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
