//! Leading-edge throttle with a trailing flush
//!
//! The first call in a window runs immediately; calls made while the window is
//! closed are remembered and run once when it reopens, so the last event is
//! never lost.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Throttle {
    limit: Duration,
    open_at: Option<Duration>,
    pending: bool,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            open_at: None,
            pending: false,
        }
    }

    /// Whether a call at `now` may run; closes the window when it does
    pub fn try_acquire(&mut self, now: Duration) -> bool {
        match self.open_at {
            Some(open_at) if now < open_at => {
                self.pending = true;
                false
            }
            _ => {
                self.open_at = Some(now + self.limit);
                self.pending = false;
                true
            }
        }
    }

    /// When the current window reopens, if a call is waiting for it
    pub fn flush_deadline(&self) -> Option<Duration> {
        if self.pending {
            self.open_at
        } else {
            None
        }
    }

    /// Take the waiting call if its window has reopened at `now`
    pub fn take_pending(&mut self, now: Duration) -> bool {
        match self.flush_deadline() {
            Some(deadline) if now >= deadline => self.try_acquire(now),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timers::ms;

    #[test]
    fn test_limits_rate() {
        let mut throttle = Throttle::new(ms(16));
        assert!(throttle.try_acquire(ms(0)));
        assert!(!throttle.try_acquire(ms(5)));
        assert!(!throttle.try_acquire(ms(15)));
        assert!(throttle.try_acquire(ms(16)));
    }

    #[test]
    fn test_trailing_call_is_flushed() {
        let mut throttle = Throttle::new(ms(16));
        assert!(throttle.try_acquire(ms(0)));
        assert_eq!(throttle.flush_deadline(), None);

        assert!(!throttle.try_acquire(ms(4)));
        assert_eq!(throttle.flush_deadline(), Some(ms(16)));
        assert!(!throttle.take_pending(ms(10)));
        assert!(throttle.take_pending(ms(16)));
        assert_eq!(throttle.flush_deadline(), None);
    }
}
