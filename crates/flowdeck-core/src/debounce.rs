#![forbid(unsafe_code)]

//! Trailing-edge debounce timer.
//!
//! Rate-limits bursty event streams (scroll, resize) the "latest wins" way:
//! every qualifying event cancels the pending deadline and starts a new one,
//! and the work runs once the stream has been quiet for the full delay.
//!
//! The debouncer owns no callback. The caller arms it with [`trigger`]
//! on each event and asks [`poll`] on each tick whether the deadline has
//! passed; `poll` answers `true` at most once per armed deadline.
//!
//! [`trigger`]: Debouncer::trigger
//! [`poll`]: Debouncer::poll

use std::time::{Duration, Instant};

/// A restartable trailing-edge deadline.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet-period delay.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// The configured quiet-period delay.
    #[inline]
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a qualifying event: cancel any pending deadline and restart.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Check whether the armed deadline has elapsed.
    ///
    /// Returns `true` exactly once per armed deadline; the deadline is
    /// consumed. Returns `false` when nothing is armed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is armed and not yet fired.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
