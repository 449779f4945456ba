//! Trailing-edge debounce timer
//!
//! A single deadline, re-armed on every edit. Holds no clock of its own:
//! callers pass `now`, so the same type works under the system clock,
//! paused tokio time and the manual test clock.

use std::time::{Duration, Instant};

/// Coalesces bursts of edits into one trailing action
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Create disarmed debouncer with the given quiet interval
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Quiet interval
    #[inline]
    #[must_use]
    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Armed deadline, if any
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// A deadline is armed
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Arm (or re-arm) for `now + quiet`, replacing any earlier deadline
    pub fn arm(&mut self, now: Instant) -> Instant {
        let deadline = now + self.quiet;
        self.deadline = Some(deadline);
        deadline
    }

    /// Disarm; returns whether a deadline was pending
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Disarm and return `true` if the deadline has passed
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
