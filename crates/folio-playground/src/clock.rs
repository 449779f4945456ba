//! Time sources

use std::fmt::Debug;
use std::time::Instant;

/// Source of "now" for debounce deadlines
pub trait Clock: Debug + Send + Sync {
    /// Current instant
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Tokio's clock, which follows paused and advanced time in tests
///
/// Use this with [`crate::drive`], whose timers sleep on tokio time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    #[inline]
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}
