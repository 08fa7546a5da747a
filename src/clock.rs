//! Time budget enforcement.
//!
//! The search never reads a wall clock. It is handed a probe returning the
//! milliseconds left on the current turn and wraps it in a [`TimeGuard`],
//! which every recursive step consults. When the remaining time drops below
//! the guard's threshold, [`TimeGuard::check`] returns [`SearchTimeout`] and
//! the error is propagated with `?` back to the iterative-deepening driver.
//!
//! [`TurnClock`] is the wall-clock side, owned by the game driver.

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::constants::TIMER_THRESHOLD;

/// The turn clock is about to expire; abandon the current search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search timed out")]
pub struct SearchTimeout;

/// Cooperative cancellation check over a `time_left` probe.
#[derive(Clone, Copy)]
pub struct TimeGuard<'a> {
    time_left: &'a dyn Fn() -> f64,
    threshold: f64,
}

impl<'a> TimeGuard<'a> {
    /// Guard with the default [`TIMER_THRESHOLD`].
    pub fn new(time_left: &'a dyn Fn() -> f64) -> Self {
        Self::with_threshold(time_left, TIMER_THRESHOLD)
    }

    pub fn with_threshold(time_left: &'a dyn Fn() -> f64, threshold: f64) -> Self {
        Self {
            time_left,
            threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Milliseconds left according to the probe.
    #[inline]
    pub fn time_left(&self) -> f64 {
        (self.time_left)()
    }

    /// # Errors
    /// [`SearchTimeout`] once the remaining time is below the threshold.
    #[inline]
    pub fn check(&self) -> Result<(), SearchTimeout> {
        if self.time_left() < self.threshold {
            Err(SearchTimeout)
        } else {
            Ok(())
        }
    }
}

static NO_DEADLINE: fn() -> f64 = || f64::INFINITY;

impl TimeGuard<'static> {
    /// Guard that never fires. Useful for fixed-depth analysis.
    pub fn unlimited() -> Self {
        Self::new(&NO_DEADLINE)
    }
}

/// Wall-clock timer for one turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnClock {
    start: Instant,
    limit: Duration,
}

impl TurnClock {
    /// Start a turn with `limit_ms` milliseconds on the clock.
    pub fn start(limit_ms: u64) -> Self {
        Self {
            start: Instant::now(),
            limit: Duration::from_millis(limit_ms),
        }
    }

    /// Milliseconds remaining; negative once the limit has passed.
    pub fn time_left(&self) -> f64 {
        let elapsed = self.start.elapsed().as_secs_f64() * 1000.0;
        self.limit.as_secs_f64() * 1000.0 - elapsed
    }

    pub fn expired(&self) -> bool {
        self.time_left() < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_guard_fires_below_threshold() {
        let remaining = Cell::new(25.0);
        let probe = || remaining.get();
        let guard = TimeGuard::with_threshold(&probe, 20.0);

        assert_eq!(guard.check(), Ok(()));
        remaining.set(20.0);
        assert_eq!(guard.check(), Ok(()));
        remaining.set(19.9);
        assert_eq!(guard.check(), Err(SearchTimeout));
    }

    #[test]
    fn test_unlimited_guard_never_fires() {
        let guard = TimeGuard::unlimited();
        for _ in 0..100 {
            assert!(guard.check().is_ok());
        }
    }

    #[test]
    fn test_turn_clock_counts_down() {
        let clock = TurnClock::start(10_000);
        let left = clock.time_left();
        assert!(left <= 10_000.0 && left > 9_000.0);
        assert!(!clock.expired());

        let done = TurnClock::start(0);
        assert!(done.time_left() <= 0.0);
    }
}
