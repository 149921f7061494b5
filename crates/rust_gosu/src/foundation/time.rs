//! Time management utilities
//!
//! The window loop reads time through the [`Clock`] trait so that tests can
//! drive it with a [`ManualClock`].

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Millisecond clock used by the tick loop
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed starting point
    ///
    /// The value wraps around after `u32::MAX`.
    fn milliseconds(&self) -> u32;

    /// Yield the processor for roughly `ms` milliseconds
    fn sleep(&self, ms: u32);
}

/// Monotonic clock backed by [`Instant`]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Create a clock starting at zero now
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn milliseconds(&self) -> u32 {
        // Truncation gives the wrap-around behaviour callers expect
        self.start.elapsed().as_millis() as u32
    }

    fn sleep(&self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

/// Clock that only moves when told to
///
/// `sleep` advances the clock instead of blocking, and every read can
/// optionally advance it by a fixed step.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u32>,
    step: u32,
}

impl ManualClock {
    /// Clock starting at `start` that does not advance on reads
    pub fn new(start: u32) -> Self {
        Self {
            now: Cell::new(start),
            step: 0,
        }
    }

    /// Clock that advances by `step` milliseconds after every read
    pub fn with_step(start: u32, step: u32) -> Self {
        Self {
            now: Cell::new(start),
            step,
        }
    }

    /// Move the clock forward, wrapping at `u32::MAX`
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    /// Current reading without advancing
    pub fn peek(&self) -> u32 {
        self.now.get()
    }
}

impl Clock for ManualClock {
    fn milliseconds(&self) -> u32 {
        let now = self.now.get();
        self.advance(self.step);
        now
    }

    fn sleep(&self, ms: u32) {
        self.advance(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.milliseconds();
        clock.sleep(2);
        assert!(clock.milliseconds() >= first + 2);
    }

    #[test]
    fn test_manual_clock_steps_and_wraps() {
        let clock = ManualClock::with_step(u32::MAX - 1, 2);
        assert_eq!(clock.milliseconds(), u32::MAX - 1);
        assert_eq!(clock.milliseconds(), 0);

        clock.sleep(5);
        assert_eq!(clock.peek(), 7);
    }
}
