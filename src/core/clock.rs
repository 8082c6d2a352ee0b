//! Turn-counted countdown timer.
//!
//! A `CountdownClock` counts qualifying steps down from a fixed duration.
//! The completion callback fires exactly once, on the step that first
//! brings the remaining count to zero or below. Stepping a finished clock
//! is a no-op that still reports completion. `reset` re-arms it.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use tavern_sim::core::CountdownClock;
//!
//! let fired = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&fired);
//! let mut clock = CountdownClock::with_callback(2, move || counter.set(counter.get() + 1));
//!
//! assert!(!clock.tick());
//! assert!(clock.tick());
//! assert!(clock.tick());
//! assert_eq!(fired.get(), 1);
//! ```

use std::fmt;

type Callback = Box<dyn FnMut()>;

pub struct CountdownClock {
    duration: u32,
    remaining: i64,
    armed: bool,
    on_complete: Option<Callback>,
}

impl CountdownClock {
    /// Create a clock with no completion callback.
    #[must_use]
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: i64::from(duration),
            armed: true,
            on_complete: None,
        }
    }

    /// Create a clock that calls `on_complete` when it runs out.
    #[must_use]
    pub fn with_callback(duration: u32, on_complete: impl FnMut() + 'static) -> Self {
        Self {
            on_complete: Some(Box::new(on_complete)),
            ..Self::new(duration)
        }
    }

    /// Advance the clock by `n` steps. Returns whether the clock is done.
    pub fn step(&mut self, n: u32) -> bool {
        if self.is_done() {
            return true;
        }

        self.remaining -= i64::from(n);
        if !self.is_done() {
            return false;
        }

        if self.armed {
            self.armed = false;
            if let Some(callback) = self.on_complete.as_mut() {
                callback();
            }
        }
        true
    }

    /// Advance the clock by a single step.
    pub fn tick(&mut self) -> bool {
        self.step(1)
    }

    /// Restore the full duration and re-arm the callback.
    pub fn reset(&mut self) {
        self.remaining = i64::from(self.duration);
        self.armed = true;
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.remaining <= 0
    }

    #[must_use]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Steps left before completion, zero once done.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining.max(0) as u32
    }
}

impl fmt::Debug for CountdownClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownClock")
            .field("duration", &self.duration)
            .field("remaining", &self.remaining)
            .field("armed", &self.armed)
            .field("has_callback", &self.on_complete.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_clock(duration: u32) -> (CountdownClock, Rc<Cell<u32>>) {
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let clock = CountdownClock::with_callback(duration, move || counter.set(counter.get() + 1));
        (clock, fired)
    }

    #[test]
    fn test_two_step_clock() {
        let (mut clock, fired) = counting_clock(2);

        assert!(!clock.tick());
        assert_eq!(fired.get(), 0);
        assert!(clock.tick());
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_done_clock_has_no_side_effects() {
        let (mut clock, fired) = counting_clock(1);

        assert!(clock.tick());
        assert!(clock.tick());
        assert!(clock.step(5));
        assert_eq!(fired.get(), 1);
        assert_eq!(clock.remaining(), 0);
    }

    #[test]
    fn test_overshooting_step_fires_once() {
        let (mut clock, fired) = counting_clock(3);

        assert!(clock.step(10));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_reset_rearms() {
        let (mut clock, fired) = counting_clock(1);

        assert!(clock.tick());
        clock.reset();
        assert!(!clock.is_done());
        assert_eq!(clock.remaining(), 1);
        assert!(clock.tick());
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_zero_duration_is_already_done() {
        let (mut clock, fired) = counting_clock(0);

        assert!(clock.is_done());
        assert!(clock.tick());
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_plain_clock() {
        let mut clock = CountdownClock::new(3);
        assert_eq!(clock.duration(), 3);
        assert!(!clock.step(2));
        assert_eq!(clock.remaining(), 1);
        assert!(clock.tick());
    }
}
