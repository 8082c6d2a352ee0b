//! Temporary overrides for tavern costs.
//!
//! An override replaces a default value (refresh cost, upgrade discount)
//! either permanently or for a fixed number of qualifying actions. A
//! counted override reverts to the default on exactly the step that
//! completes its clock.

use crate::core::CountdownClock;

#[derive(Debug, Default)]
pub enum CostOverride {
    #[default]
    Default,
    Overridden {
        value: u32,
        /// `None` keeps the override forever.
        clock: Option<CountdownClock>,
    },
}

impl CostOverride {
    /// Override with `value` for `times` qualifying steps, or forever when
    /// `times` is `None`. Zero steps leaves the default in place.
    #[must_use]
    pub fn new(value: u32, times: Option<u32>) -> Self {
        match times {
            Some(0) => Self::Default,
            Some(n) => Self::Overridden {
                value,
                clock: Some(CountdownClock::new(n)),
            },
            None => Self::Overridden { value, clock: None },
        }
    }

    /// The effective value given the default.
    #[must_use]
    pub fn value(&self, default: u32) -> u32 {
        match self {
            Self::Default => default,
            Self::Overridden { value, .. } => *value,
        }
    }

    #[must_use]
    pub fn is_overridden(&self) -> bool {
        matches!(self, Self::Overridden { .. })
    }

    /// Qualifying steps left before reverting. `None` when permanent or default.
    #[must_use]
    pub fn remaining_uses(&self) -> Option<u32> {
        match self {
            Self::Overridden {
                clock: Some(clock), ..
            } => Some(clock.remaining()),
            _ => None,
        }
    }

    /// Record one qualifying step. Returns true if the override just reverted.
    pub fn step(&mut self) -> bool {
        let done = match self {
            Self::Overridden {
                clock: Some(clock), ..
            } => clock.tick(),
            _ => false,
        };
        if done {
            *self = Self::Default;
        }
        done
    }
}
