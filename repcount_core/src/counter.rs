//! Rep and set aggregation.

use crate::{Error, Result, SessionState};

/// Reps per set unless configured otherwise
pub const DEFAULT_SET_SIZE: u32 = 10;

/// Folds completed reps into the running rep/set totals
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepCounter {
    set_size: u32,
}

impl Default for RepCounter {
    fn default() -> Self {
        Self {
            set_size: DEFAULT_SET_SIZE,
        }
    }
}

impl RepCounter {
    pub fn new(set_size: u32) -> Result<Self> {
        if set_size == 0 {
            return Err(Error::InvalidConfiguration(
                "set size must be at least 1".into(),
            ));
        }
        Ok(Self { set_size })
    }

    pub fn set_size(&self) -> u32 {
        self.set_size
    }

    /// State after one more completed rep
    ///
    /// The set count moves up whenever the new rep total lands on a multiple
    /// of the set size, so it always equals `1 + reps / set_size`.
    pub fn record_rep(&self, state: &SessionState) -> SessionState {
        let reps = state.reps.saturating_add(1);
        let sets = if self.completes_set(reps) {
            state.sets.saturating_add(1)
        } else {
            state.sets
        };

        SessionState {
            reps,
            sets,
            ..*state
        }
    }

    /// True when a rep total lands exactly on a set boundary
    pub fn completes_set(&self, reps: u32) -> bool {
        reps > 0 && reps % self.set_size == 0
    }

    /// Set count implied by a rep total
    pub fn sets_for(&self, reps: u32) -> u32 {
        1 + reps / self.set_size
    }
}
