//! Bounded retry of a configuration whose writes did not stick.
//!
//! ```text
//!            diverged (attempts < ceiling)
//!          ┌───────────────────────────────┐
//!          v                               │
//!  Idle ──diverged──> Pending(attempts) ───┤
//!   ^                                      │
//!   └──────converged / attempts >= ceiling─┘
//! ```
//!
//! The pass that first diverged counts as attempt 1. With a ceiling of 5 the
//! configuration is resolved at most five times before it is abandoned.

use glamour_model::TargetConfiguration;

/// Retry state for the single configuration in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RetryState {
    /// Nothing to retry.
    #[default]
    Idle,
    /// `target` diverged on its last pass and will be resolved again.
    Pending {
        /// Configuration to retry.
        target: TargetConfiguration,
        /// Diverged passes so far.
        attempts: u32,
    },
}

/// What a pass did to the retry state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryTransition {
    /// The pass converged; back to idle.
    Converged,
    /// The pass diverged and another one is scheduled.
    Scheduled {
        /// Diverged passes so far, including this one.
        attempt: u32,
    },
    /// The pass diverged and the ceiling was reached; back to idle.
    Abandoned {
        /// Diverged passes in total.
        attempts: u32,
    },
}

impl RetryState {
    /// The configuration awaiting a retry, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&TargetConfiguration> {
        match self {
            Self::Idle => None,
            Self::Pending { target, .. } => Some(target),
        }
    }

    /// Diverged passes recorded for the pending configuration; 0 when idle.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Idle => 0,
            Self::Pending { attempts, .. } => *attempts,
        }
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Records the result of a pass over `target`.
    ///
    /// Attempts carry over from the current state, so a fresh request must
    /// reset to [`RetryState::Idle`] before its first pass.
    pub fn record_pass(&mut self, target: TargetConfiguration, converged: bool, ceiling: u32) -> RetryTransition {
        if converged {
            *self = Self::Idle;
            return RetryTransition::Converged;
        }

        let attempts = self.attempts().saturating_add(1);
        if attempts >= ceiling {
            *self = Self::Idle;
            RetryTransition::Abandoned { attempts }
        } else {
            *self = Self::Pending { target, attempts };
            RetryTransition::Scheduled { attempt: attempts }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plate() -> TargetConfiguration {
        TargetConfiguration::new("retry")
    }

    #[test]
    fn starts_idle() {
        let state = RetryState::default();
        assert!(state.is_idle());
        assert_eq!(state.attempts(), 0);
        assert!(state.pending().is_none());
    }

    #[test]
    fn converged_pass_clears_pending() {
        let mut state = RetryState::Pending {
            target: plate(),
            attempts: 3,
        };
        assert_eq!(state.record_pass(plate(), true, 5), RetryTransition::Converged);
        assert!(state.is_idle());
    }

    #[test]
    fn divergence_schedules_and_counts() {
        let mut state = RetryState::Idle;
        assert_eq!(
            state.record_pass(plate(), false, 5),
            RetryTransition::Scheduled { attempt: 1 }
        );
        assert_eq!(state.attempts(), 1);
        assert_eq!(state.pending().map(|t| t.name.as_str()), Some("retry"));

        assert_eq!(
            state.record_pass(plate(), false, 5),
            RetryTransition::Scheduled { attempt: 2 }
        );
    }

    #[test]
    fn ceiling_abandons() {
        let mut state = RetryState::Idle;
        let transitions: Vec<_> = (0..5).map(|_| state.record_pass(plate(), false, 5)).collect();

        assert_eq!(transitions[3], RetryTransition::Scheduled { attempt: 4 });
        assert_eq!(transitions[4], RetryTransition::Abandoned { attempts: 5 });
        assert!(state.is_idle());
        assert_eq!(state.attempts(), 0);
    }

    #[test]
    fn ceiling_of_one_never_schedules() {
        let mut state = RetryState::Idle;
        assert_eq!(
            state.record_pass(plate(), false, 1),
            RetryTransition::Abandoned { attempts: 1 }
        );
    }
}
