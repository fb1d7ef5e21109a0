//! Timer lifecycle shared by the isochronous and asynchronous timers
//!
//! Both timers move `Idle -> Running -> Elapsed`. The last transition is
//! observed by polling, never pushed, and there is no latch: a timer keeps
//! reporting `Elapsed` until it is started again.
//!
//! Author: Moroya Sakamoto

/// Observable timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerState {
    /// Never started
    Idle,
    /// Started, target not reached yet
    Running,
    /// Target reached (until the next start)
    Elapsed,
}

impl TimerState {
    /// Has the timer been started at least once?
    pub fn is_armed(self) -> bool {
        self != TimerState::Idle
    }
}

/// Common read-only view over both timer kinds
///
/// `now` is the current hardware timestamp. Tick-counting timers ignore it.
pub trait PollTimer {
    /// Current lifecycle state, without side effects
    fn state(&self, now: u32) -> TimerState;

    /// Has the timer elapsed?
    fn is_elapsed(&self, now: u32) -> bool {
        self.state(now) == TimerState::Elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(TimerState);

    impl PollTimer for Fixed {
        fn state(&self, _now: u32) -> TimerState {
            self.0
        }
    }

    #[test]
    fn test_is_armed() {
        assert!(!TimerState::Idle.is_armed());
        assert!(TimerState::Running.is_armed());
        assert!(TimerState::Elapsed.is_armed());
    }

    #[test]
    fn test_default_is_elapsed() {
        assert!(Fixed(TimerState::Elapsed).is_elapsed(0));
        assert!(!Fixed(TimerState::Running).is_elapsed(0));
        assert!(!Fixed(TimerState::Idle).is_elapsed(0));
    }
}
