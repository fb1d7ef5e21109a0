//! Asynchronous timer — measures time on the hardware timestamp
//!
//! For tasks that run as fast as possible rather than on a fixed period.
//! The timer stores only a destination timestamp; every query compares the
//! caller's current timestamp against it with wrap-aware arithmetic, so the
//! call cadence does not matter.
//!
//! # Precondition
//!
//! Spans must not exceed [`TIMESTAMP_TRANSLATOR`] ticks (about 6 hours at
//! 100 kHz). Longer spans silently produce wrong answers. Use
//! [`AsynchronousTimer::start_checked`] when the span is not a constant.
//!
//! Author: Moroya Sakamoto

use crate::config::secs_to_timestamp_ticks;
use crate::error::{Result, TimerError};
use crate::timer::{PollTimer, TimerState};
use crate::timestamp::{self, TIMESTAMP_TRANSLATOR};

/// Timestamp-delta timer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AsynchronousTimer {
    /// Destination timestamp, `None` before the first start
    dest: Option<u32>,
}

impl AsynchronousTimer {
    /// Create an idle timer
    pub const fn new() -> Self {
        Self { dest: None }
    }

    /// Arm for `ticks` timestamp ticks from `now`
    pub fn start(&mut self, ticks: i32, now: u32) {
        debug_assert!(
            ticks.unsigned_abs() <= TIMESTAMP_TRANSLATOR,
            "span exceeds half the timestamp range"
        );
        self.dest = Some(timestamp::add(now, ticks));
    }

    /// Arm for a duration in seconds, converted at 100 kHz
    pub fn start_secs(&mut self, duration_secs: f64, now: u32) {
        self.start(secs_to_timestamp_ticks(duration_secs), now);
    }

    /// Arm after validating the span and the timestamp
    ///
    /// Leaves the timer untouched on error.
    pub fn start_checked(&mut self, ticks: i32, now: u32) -> Result<()> {
        if ticks < 0 {
            log_warn!("rejected negative span {}", ticks);
            return Err(TimerError::NegativeSpan(ticks));
        }
        if ticks as u32 > TIMESTAMP_TRANSLATOR {
            log_warn!("rejected span {} ticks", ticks);
            return Err(TimerError::SpanTooLong(ticks as u32));
        }
        if !timestamp::is_valid(now) {
            log_warn!("rejected timestamp {}", now);
            return Err(TimerError::TimestampOutOfRange(now));
        }
        self.start(ticks, now);
        Ok(())
    }

    /// [`start_secs`](Self::start_secs) with the checks of
    /// [`start_checked`](Self::start_checked)
    pub fn start_secs_checked(&mut self, duration_secs: f64, now: u32) -> Result<()> {
        self.start_checked(secs_to_timestamp_ticks(duration_secs), now)
    }

    /// Has `now` moved past the destination?
    ///
    /// Pure read; false while idle.
    pub fn elapsed(&self, now: u32) -> bool {
        match self.dest {
            Some(dest) => timestamp::greater(now, dest),
            None => false,
        }
    }

    /// Ticks left until the timer elapses (0 once elapsed or idle)
    pub fn remaining(&self, now: u32) -> u32 {
        match self.dest {
            Some(dest) if timestamp::greater_or_equal(dest, now) => {
                timestamp::distance(now, dest) + 1
            }
            _ => 0,
        }
    }

    /// Destination timestamp, if started
    pub fn destination(&self) -> Option<u32> {
        self.dest
    }
}

impl PollTimer for AsynchronousTimer {
    fn state(&self, now: u32) -> TimerState {
        match self.dest {
            None => TimerState::Idle,
            Some(_) if self.elapsed(now) => TimerState::Elapsed,
            Some(_) => TimerState::Running,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::TIMESTAMP_RANGE;

    #[test]
    fn test_idle_never_elapses() {
        let timer = AsynchronousTimer::new();
        assert!(!timer.elapsed(0));
        assert!(!timer.elapsed(12345));
        assert_eq!(timer.state(0), TimerState::Idle);
        assert_eq!(timer.remaining(0), 0);
    }

    #[test]
    fn test_exclusive_boundary() {
        let mut timer = AsynchronousTimer::new();
        timer.start(1000, 0);
        assert!(!timer.elapsed(500));
        assert!(!timer.elapsed(1000));
        assert!(timer.elapsed(1001));
    }

    #[test]
    fn test_wraparound_destination() {
        let mut timer = AsynchronousTimer::new();
        timer.start(100, TIMESTAMP_RANGE - 50);
        assert_eq!(timer.destination(), Some(50));

        assert!(!timer.elapsed(TIMESTAMP_RANGE - 1));
        assert!(!timer.elapsed(0));
        assert!(!timer.elapsed(49));
        assert!(!timer.elapsed(50));
        assert!(timer.elapsed(51));
    }

    #[test]
    fn test_elapsed_has_no_side_effects() {
        let mut timer = AsynchronousTimer::new();
        timer.start(10, 100);
        for _ in 0..3 {
            assert!(!timer.elapsed(105));
            assert!(timer.elapsed(111));
        }
        assert_eq!(timer.destination(), Some(110));
    }

    #[test]
    fn test_start_secs_uses_100khz() {
        let mut timer = AsynchronousTimer::new();
        timer.start_secs(0.01, 0);
        assert_eq!(timer.destination(), Some(1000));
    }

    #[test]
    fn test_restart_discards_previous_span() {
        let mut timer = AsynchronousTimer::new();
        timer.start(10, 0);
        assert!(timer.elapsed(20));
        timer.start(10, 20);
        assert!(!timer.elapsed(20));
        assert_eq!(timer.state(20), TimerState::Running);
        assert_eq!(timer.state(31), TimerState::Elapsed);
    }

    #[test]
    fn test_remaining() {
        let mut timer = AsynchronousTimer::new();
        timer.start(100, TIMESTAMP_RANGE - 10);
        assert_eq!(timer.remaining(TIMESTAMP_RANGE - 10), 101);
        assert_eq!(timer.remaining(90), 1);
        assert_eq!(timer.remaining(91), 0);
    }

    #[test]
    fn test_start_checked() {
        let mut timer = AsynchronousTimer::new();
        assert_eq!(timer.start_checked(-1, 0), Err(TimerError::NegativeSpan(-1)));
        assert_eq!(
            timer.start_checked(i32::MAX, 0),
            Err(TimerError::SpanTooLong(i32::MAX as u32))
        );
        assert_eq!(
            timer.start_checked(10, TIMESTAMP_RANGE),
            Err(TimerError::TimestampOutOfRange(TIMESTAMP_RANGE))
        );
        assert_eq!(timer.destination(), None);

        assert!(timer.start_checked(TIMESTAMP_TRANSLATOR as i32, 0).is_ok());
        assert!(!timer.elapsed(TIMESTAMP_TRANSLATOR));
    }

    #[test]
    fn test_start_secs_checked() {
        let mut timer = AsynchronousTimer::new();
        // one day at 100 kHz saturates the i32 span, past the half-range bound
        assert_eq!(
            timer.start_secs_checked(86_400.0, 0),
            Err(TimerError::SpanTooLong(i32::MAX as u32))
        );
        assert_eq!(
            timer.start_secs_checked(-0.01, 0),
            Err(TimerError::NegativeSpan(-1000))
        );
        assert_eq!(timer.destination(), None);

        assert!(timer.start_secs_checked(0.01, 0).is_ok());
        assert_eq!(timer.destination(), Some(1000));
    }
}
