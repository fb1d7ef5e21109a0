//! Isochronous timer — counts task cycles toward a target
//!
//! For tasks that run on a fixed hardware period (e.g. every 100 µs).
//! Elapsed time is measured in calls to [`IsochronousTimer::tick`], so the
//! timer must be ticked exactly once per cycle. Ticking at another cadence
//! scales the measured time accordingly.
//!
//! Author: Moroya Sakamoto

use crate::error::{Result, TimerError};
use crate::timer::{PollTimer, TimerState};

/// Cycle-counting timer
///
/// Size: 16 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct IsochronousTimer {
    /// Task cycles per second
    ticks_per_second: u32,
    /// Cycles counted since the last start/reset
    current_tick: u32,
    /// Cycle count at which the timer fires
    target_tick: u32,
    /// Started at least once
    armed: bool,
}

impl IsochronousTimer {
    /// Target reported before the first start
    pub const IDLE_TARGET: u32 = u32::MAX;

    /// Create a timer for a task with the given cycle time
    ///
    /// `sampling_secs` of zero (or anything non-positive) leaves the rate at
    /// zero; only [`start_ticks`](Self::start_ticks) is meaningful then.
    pub fn new(sampling_secs: f64) -> Self {
        let ticks_per_second = if sampling_secs > 0.0 {
            (1.0 / sampling_secs) as u32
        } else {
            0
        };
        Self::from_ticks_per_second(ticks_per_second)
    }

    /// Create a timer from an explicit cycle rate
    pub const fn from_ticks_per_second(ticks_per_second: u32) -> Self {
        Self {
            ticks_per_second,
            current_tick: 0,
            target_tick: Self::IDLE_TARGET,
            armed: false,
        }
    }

    /// Create a timer, rejecting periods that yield no whole cycle per second
    pub fn try_new(sampling_secs: f64) -> Result<Self> {
        if !(sampling_secs > 0.0 && sampling_secs <= 1.0) {
            log_warn!("rejected sampling period {}", sampling_secs);
            return Err(TimerError::InvalidSampling(sampling_secs));
        }
        Ok(Self::new(sampling_secs))
    }

    /// Arm for a duration in seconds (truncated to whole cycles)
    pub fn start_secs(&mut self, duration_secs: f64) {
        self.start_ticks((duration_secs * self.ticks_per_second as f64) as u32);
    }

    /// Arm for an explicit number of cycles
    pub fn start_ticks(&mut self, ticks: u32) {
        self.target_tick = ticks;
        self.current_tick = 0;
        self.armed = true;
    }

    /// Restart counting without touching the target
    pub fn reset(&mut self) {
        self.current_tick = 0;
    }

    /// Count one cycle; true once the target is reached
    ///
    /// Never fires before the first start, however long it is ticked.
    pub fn tick(&mut self) -> bool {
        self.current_tick = self.current_tick.saturating_add(1);
        self.armed && self.current_tick >= self.target_tick
    }

    /// Task cycles per second
    pub fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }

    /// Cycles counted since the last start/reset
    pub fn current_tick(&self) -> u32 {
        self.current_tick
    }

    /// Cycle count at which the timer fires
    pub fn target_tick(&self) -> u32 {
        self.target_tick
    }

    /// Cycles left until the timer fires (0 once elapsed)
    pub fn remaining_ticks(&self) -> u32 {
        self.target_tick.saturating_sub(self.current_tick)
    }

    /// Lifecycle state
    pub fn current_state(&self) -> TimerState {
        if !self.armed {
            TimerState::Idle
        } else if self.current_tick >= self.target_tick {
            TimerState::Elapsed
        } else {
            TimerState::Running
        }
    }
}

impl Default for IsochronousTimer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SAMPLING_SECS)
    }
}

impl PollTimer for IsochronousTimer {
    fn state(&self, _now: u32) -> TimerState {
        self.current_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_per_second() {
        assert_eq!(IsochronousTimer::new(0.0001).ticks_per_second(), 10_000);
        assert_eq!(IsochronousTimer::new(0.001).ticks_per_second(), 1_000);
        assert_eq!(IsochronousTimer::new(0.0).ticks_per_second(), 0);
    }

    #[test]
    fn test_start_secs_fires_on_hundredth_tick() {
        let mut timer = IsochronousTimer::new(0.0001);
        timer.start_secs(0.01);
        assert_eq!(timer.target_tick(), 100);

        for i in 1..100 {
            assert!(!timer.tick(), "fired early on tick {i}");
        }
        assert!(timer.tick());
    }

    #[test]
    fn test_start_ticks() {
        let mut timer = IsochronousTimer::new(0.0001);
        timer.start_ticks(5);
        let fired: [bool; 5] = core::array::from_fn(|_| timer.tick());
        assert_eq!(fired, [false, false, false, false, true]);
    }

    #[test]
    fn test_no_latch_keeps_firing() {
        let mut timer = IsochronousTimer::new(0.0001);
        timer.start_ticks(2);
        timer.tick();
        assert!(timer.tick());
        assert!(timer.tick());
        assert!(timer.tick());
    }

    #[test]
    fn test_both_starts_on_same_instance() {
        let mut timer = IsochronousTimer::new(0.001);
        timer.start_ticks(3);
        timer.tick();
        timer.start_secs(0.002);
        assert_eq!(timer.target_tick(), 2);
        assert_eq!(timer.current_tick(), 0);
        assert!(!timer.tick());
        assert!(timer.tick());
    }

    #[test]
    fn test_reset_keeps_target() {
        let mut timer = IsochronousTimer::new(0.0001);
        timer.start_ticks(3);
        timer.tick();
        timer.tick();
        timer.reset();
        assert_eq!(timer.target_tick(), 3);
        assert!(!timer.tick());
        assert!(!timer.tick());
        assert!(timer.tick());
    }

    #[test]
    fn test_idle_never_fires() {
        let mut timer = IsochronousTimer::new(0.0001);
        assert_eq!(timer.current_state(), TimerState::Idle);
        for _ in 0..10_000 {
            assert!(!timer.tick());
        }
        assert_eq!(timer.current_state(), TimerState::Idle);
    }

    #[test]
    fn test_idle_sentinel_never_fires() {
        let mut timer = IsochronousTimer::new(0.0001);
        timer.current_tick = u32::MAX - 2;
        let fired: [bool; 4] = core::array::from_fn(|_| timer.tick());
        assert_eq!(fired, [false; 4]);
        assert_eq!(timer.current_tick(), u32::MAX);
        assert_eq!(timer.current_state(), TimerState::Idle);
    }

    #[test]
    fn test_start_at_sentinel_value_is_running() {
        let mut timer = IsochronousTimer::new(0.0001);
        timer.start_ticks(u32::MAX);
        assert_eq!(timer.current_state(), TimerState::Running);
        timer.current_tick = u32::MAX - 1;
        assert!(timer.tick());
        assert_eq!(timer.current_state(), TimerState::Elapsed);
    }

    #[test]
    fn test_state_transitions() {
        let mut timer = IsochronousTimer::new(0.0001);
        timer.start_ticks(2);
        assert_eq!(timer.state(0), TimerState::Running);
        assert_eq!(timer.remaining_ticks(), 2);
        timer.tick();
        timer.tick();
        assert_eq!(timer.state(0), TimerState::Elapsed);
        assert_eq!(timer.remaining_ticks(), 0);
    }

    #[test]
    fn test_truncation_toward_zero() {
        let mut timer = IsochronousTimer::new(0.001);
        timer.start_secs(0.0059);
        assert_eq!(timer.target_tick(), 5);
    }

    #[test]
    fn test_zero_target_fires_immediately() {
        let mut timer = IsochronousTimer::new(0.0001);
        timer.start_ticks(0);
        assert_eq!(timer.current_state(), TimerState::Elapsed);
        assert!(timer.tick());
    }

    #[test]
    fn test_try_new() {
        assert!(IsochronousTimer::try_new(0.0001).is_ok());
        assert_eq!(
            IsochronousTimer::try_new(0.0),
            Err(TimerError::InvalidSampling(0.0))
        );
        assert!(IsochronousTimer::try_new(-1.0).is_err());
    }

    #[test]
    fn test_memory_footprint() {
        assert_eq!(core::mem::size_of::<IsochronousTimer>(), 16);
    }
}
