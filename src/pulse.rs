//! Pulse-train generators built on the timers
//!
//! A pulse is one high phase followed by one low phase. The generators only
//! compute the output level; writing it to a digital output is left to the
//! caller.
//!
//! Author: Moroya Sakamoto

use crate::asynchronous::AsynchronousTimer;
use crate::config::secs_to_timestamp_ticks;
use crate::isochronous::IsochronousTimer;
use crate::task::{CycleContext, CyclicTask, TaskControl};

/// Pulse timing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulsePattern {
    /// High phase duration in seconds
    pub high_secs: f64,
    /// Low phase duration in seconds
    pub low_secs: f64,
    /// Number of pulses, `None` for an endless train
    pub pulses: Option<u32>,
}

impl PulsePattern {
    /// Square wave at `frequency_hz` with 50 % duty, endless
    pub fn square(frequency_hz: f64) -> Self {
        let half = 0.5 / frequency_hz;
        Self {
            high_secs: half,
            low_secs: half,
            pulses: None,
        }
    }

    /// Limit the train to `count` pulses
    pub fn with_count(mut self, count: u32) -> Self {
        self.pulses = Some(count);
        self
    }

    /// Phase duration for the given level
    fn phase_secs(&self, high: bool) -> f64 {
        if high {
            self.high_secs
        } else {
            self.low_secs
        }
    }

    /// Is the train complete after `emitted` pulses?
    fn finished(&self, emitted: u32) -> bool {
        self.pulses.is_some_and(|n| emitted >= n)
    }
}

/// Pulse generator for fixed-period tasks
pub struct IsochronousPulse {
    pattern: PulsePattern,
    timer: IsochronousTimer,
    level: bool,
    emitted: u32,
    started: bool,
}

impl IsochronousPulse {
    /// Generator for a task with the given cycle time
    pub fn new(pattern: PulsePattern, sampling_secs: f64) -> Self {
        Self {
            pattern,
            timer: IsochronousTimer::new(sampling_secs),
            level: false,
            emitted: 0,
            started: false,
        }
    }

    /// Current output level
    pub fn level(&self) -> bool {
        self.level
    }

    /// Completed pulses (high and low phase)
    pub fn pulses_emitted(&self) -> u32 {
        self.emitted
    }
}

impl CyclicTask for IsochronousPulse {
    fn cycle(&mut self, _ctx: &CycleContext) -> TaskControl {
        if !self.started {
            if self.pattern.finished(0) {
                return TaskControl::Done;
            }
            self.started = true;
            self.level = true;
            self.timer.start_secs(self.pattern.high_secs);
            return TaskControl::Continue;
        }

        if !self.timer.tick() {
            return TaskControl::Continue;
        }

        if self.level {
            self.level = false;
            log_trace!("falling edge after pulse {}", self.emitted + 1);
        } else {
            self.emitted += 1;
            if self.pattern.finished(self.emitted) {
                return TaskControl::Done;
            }
            self.level = true;
        }
        self.timer.start_secs(self.pattern.phase_secs(self.level));
        TaskControl::Continue
    }
}

/// Pulse generator for irregularly scheduled tasks
pub struct AsynchronousPulse {
    pattern: PulsePattern,
    timer: AsynchronousTimer,
    level: bool,
    emitted: u32,
}

impl AsynchronousPulse {
    /// Idle generator; the first cycle raises the output
    pub fn new(pattern: PulsePattern) -> Self {
        Self {
            pattern,
            timer: AsynchronousTimer::new(),
            level: false,
            emitted: 0,
        }
    }

    /// Current output level
    pub fn level(&self) -> bool {
        self.level
    }

    /// Completed pulses (high and low phase)
    pub fn pulses_emitted(&self) -> u32 {
        self.emitted
    }

    fn arm(&mut self, now: u32) {
        let ticks = secs_to_timestamp_ticks(self.pattern.phase_secs(self.level));
        // `elapsed` is exclusive: fire on the tick that ends the phase
        self.timer.start(ticks.saturating_sub(1), now);
    }
}

impl CyclicTask for AsynchronousPulse {
    fn cycle(&mut self, ctx: &CycleContext) -> TaskControl {
        if self.timer.destination().is_none() {
            if self.pattern.finished(0) {
                return TaskControl::Done;
            }
            self.level = true;
            self.arm(ctx.now);
            return TaskControl::Continue;
        }

        if !self.timer.elapsed(ctx.now) {
            return TaskControl::Continue;
        }

        if self.level {
            self.level = false;
            log_trace!("falling edge after pulse {}", self.emitted + 1);
        } else {
            self.emitted += 1;
            if self.pattern.finished(self.emitted) {
                return TaskControl::Done;
            }
            self.level = true;
        }
        self.arm(ctx.now);
        TaskControl::Continue
    }
}
