//! Runtime — drives one cyclic task against a software clock
//!
//! Two modes, matching the two timer kinds:
//! - isochronous: [`Runtime::step`] runs one cycle and advances the clock
//!   by exactly one sampling period
//! - asynchronous: [`Runtime::step_after`] advances the clock by an
//!   arbitrary gap first, like a task scheduled "as fast as possible"
//!
//! Author: Moroya Sakamoto

use crate::clock::{SoftwareClock, TimestampSource};
use crate::config::RuntimeConfig;
use crate::error::{Result, TimerError};
use crate::task::{CycleContext, CyclicTask, TaskControl};

/// Cyclic task runtime
pub struct Runtime {
    /// Timestamp source seen by tasks
    clock: SoftwareClock,
    /// Validated configuration
    config: RuntimeConfig,
    /// Timestamp ticks per sampling period
    ticks_per_cycle: u32,
    /// Cycles executed so far
    cycles: u64,
}

impl Runtime {
    /// Create a runtime with a clock starting at zero
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        Self::with_clock(config, SoftwareClock::with_rate(config.timestamp_rate_hz))
    }

    /// Create a runtime around an existing clock
    ///
    /// The clock must tick at `config.timestamp_rate_hz`.
    pub fn with_clock(config: RuntimeConfig, clock: SoftwareClock) -> Result<Self> {
        if let Err(err) = config.validate() {
            log_error!("invalid runtime config: {}", err);
            return Err(err);
        }
        if clock.rate_hz() != config.timestamp_rate_hz {
            let err = TimerError::RateMismatch {
                clock_hz: clock.rate_hz(),
                config_hz: config.timestamp_rate_hz,
            };
            log_error!("invalid runtime clock: {}", err);
            return Err(err);
        }
        log_info!(
            "runtime: {} ticks per cycle at {} Hz",
            config.ticks_per_cycle(),
            config.timestamp_rate_hz
        );
        Ok(Self {
            clock,
            config,
            ticks_per_cycle: config.ticks_per_cycle(),
            cycles: 0,
        })
    }

    /// Run one isochronous cycle
    ///
    /// The task sees the timestamp at the start of the cycle; the clock then
    /// advances by one sampling period.
    pub fn step(&mut self, task: &mut dyn CyclicTask) -> TaskControl {
        let control = self.call(task);
        self.clock.advance(self.ticks_per_cycle);
        control
    }

    /// Run one asynchronous cycle after `gap_ticks` timestamp ticks
    pub fn step_after(&mut self, task: &mut dyn CyclicTask, gap_ticks: u32) -> TaskControl {
        self.clock.advance(gap_ticks);
        self.call(task)
    }

    /// Run up to `max_cycles` isochronous cycles
    pub fn run_for(&mut self, task: &mut dyn CyclicTask, max_cycles: u64) -> RunStats {
        let start = self.begin();
        let mut executed = 0u64;
        let mut completed = false;

        while executed < max_cycles {
            executed += 1;
            if self.step(task) == TaskControl::Done {
                completed = true;
                break;
            }
        }

        self.finish(start, executed, completed)
    }

    /// Run one asynchronous cycle per gap in `gaps`
    pub fn run_with_gaps(&mut self, task: &mut dyn CyclicTask, gaps: &[u32]) -> RunStats {
        let start = self.begin();
        let mut executed = 0u64;
        let mut completed = false;

        for &gap in gaps {
            executed += 1;
            if self.step_after(task, gap) == TaskControl::Done {
                completed = true;
                break;
            }
        }

        self.finish(start, executed, completed)
    }

    /// Timestamp source seen by tasks
    pub fn clock(&self) -> &SoftwareClock {
        &self.clock
    }

    /// Total cycles executed
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Active configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    fn call(&mut self, task: &mut dyn CyclicTask) -> TaskControl {
        let ctx = CycleContext {
            now: self.clock.now(),
            cycle: self.cycles,
            sampling_secs: self.config.sampling_secs,
        };
        self.cycles += 1;
        task.cycle(&ctx)
    }

    fn begin(&self) -> (u32, u32) {
        (self.clock.now(), self.clock.wraps())
    }

    fn finish(&self, (start_ts, start_wraps): (u32, u32), cycles: u64, completed: bool) -> RunStats {
        let stats = RunStats {
            cycles,
            elapsed_ticks: self.clock.elapsed_since(start_ts),
            completed,
            clock_wraps: self.clock.wraps() - start_wraps,
        };
        log_debug!("run finished after {} cycles (completed: {})", stats.cycles, stats.completed);
        stats
    }
}

impl Default for Runtime {
    fn default() -> Self {
        let config = RuntimeConfig::default();
        Self {
            clock: SoftwareClock::with_rate(config.timestamp_rate_hz),
            ticks_per_cycle: config.ticks_per_cycle(),
            config,
            cycles: 0,
        }
    }
}

/// Run loop statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Cycles executed in this run
    pub cycles: u64,
    /// Timestamp ticks elapsed (modulo the range)
    pub elapsed_ticks: u32,
    /// Task returned `Done`
    pub completed: bool,
    /// Clock wraps during this run
    pub clock_wraps: u32,
}
