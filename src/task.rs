//! Cyclic task contract
//!
//! A task is an owned state machine called once per cycle. It owns its
//! timers outright: no statics, no sharing between tasks, no locks.
//!
//! Author: Moroya Sakamoto

/// What the runtime should do after a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskControl {
    /// Call the task again next cycle
    Continue,
    /// Task has finished its work
    Done,
}

/// Per-cycle inputs handed to a task
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleContext {
    /// Hardware timestamp at the start of this cycle
    pub now: u32,
    /// Cycle number since the runtime started (0-based)
    pub cycle: u64,
    /// Nominal cycle time in seconds
    pub sampling_secs: f64,
}

impl CycleContext {
    /// Nominal cycle rate in Hz (truncated)
    pub fn frequency_hz(&self) -> u32 {
        if self.sampling_secs > 0.0 {
            (1.0 / self.sampling_secs) as u32
        } else {
            0
        }
    }
}

/// A routine driven cycle-by-cycle
pub trait CyclicTask {
    /// Run one cycle. Must not block.
    fn cycle(&mut self, ctx: &CycleContext) -> TaskControl;
}

impl<F> CyclicTask for F
where
    F: FnMut(&CycleContext) -> TaskControl,
{
    fn cycle(&mut self, ctx: &CycleContext) -> TaskControl {
        self(ctx)
    }
}
