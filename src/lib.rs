//! tama-timer — wrap-aware timestamps and periodic timers
//!
//! Timing core for cyclic tasks on a servo drive:
//! - Timestamp arithmetic modulo `0xFFFF_FF00` (not `2^32`)
//! - Isochronous timer: counts fixed-period task cycles
//! - Asynchronous timer: measures spans on the 100 kHz hardware timestamp
//! - Single owner per timer, no locks, no heap, O(1) polls
//!
//! Author: Moroya Sakamoto

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[macro_use]
mod logging;

pub mod timestamp;
pub mod timer;
pub mod isochronous;
pub mod asynchronous;
pub mod clock;
pub mod task;
pub mod runtime;
pub mod pulse;
pub mod config;
pub mod error;

#[cfg(feature = "ffi")]
pub mod ffi;
#[cfg(feature = "python")]
mod python;

pub use timer::{PollTimer, TimerState};
pub use isochronous::IsochronousTimer;
pub use asynchronous::AsynchronousTimer;
pub use clock::{SoftwareClock, TimestampSource};
pub use task::{CycleContext, CyclicTask, TaskControl};
pub use runtime::{RunStats, Runtime};
pub use pulse::{AsynchronousPulse, IsochronousPulse, PulsePattern};
pub use config::RuntimeConfig;
pub use error::{Result, TimerError};
