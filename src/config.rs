//! Rates and defaults
//!
//! Author: Moroya Sakamoto

use crate::error::{Result, TimerError};

/// Hardware timestamp rate (ticks per second)
pub const TIMESTAMP_RATE_HZ: u32 = 100_000;

/// Default cyclic task period: 100 µs
pub const DEFAULT_SAMPLING_SECS: f64 = 0.0001;

/// Cyclic runtime configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuntimeConfig {
    /// Task cycle time in seconds
    pub sampling_secs: f64,
    /// Timestamp counter rate in Hz
    pub timestamp_rate_hz: u32,
}

impl RuntimeConfig {
    /// Configuration for a task running every `sampling_secs`
    pub const fn with_sampling(sampling_secs: f64) -> Self {
        Self {
            sampling_secs,
            timestamp_rate_hz: TIMESTAMP_RATE_HZ,
        }
    }

    /// Check that the period is usable and the counter actually moves
    pub fn validate(&self) -> Result<()> {
        if !(self.sampling_secs > 0.0 && self.sampling_secs <= 1.0) {
            return Err(TimerError::InvalidSampling(self.sampling_secs));
        }
        if self.timestamp_rate_hz == 0 {
            return Err(TimerError::InvalidRate);
        }
        Ok(())
    }

    /// Timestamp ticks that pass during one task cycle (truncated)
    pub fn ticks_per_cycle(&self) -> u32 {
        (self.sampling_secs * self.timestamp_rate_hz as f64) as u32
    }

    /// Task cycles per second (truncated)
    pub fn cycles_per_second(&self) -> u32 {
        if self.sampling_secs > 0.0 {
            (1.0 / self.sampling_secs) as u32
        } else {
            0
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::with_sampling(DEFAULT_SAMPLING_SECS)
    }
}

/// Convert seconds to timestamp ticks at [`TIMESTAMP_RATE_HZ`]
///
/// Truncates toward zero; saturates at the `i32` bounds.
pub fn secs_to_timestamp_ticks(secs: f64) -> i32 {
    (secs * TIMESTAMP_RATE_HZ as f64) as i32
}
