//! Timestamp sources
//!
//! On a drive the timestamp is a read-only hardware counter ticking at
//! 100 kHz and wrapping at [`TIMESTAMP_RANGE`]. The timer core only ever
//! reads it. [`SoftwareClock`] stands in for it in tests and simulation.
//!
//! Author: Moroya Sakamoto

use crate::config::TIMESTAMP_RATE_HZ;
use crate::timestamp::{self, TIMESTAMP_RANGE};

/// Anything that can report the current drive timestamp
pub trait TimestampSource {
    /// Current timestamp, always below [`TIMESTAMP_RANGE`]
    fn now(&self) -> u32;
}

/// Software timestamp counter
///
/// Size: 12 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftwareClock {
    /// Current timestamp
    now: u32,
    /// Counter rate (ticks per second)
    rate_hz: u32,
    /// Number of wraps past zero
    wraps: u32,
}

impl SoftwareClock {
    /// Clock at zero, ticking at the hardware rate
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Clock starting at an arbitrary timestamp (reduced into range)
    pub const fn starting_at(now: u32) -> Self {
        Self {
            now: now % TIMESTAMP_RANGE,
            rate_hz: TIMESTAMP_RATE_HZ,
            wraps: 0,
        }
    }

    /// Clock with a custom counter rate
    pub const fn with_rate(rate_hz: u32) -> Self {
        Self {
            now: 0,
            rate_hz,
            wraps: 0,
        }
    }

    /// Advance by timestamp ticks
    pub fn advance(&mut self, ticks: u32) {
        let mut remaining = ticks % TIMESTAMP_RANGE;
        // `timestamp::add` takes an i32 span
        while remaining > 0 {
            let step = remaining.min(i32::MAX as u32);
            let next = timestamp::add(self.now, step as i32);
            if next < self.now {
                self.wraps += 1;
                log_debug!("timestamp wrapped ({} wraps)", self.wraps);
            }
            self.now = next;
            remaining -= step;
        }
    }

    /// Advance by seconds (truncated to whole ticks)
    pub fn advance_secs(&mut self, secs: f64) {
        self.advance((secs * self.rate_hz as f64) as u32);
    }

    /// Jump to an absolute timestamp (reduced into range)
    pub fn set(&mut self, now: u32) {
        self.now = now % TIMESTAMP_RANGE;
    }

    /// Counter rate (ticks per second)
    pub fn rate_hz(&self) -> u32 {
        self.rate_hz
    }

    /// Number of wraps past zero
    pub fn wraps(&self) -> u32 {
        self.wraps
    }

    /// Ticks elapsed since `reference`, modulo the range
    pub fn elapsed_since(&self, reference: u32) -> u32 {
        timestamp::distance(reference, self.now)
    }
}

impl Default for SoftwareClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimestampSource for SoftwareClock {
    fn now(&self) -> u32 {
        self.now
    }
}
