//! Error types for the checked timer entry points
//!
//! The hot paths (`tick`, `elapsed`, timestamp arithmetic) never fail.
//! Only constructors and starts that validate caller input return these.
//!
//! Author: Moroya Sakamoto

use core::fmt;

/// Result type for checked timer operations
pub type Result<T> = core::result::Result<T, TimerError>;

/// Caller contract violations caught by checked entry points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    /// Sampling period is zero, negative, NaN or longer than one second
    InvalidSampling(f64),
    /// Span exceeds the half-range translator
    SpanTooLong(u32),
    /// Negative span passed to a timer start
    NegativeSpan(i32),
    /// Timestamp lies in the reserved top of the counter
    TimestampOutOfRange(u32),
    /// Timestamp rate of zero
    InvalidRate,
    /// Clock ticks at a different rate than the configuration expects
    RateMismatch { clock_hz: u32, config_hz: u32 },
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerError::InvalidSampling(secs) => write!(f, "invalid sampling period: {secs} s"),
            TimerError::SpanTooLong(ticks) => {
                write!(f, "span of {ticks} ticks exceeds half the timestamp range")
            }
            TimerError::NegativeSpan(ticks) => write!(f, "negative span: {ticks} ticks"),
            TimerError::TimestampOutOfRange(ts) => write!(f, "timestamp {ts:#010x} out of range"),
            TimerError::InvalidRate => write!(f, "timestamp rate must be non-zero"),
            TimerError::RateMismatch { clock_hz, config_hz } => {
                write!(f, "clock ticks at {clock_hz} Hz, config expects {config_hz} Hz")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TimerError {}
