//! Timestamp arithmetic — wrap-aware comparison and addition
//!
//! The drive timestamp is a `u32` counter that wraps at [`TIMESTAMP_RANGE`],
//! not at `2^32`. The top 256 values are never produced by the hardware, so
//! native `wrapping_add` is wrong near the boundary and every operation here
//! does its modular arithmetic explicitly.
//!
//! Two timestamps can only be ordered if they are at most
//! [`TIMESTAMP_TRANSLATOR`] ticks apart. Farther apart, the result is
//! deterministic but meaningless.
//!
//! Author: Moroya Sakamoto

/// Exclusive upper bound of the timestamp counter
pub const TIMESTAMP_RANGE: u32 = 0xFFFF_FF00;

/// Half-range split point used to tell wrapped from non-wrapped pairs
pub const TIMESTAMP_TRANSLATOR: u32 = (TIMESTAMP_RANGE - 1) / 2;

/// Is `a` strictly after `b` on the modular timeline?
#[inline]
pub const fn greater(a: u32, b: u32) -> bool {
    if a > b {
        a - b <= TIMESTAMP_TRANSLATOR
    } else {
        b - a > TIMESTAMP_TRANSLATOR
    }
}

/// Is `a` at or after `b` on the modular timeline?
#[inline]
pub const fn greater_or_equal(a: u32, b: u32) -> bool {
    if a >= b {
        a - b <= TIMESTAMP_TRANSLATOR
    } else {
        b - a > TIMESTAMP_TRANSLATOR
    }
}

/// Add a signed tick count to a timestamp, modulo [`TIMESTAMP_RANGE`]
///
/// Negative durations go through [`subtract`]; the `+ 1`/`- 1` pair keeps
/// `i32::MIN` representable.
#[inline]
pub const fn add(timestamp: u32, duration: i32) -> u32 {
    if duration >= 0 {
        let duration = duration as u32;
        if timestamp >= TIMESTAMP_RANGE - duration {
            timestamp - (TIMESTAMP_RANGE - duration)
        } else {
            timestamp + duration
        }
    } else {
        let magnitude = (-(duration + 1)) as u32;
        subtract(subtract(timestamp, magnitude), 1)
    }
}

/// Subtract a tick count from a timestamp, modulo [`TIMESTAMP_RANGE`]
///
/// `duration` must be below [`TIMESTAMP_RANGE`]. Zero returns `timestamp`.
#[inline]
pub const fn subtract(timestamp: u32, duration: u32) -> u32 {
    if timestamp < duration {
        TIMESTAMP_RANGE - (duration - timestamp)
    } else {
        timestamp - duration
    }
}

/// Ticks from `from` forward to `to`, modulo [`TIMESTAMP_RANGE`]
#[inline]
pub const fn distance(from: u32, to: u32) -> u32 {
    if to >= from {
        to - from
    } else {
        TIMESTAMP_RANGE - (from - to)
    }
}

/// Is `timestamp` inside the counter's valid domain?
#[inline]
pub const fn is_valid(timestamp: u32) -> bool {
    timestamp < TIMESTAMP_RANGE
}
