//! C ABI for host tooling
//!
//! Timers are handed out as opaque heap pointers and must be released with
//! the matching `*_free`. Null pointers are tolerated everywhere and read as
//! "not elapsed".
//!
//! Author: Moroya Sakamoto

use crate::asynchronous::AsynchronousTimer;
use crate::isochronous::IsochronousTimer;
use crate::timestamp;

#[no_mangle]
pub extern "C" fn tama_timestamp_greater(a: u32, b: u32) -> bool {
    timestamp::greater(a, b)
}

#[no_mangle]
pub extern "C" fn tama_timestamp_greater_or_equal(a: u32, b: u32) -> bool {
    timestamp::greater_or_equal(a, b)
}

#[no_mangle]
pub extern "C" fn tama_timestamp_add(ts: u32, duration: i32) -> u32 {
    timestamp::add(ts, duration)
}

/// Allocate an isochronous timer for a task with the given cycle time
#[no_mangle]
pub extern "C" fn tama_iso_timer_new(sampling_secs: f64) -> *mut IsochronousTimer {
    Box::into_raw(Box::new(IsochronousTimer::new(sampling_secs)))
}

/// # Safety
/// `timer` must come from [`tama_iso_timer_new`] and not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn tama_iso_timer_free(timer: *mut IsochronousTimer) {
    if !timer.is_null() {
        drop(Box::from_raw(timer));
    }
}

/// # Safety
/// `timer` must be null or a live pointer from [`tama_iso_timer_new`].
#[no_mangle]
pub unsafe extern "C" fn tama_iso_timer_start_secs(timer: *mut IsochronousTimer, duration_secs: f64) {
    if let Some(timer) = timer.as_mut() {
        timer.start_secs(duration_secs);
    }
}

/// # Safety
/// `timer` must be null or a live pointer from [`tama_iso_timer_new`].
#[no_mangle]
pub unsafe extern "C" fn tama_iso_timer_start_ticks(timer: *mut IsochronousTimer, ticks: u32) {
    if let Some(timer) = timer.as_mut() {
        timer.start_ticks(ticks);
    }
}

/// # Safety
/// `timer` must be null or a live pointer from [`tama_iso_timer_new`].
#[no_mangle]
pub unsafe extern "C" fn tama_iso_timer_reset(timer: *mut IsochronousTimer) {
    if let Some(timer) = timer.as_mut() {
        timer.reset();
    }
}

/// # Safety
/// `timer` must be null or a live pointer from [`tama_iso_timer_new`].
#[no_mangle]
pub unsafe extern "C" fn tama_iso_timer_tick(timer: *mut IsochronousTimer) -> bool {
    match timer.as_mut() {
        Some(timer) => timer.tick(),
        None => false,
    }
}

/// Allocate an idle asynchronous timer
#[no_mangle]
pub extern "C" fn tama_async_timer_new() -> *mut AsynchronousTimer {
    Box::into_raw(Box::new(AsynchronousTimer::new()))
}

/// # Safety
/// `timer` must come from [`tama_async_timer_new`] and not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn tama_async_timer_free(timer: *mut AsynchronousTimer) {
    if !timer.is_null() {
        drop(Box::from_raw(timer));
    }
}

/// # Safety
/// `timer` must be null or a live pointer from [`tama_async_timer_new`].
#[no_mangle]
pub unsafe extern "C" fn tama_async_timer_start(timer: *mut AsynchronousTimer, ticks: i32, now: u32) -> bool {
    match timer.as_mut() {
        Some(timer) => timer.start_checked(ticks, now).is_ok(),
        None => false,
    }
}

/// # Safety
/// `timer` must be null or a live pointer from [`tama_async_timer_new`].
#[no_mangle]
pub unsafe extern "C" fn tama_async_timer_elapsed(timer: *const AsynchronousTimer, now: u32) -> bool {
    match timer.as_ref() {
        Some(timer) => timer.elapsed(now),
        None => false,
    }
}
