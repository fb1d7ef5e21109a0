//! PyO3 bindings for offline analysis and test rigs
//!
//! Author: Moroya Sakamoto

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::asynchronous::AsynchronousTimer;
use crate::error::TimerError;
use crate::isochronous::IsochronousTimer;
use crate::timestamp;

impl From<TimerError> for PyErr {
    fn from(err: TimerError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[pyfunction]
fn greater(a: u32, b: u32) -> bool {
    timestamp::greater(a, b)
}

#[pyfunction]
fn greater_or_equal(a: u32, b: u32) -> bool {
    timestamp::greater_or_equal(a, b)
}

#[pyfunction]
fn add(ts: u32, duration: i32) -> u32 {
    timestamp::add(ts, duration)
}

/// Cycle-counting timer
#[pyclass(name = "IsochronousTimer")]
struct PyIsochronousTimer {
    inner: IsochronousTimer,
}

#[pymethods]
impl PyIsochronousTimer {
    /// A zero `sampling_secs` leaves only `start_ticks` meaningful
    #[new]
    fn new(sampling_secs: f64) -> Self {
        Self {
            inner: IsochronousTimer::new(sampling_secs),
        }
    }

    fn start_secs(&mut self, duration_secs: f64) {
        self.inner.start_secs(duration_secs);
    }

    fn start_ticks(&mut self, ticks: u32) {
        self.inner.start_ticks(ticks);
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn tick(&mut self) -> bool {
        self.inner.tick()
    }

    #[getter]
    fn target_tick(&self) -> u32 {
        self.inner.target_tick()
    }
}

/// Timestamp-delta timer
#[pyclass(name = "AsynchronousTimer")]
struct PyAsynchronousTimer {
    inner: AsynchronousTimer,
}

#[pymethods]
impl PyAsynchronousTimer {
    #[new]
    fn new() -> Self {
        Self {
            inner: AsynchronousTimer::new(),
        }
    }

    fn start(&mut self, ticks: i32, now: u32) -> PyResult<()> {
        Ok(self.inner.start_checked(ticks, now)?)
    }

    fn start_secs(&mut self, duration_secs: f64, now: u32) -> PyResult<()> {
        Ok(self.inner.start_secs_checked(duration_secs, now)?)
    }

    fn elapsed(&self, now: u32) -> bool {
        self.inner.elapsed(now)
    }
}

#[pymodule]
fn tama_timer(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("TIMESTAMP_RANGE", timestamp::TIMESTAMP_RANGE)?;
    m.add("TIMESTAMP_TRANSLATOR", timestamp::TIMESTAMP_TRANSLATOR)?;
    m.add_function(wrap_pyfunction!(greater, m)?)?;
    m.add_function(wrap_pyfunction!(greater_or_equal, m)?)?;
    m.add_function(wrap_pyfunction!(add, m)?)?;
    m.add_class::<PyIsochronousTimer>()?;
    m.add_class::<PyAsynchronousTimer>()?;
    Ok(())
}
