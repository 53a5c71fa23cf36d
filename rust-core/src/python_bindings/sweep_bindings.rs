//! Python bindings for the envelope sweep and signal helpers

use pyo3::prelude::*;
use numpy::{PyArray1, PyArray2, PyReadonlyArray1, IntoPyArray};
use crate::spectrum::reconstruct::two_tone_product;
use crate::spectrum::sweep::{envelope_step, power_matrix, sigma_schedule, EnvelopeSweep};

/// Narrow-then-widen envelope widths for `frames` steps
#[pyfunction]
#[pyo3(name = "sigma_schedule")]
pub fn py_sigma_schedule<'py>(py: Python<'py>, frames: usize) -> &'py PyArray1<f64> {
    PyArray1::from_vec(py, sigma_schedule(frames))
}

/// One sweep step: (envelope, power) for width `sigma`
#[pyfunction]
#[pyo3(name = "envelope_step")]
pub fn py_envelope_step<'py>(
    py: Python<'py>,
    times: PyReadonlyArray1<f64>,
    sigma: f64,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let frame = envelope_step(&times.as_array().to_vec(), sigma)?;
    Ok((
        PyArray1::from_vec(py, frame.envelope),
        PyArray1::from_vec(py, frame.power),
    ))
}

/// Power spectra for a whole schedule as a (frames × bins) array
#[pyfunction]
#[pyo3(name = "sweep_power")]
pub fn py_sweep_power<'py>(
    py: Python<'py>,
    times: PyReadonlyArray1<f64>,
    frames: usize,
) -> PyResult<&'py PyArray2<f64>> {
    let sweep = EnvelopeSweep::new(times.as_array().to_vec(), frames)?;
    let frames = sweep.collect::<crate::error::Result<Vec<_>>>()?;
    Ok(power_matrix(&frames)?.into_pyarray(py))
}

/// Fitted model 2·sin(αt)·cos(βt)
#[pyfunction]
#[pyo3(name = "two_tone_product")]
pub fn py_two_tone_product<'py>(
    py: Python<'py>,
    times: PyReadonlyArray1<f64>,
    alpha: f64,
    beta: f64,
) -> &'py PyArray1<f64> {
    let ts = times.as_array().to_vec();
    PyArray1::from_vec(py, two_tone_product(&ts, alpha, beta))
}
