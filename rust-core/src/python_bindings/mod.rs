//! PyO3 bindings for Python integration

use pyo3::prelude::*;

mod spectrum_bindings;
mod sweep_bindings;

/// Python module definition
#[pymodule]
fn fourier_workbench(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<spectrum_bindings::PySpectrumAnalyzer>()?;

    // Add configuration enums
    m.add_class::<spectrum_bindings::PyFrequencyUnit>()?;
    m.add_class::<spectrum_bindings::PyPowerScale>()?;

    m.add_function(wrap_pyfunction!(sweep_bindings::py_sigma_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(sweep_bindings::py_envelope_step, m)?)?;
    m.add_function(wrap_pyfunction!(sweep_bindings::py_sweep_power, m)?)?;
    m.add_function(wrap_pyfunction!(sweep_bindings::py_two_tone_product, m)?)?;

    Ok(())
}
