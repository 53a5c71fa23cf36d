//! Python bindings for spectrum analysis

use pyo3::prelude::*;
use pyo3::types::PyDict;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::error::SpectralError;
use crate::spectrum::{AnalyzerConfig, FrequencyUnit, PowerScale, SpectrumAnalyzer, SpectrumCoefficients};

impl From<SpectralError> for PyErr {
    fn from(err: SpectralError) -> Self {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string())
    }
}

/// Frequency unit enum exposed to Python
#[pyclass(name = "FrequencyUnit")]
#[derive(Clone)]
pub enum PyFrequencyUnit {
    Hertz,
    Angular,
}

impl From<PyFrequencyUnit> for FrequencyUnit {
    fn from(py_unit: PyFrequencyUnit) -> Self {
        match py_unit {
            PyFrequencyUnit::Hertz => FrequencyUnit::Hertz,
            PyFrequencyUnit::Angular => FrequencyUnit::Angular,
        }
    }
}

/// Power scale enum exposed to Python
#[pyclass(name = "PowerScale")]
#[derive(Clone)]
pub enum PyPowerScale {
    Magnitude,
    Energy,
}

impl From<PyPowerScale> for PowerScale {
    fn from(py_scale: PyPowerScale) -> Self {
        match py_scale {
            PyPowerScale::Magnitude => PowerScale::Magnitude,
            PyPowerScale::Energy => PowerScale::Energy,
        }
    }
}

/// Spectrum analyzer exposed to Python
#[pyclass(name = "SpectrumAnalyzer")]
pub struct PySpectrumAnalyzer {
    analyzer: SpectrumAnalyzer,
}

impl PySpectrumAnalyzer {
    fn coefficients(
        &mut self,
        times: PyReadonlyArray1<f64>,
        amplitudes: PyReadonlyArray1<f64>,
    ) -> PyResult<SpectrumCoefficients> {
        let buffer = self
            .analyzer
            .buffer(times.as_array().to_vec(), amplitudes.as_array().to_vec())?;
        Ok(self.analyzer.coefficients(&buffer)?)
    }
}

#[pymethods]
impl PySpectrumAnalyzer {
    /// Create a new spectrum analyzer
    ///
    /// Args:
    ///     frequency_unit: Unit of reported frequencies
    ///     power_scale: Magnitude or one-sided energy per bin
    ///     spacing_tolerance: Relative tolerance on sample spacing
    #[new]
    #[pyo3(signature = (frequency_unit=PyFrequencyUnit::Hertz, power_scale=PyPowerScale::Energy, spacing_tolerance=1e-6))]
    fn new(
        frequency_unit: PyFrequencyUnit,
        power_scale: PyPowerScale,
        spacing_tolerance: f64,
    ) -> Self {
        let config = AnalyzerConfig {
            frequency_unit: frequency_unit.into(),
            power_scale: power_scale.into(),
            spacing_tolerance,
            ..AnalyzerConfig::default()
        };

        Self {
            analyzer: SpectrumAnalyzer::new(config),
        }
    }

    /// Analyze uniformly sampled data
    ///
    /// Args:
    ///     times: Sample times as numpy array
    ///     amplitudes: Sample values as numpy array
    ///
    /// Returns:
    ///     Dict with frequencies, real, imag, magnitude, power,
    ///     power_frequencies, dc and (if N >= 3) primary/secondary peaks
    ///     as (frequency, magnitude) tuples
    fn analyze<'py>(
        &mut self,
        py: Python<'py>,
        times: PyReadonlyArray1<f64>,
        amplitudes: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyDict> {
        let buffer = self
            .analyzer
            .buffer(times.as_array().to_vec(), amplitudes.as_array().to_vec())?;
        let analysis = self.analyzer.analyze(&buffer)?;
        let unit = self.analyzer.config().frequency_unit;
        let coeffs = &analysis.coefficients;

        let frequencies: Vec<f64> = (0..coeffs.len()).map(|k| coeffs.frequency(k, unit)).collect();
        let real: Vec<f64> = coeffs.values().iter().map(|c| c.re).collect();
        let imag: Vec<f64> = coeffs.values().iter().map(|c| c.im).collect();

        let result = PyDict::new(py);
        result.set_item("frequencies", PyArray1::from_vec(py, frequencies))?;
        result.set_item("real", PyArray1::from_vec(py, real))?;
        result.set_item("imag", PyArray1::from_vec(py, imag))?;
        result.set_item("magnitude", PyArray1::from_vec(py, coeffs.positive_magnitudes()))?;
        result.set_item("power", PyArray1::from_vec(py, analysis.power.bins.clone()))?;
        result.set_item(
            "power_frequencies",
            PyArray1::from_vec(py, analysis.power.frequencies.clone()),
        )?;
        result.set_item("dc", analysis.dc_level())?;

        if let Some(peaks) = analysis.peaks {
            result.set_item("primary", (peaks.primary.frequency, peaks.primary.magnitude))?;
            result.set_item("secondary", (peaks.secondary.frequency, peaks.secondary.magnitude))?;
        }

        Ok(result)
    }

    /// Reconstruct the time series from its spectrum
    ///
    /// Args:
    ///     times: Sample times as numpy array
    ///     amplitudes: Sample values as numpy array
    ///     bins: Optional non-negative bins to keep (all bins if omitted)
    ///
    /// Returns:
    ///     Reconstructed samples as numpy array
    #[pyo3(signature = (times, amplitudes, bins=None))]
    fn reconstruct<'py>(
        &mut self,
        py: Python<'py>,
        times: PyReadonlyArray1<f64>,
        amplitudes: PyReadonlyArray1<f64>,
        bins: Option<Vec<usize>>,
    ) -> PyResult<&'py PyArray1<f64>> {
        let coeffs = self.coefficients(times, amplitudes)?;
        let signal = match bins {
            Some(bins) => self.analyzer.reconstruct_bins(&coeffs, &bins)?,
            None => self.analyzer.reconstruct(&coeffs)?,
        };

        Ok(PyArray1::from_vec(py, signal))
    }

    /// Primary and secondary peaks as ((freq, mag), (freq, mag))
    fn peaks(
        &mut self,
        times: PyReadonlyArray1<f64>,
        amplitudes: PyReadonlyArray1<f64>,
    ) -> PyResult<((f64, f64), (f64, f64))> {
        let buffer = self
            .analyzer
            .buffer(times.as_array().to_vec(), amplitudes.as_array().to_vec())?;
        let pair = self.analyzer.peaks(&buffer)?;

        Ok((
            (pair.primary.frequency, pair.primary.magnitude),
            (pair.secondary.frequency, pair.secondary.magnitude),
        ))
    }
}
