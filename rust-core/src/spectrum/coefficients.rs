//! Amplitude normalization of raw DFT output
//!
//! Raw bins are scaled by `2/N` so a sinusoid of amplitude A shows up with
//! magnitude A, then the DC bin is halved: it has no negative-frequency partner,
//! so after the `2/N` scaling it would report twice the signal mean.

use super::fft::{bin_frequency, FrequencyUnit};
use crate::error::{Result, SpectralError};
use num_complex::Complex64;

/// Full N-bin spectrum tied to its sample spacing
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumCoefficients {
    values: Vec<Complex64>,
    dt: f64,
    normalized: bool,
}

impl SpectrumCoefficients {
    /// Wrap raw (un-normalized) transform output
    pub fn from_raw(values: Vec<Complex64>, dt: f64) -> Self {
        Self {
            values,
            dt,
            normalized: false,
        }
    }

    /// Wrap coefficients that already follow the amplitude convention
    pub fn from_normalized(values: Vec<Complex64>, dt: f64) -> Self {
        Self {
            values,
            dt,
            normalized: true,
        }
    }

    pub fn values(&self) -> &[Complex64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Complex64> {
        self.values
    }

    /// Number of bins N
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample spacing of the originating buffer
    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// DC coefficient, `None` for an empty spectrum
    pub fn dc(&self) -> Option<Complex64> {
        self.values.first().copied()
    }

    /// Bins carrying independent information for real input (⌈N/2⌉)
    pub fn positive_len(&self) -> usize {
        self.values.len().div_ceil(2)
    }

    /// Signed frequency of bin `k`
    pub fn frequency(&self, k: usize, unit: FrequencyUnit) -> f64 {
        bin_frequency(k, self.values.len(), self.dt, unit)
    }

    /// Bin spacing `1/(N·dt)` in the given unit
    pub fn resolution(&self, unit: FrequencyUnit) -> f64 {
        unit.scale() / (self.values.len() as f64 * self.dt)
    }

    /// Magnitudes of the first ⌈N/2⌉ bins
    pub fn positive_magnitudes(&self) -> Vec<f64> {
        self.values[..self.positive_len()]
            .iter()
            .map(|c| c.norm())
            .collect()
    }

    /// Largest deviation from `c[N-k] = conj(c[k])` over all bins
    ///
    /// Zero for an empty spectrum.
    pub fn hermitian_error(&self) -> f64 {
        let n = self.values.len();
        let dc = self.dc().map_or(0.0, |c| c.im.abs());
        (1..n)
            .map(|k| (self.values[n - k] - self.values[k].conj()).norm())
            .fold(dc, f64::max)
    }
}

/// Apply `c = (2/N)·c_raw`, then `c[0] /= 2`
pub fn normalize(raw: SpectrumCoefficients) -> Result<SpectrumCoefficients> {
    if raw.normalized {
        return Err(SpectralError::InvalidInput(
            "coefficients are already normalized".to_string(),
        ));
    }
    if raw.values.is_empty() {
        return Err(SpectralError::InsufficientData { needed: 1, got: 0 });
    }

    let scale = 2.0 / raw.values.len() as f64;
    let mut values = raw.values;
    for c in values.iter_mut() {
        *c *= scale;
    }
    values[0] /= 2.0;

    Ok(SpectrumCoefficients {
        values,
        dt: raw.dt,
        normalized: true,
    })
}

/// Exact inverse of [`normalize`]: restore DC weight, multiply by N/2
pub fn denormalize(coeffs: &SpectrumCoefficients) -> Result<SpectrumCoefficients> {
    if !coeffs.normalized {
        return Err(SpectralError::InvalidInput(
            "coefficients are not normalized".to_string(),
        ));
    }
    if coeffs.values.is_empty() {
        return Err(SpectralError::InsufficientData { needed: 1, got: 0 });
    }

    let scale = coeffs.values.len() as f64 / 2.0;
    let mut values: Vec<Complex64> = coeffs.values.iter().map(|&c| c * scale).collect();
    values[0] *= 2.0;

    Ok(SpectrumCoefficients::from_raw(values, coeffs.dt))
}
