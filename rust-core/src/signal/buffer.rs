//! Uniformly sampled time series
//!
//! Validated once on construction and immutable afterwards

use crate::error::{Result, SpectralError};

/// Default relative tolerance on sample spacing
pub const DEFAULT_SPACING_TOLERANCE: f64 = 1e-6;

/// Minimum number of samples for a transform
pub const MIN_SAMPLES: usize = 2;

/// Uniformly spaced (time, amplitude) samples
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    times: Vec<f64>,
    amplitudes: Vec<f64>,
    dt: f64,
}

impl SampleBuffer {
    /// Create buffer with the default spacing tolerance
    ///
    /// # Arguments
    /// * `times` - Strictly increasing, uniformly spaced time stamps
    /// * `amplitudes` - Sample values, same length as `times`
    pub fn new(times: Vec<f64>, amplitudes: Vec<f64>) -> Result<Self> {
        Self::with_tolerance(times, amplitudes, DEFAULT_SPACING_TOLERANCE)
    }

    /// Create buffer with an explicit relative spacing tolerance
    ///
    /// Every step `t[i+1] - t[i]` must lie within `tolerance * dt` of the
    /// mean spacing `dt = (t[N-1] - t[0]) / (N - 1)`.
    pub fn with_tolerance(times: Vec<f64>, amplitudes: Vec<f64>, tolerance: f64) -> Result<Self> {
        if times.len() != amplitudes.len() {
            return Err(SpectralError::InvalidInput(format!(
                "length mismatch: {} time stamps, {} amplitudes",
                times.len(),
                amplitudes.len()
            )));
        }

        let n = times.len();
        if n < MIN_SAMPLES {
            return Err(SpectralError::InvalidInput(format!(
                "need at least {MIN_SAMPLES} samples to derive a spacing, got {n}"
            )));
        }

        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(SpectralError::InvalidInput(format!(
                "spacing tolerance must be finite and non-negative, got {tolerance}"
            )));
        }

        if let Some(i) = times.iter().position(|t| !t.is_finite()) {
            return Err(SpectralError::InvalidInput(format!(
                "non-finite time stamp at index {i}"
            )));
        }
        if let Some(i) = amplitudes.iter().position(|y| !y.is_finite()) {
            return Err(SpectralError::InvalidInput(format!(
                "non-finite amplitude at index {i}"
            )));
        }

        let dt = (times[n - 1] - times[0]) / (n - 1) as f64;
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(SpectralError::InvalidInput(
                "time stamps must be strictly increasing".to_string(),
            ));
        }

        let allowed = tolerance * dt;
        for (i, pair) in times.windows(2).enumerate() {
            let step = pair[1] - pair[0];
            if step <= 0.0 {
                return Err(SpectralError::InvalidInput(format!(
                    "time stamps must be strictly increasing (index {})",
                    i + 1
                )));
            }
            if (step - dt).abs() > allowed {
                return Err(SpectralError::InvalidInput(format!(
                    "non-uniform spacing at index {}: step {step}, expected {dt}",
                    i + 1
                )));
            }
        }

        Ok(Self {
            times,
            amplitudes,
            dt,
        })
    }

    /// Build from interleaved (time, amplitude) pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        let (times, amplitudes) = pairs.iter().copied().unzip();
        Self::new(times, amplitudes)
    }

    /// Build from amplitudes sampled every `dt` starting at `start`
    pub fn from_uniform(start: f64, dt: f64, amplitudes: Vec<f64>) -> Result<Self> {
        let times = (0..amplitudes.len())
            .map(|n| start + n as f64 * dt)
            .collect();
        Self::new(times, amplitudes)
    }

    /// Number of samples N
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Always false: construction rejects fewer than two samples
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Sample spacing
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Observation window N·dt (one full period for periodic input)
    pub fn duration(&self) -> f64 {
        self.len() as f64 * self.dt
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitudes
    }

    /// Arithmetic mean of the amplitudes
    pub fn mean(&self) -> f64 {
        self.amplitudes.iter().sum::<f64>() / self.len() as f64
    }

    /// Mean of the squared amplitudes
    pub fn mean_square(&self) -> f64 {
        self.amplitudes.iter().map(|y| y * y).sum::<f64>() / self.len() as f64
    }
}
