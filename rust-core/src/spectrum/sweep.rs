//! Envelope-narrowing sweep
//!
//! Repeats the transform → power step on a Gaussian envelope whose width
//! shrinks and then grows again. Confining the envelope in time spreads its
//! spectrum. Each step is an independent call; the caller owns the loop.

use super::fft::FftEngine;
use crate::error::{Result, SpectralError};
use crate::signal::generators::gaussian_envelope;
use log::debug;
use ndarray::Array2;

/// Width at the first and last frame of [`sigma_schedule`]
pub const SWEEP_PEAK_WIDTH: f64 = 10.0;

/// One step of the sweep
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeFrame {
    /// Envelope width (standard deviation)
    pub sigma: f64,

    /// Envelope samples at the sweep's time stamps
    pub envelope: Vec<f64>,

    /// Scaled half-spectrum magnitudes, bins 0..=N/2
    pub power: Vec<f64>,
}

/// Narrow-then-widen width schedule for `frames` steps
///
/// Step n (1-based, n < frames) has width `10/n` for n <= frames/2 and
/// `10/(frames - n)` afterwards.
pub fn sigma_schedule(frames: usize) -> Vec<f64> {
    let half = frames / 2;
    (1..frames)
        .map(|n| {
            if n <= half {
                SWEEP_PEAK_WIDTH / n as f64
            } else {
                SWEEP_PEAK_WIDTH / (frames - n) as f64
            }
        })
        .collect()
}

/// Transform one envelope with a planned engine
///
/// Power is `|X[k]/2| / (N/2 + 1)` over the half spectrum.
pub fn envelope_step_with(engine: &FftEngine, times: &[f64], sigma: f64) -> Result<EnvelopeFrame> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(SpectralError::InvalidInput(format!(
            "envelope width must be positive and finite, got {sigma}"
        )));
    }

    let envelope = gaussian_envelope(times, sigma);
    let half = engine.half_spectrum(&envelope)?;
    let bins = half.len() as f64;
    let power = half.iter().map(|c| (*c / 2.0).norm() / bins).collect();

    Ok(EnvelopeFrame {
        sigma,
        envelope,
        power,
    })
}

/// Transform one envelope of width `sigma` sampled at `times`
pub fn envelope_step(times: &[f64], sigma: f64) -> Result<EnvelopeFrame> {
    let engine = FftEngine::new(times.len())?;
    envelope_step_with(&engine, times, sigma)
}

/// Iterator over a width schedule, one [`EnvelopeFrame`] per width
pub struct EnvelopeSweep {
    times: Vec<f64>,
    engine: FftEngine,
    widths: std::vec::IntoIter<f64>,
}

impl EnvelopeSweep {
    /// Sweep over the default schedule of `frames` steps
    pub fn new(times: Vec<f64>, frames: usize) -> Result<Self> {
        Self::with_widths(times, sigma_schedule(frames))
    }

    /// Sweep over explicit widths
    pub fn with_widths(times: Vec<f64>, widths: Vec<f64>) -> Result<Self> {
        let engine = FftEngine::new(times.len())?;
        debug!("envelope sweep: {} widths over {} samples", widths.len(), times.len());

        Ok(Self {
            times,
            engine,
            widths: widths.into_iter(),
        })
    }
}

impl Iterator for EnvelopeSweep {
    type Item = Result<EnvelopeFrame>;

    /// Invalid widths yield `Err(InvalidInput)` in their slot
    fn next(&mut self) -> Option<Self::Item> {
        let sigma = self.widths.next()?;
        Some(envelope_step_with(&self.engine, &self.times, sigma))
    }
}

/// Stack frame spectra into a (frames × bins) matrix
pub fn power_matrix(frames: &[EnvelopeFrame]) -> Result<Array2<f64>> {
    let bins = frames.first().map_or(0, |f| f.power.len());
    if let Some(f) = frames.iter().find(|f| f.power.len() != bins) {
        return Err(SpectralError::InvalidInput(format!(
            "frame spectra differ in length: {} vs {}",
            f.power.len(),
            bins
        )));
    }

    let flat: Vec<f64> = frames.iter().flat_map(|f| f.power.iter().copied()).collect();
    Array2::from_shape_vec((frames.len(), bins), flat)
        .map_err(|e| SpectralError::InvalidInput(e.to_string()))
}
