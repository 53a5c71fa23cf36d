//! Time-domain reconstruction from normalized coefficients
//!
//! Undoes the normalizer (DC back to full weight, scale by N/2) and applies
//! the inverse transform. With the full spectrum the input is recovered; with
//! a subset of bins the result is a sinusoidal approximation.

use super::coefficients::{denormalize, SpectrumCoefficients};
use super::fft::FftEngine;
use super::peaks::FrequencyPeak;
use crate::error::{Result, SpectralError};
use log::debug;
use num_complex::Complex64;

fn check_engine(engine: &FftEngine, coeffs: &SpectrumCoefficients) -> Result<()> {
    if engine.size() != coeffs.len() {
        return Err(SpectralError::InvalidInput(format!(
            "engine planned for {} points, spectrum has {}",
            engine.size(),
            coeffs.len()
        )));
    }
    Ok(())
}

/// Complex reconstruction using an existing engine
pub fn reconstruct_complex_with(engine: &FftEngine, coeffs: &SpectrumCoefficients) -> Result<Vec<Complex64>> {
    check_engine(engine, coeffs)?;
    let raw = denormalize(coeffs)?;
    engine.inverse(raw.values())
}

/// Real reconstruction using an existing engine
pub fn reconstruct_with(engine: &FftEngine, coeffs: &SpectrumCoefficients) -> Result<Vec<f64>> {
    Ok(reconstruct_complex_with(engine, coeffs)?
        .into_iter()
        .map(|c| c.re)
        .collect())
}

/// Full complex reconstruction `y[n] = IDFT((N/2)·c, DC restored)`
pub fn reconstruct_complex(coeffs: &SpectrumCoefficients) -> Result<Vec<Complex64>> {
    let engine = FftEngine::new(coeffs.len())?;
    reconstruct_complex_with(&engine, coeffs)
}

/// Full reconstruction, real part only
pub fn reconstruct(coeffs: &SpectrumCoefficients) -> Result<Vec<f64>> {
    let engine = FftEngine::new(coeffs.len())?;
    reconstruct_with(&engine, coeffs)
}

/// Keep only `bins` (non-negative frequency indices) and their mirrors
///
/// Every other coefficient is zeroed. Bin 0 keeps the DC offset; a bin k > 0
/// also keeps N-k so the result stays real for real input.
pub fn mask_bins(coeffs: &SpectrumCoefficients, bins: &[usize]) -> Result<SpectrumCoefficients> {
    let n = coeffs.len();
    let mut values = vec![Complex64::default(); n];

    for &k in bins {
        if k > n / 2 {
            return Err(SpectralError::InvalidInput(format!(
                "bin {k} is not a non-negative frequency bin of a {n}-point spectrum"
            )));
        }
        values[k] = coeffs.values()[k];
        if k > 0 {
            values[n - k] = coeffs.values()[n - k];
        }
    }

    let masked = if coeffs.is_normalized() {
        SpectrumCoefficients::from_normalized(values, coeffs.dt())
    } else {
        SpectrumCoefficients::from_raw(values, coeffs.dt())
    };
    Ok(masked)
}

/// Reconstruct from a subset of bins
pub fn reconstruct_bins(coeffs: &SpectrumCoefficients, bins: &[usize]) -> Result<Vec<f64>> {
    debug!("reconstructing from {} of {} bins", bins.len(), coeffs.len());
    reconstruct(&mask_bins(coeffs, bins)?)
}

/// Reconstruct from identified peaks
pub fn reconstruct_peaks(coeffs: &SpectrumCoefficients, peaks: &[FrequencyPeak]) -> Result<Vec<f64>> {
    let mut bins: Vec<usize> = peaks.iter().map(|p| p.bin).collect();
    bins.sort_unstable();
    bins.dedup();
    reconstruct_bins(coeffs, &bins)
}

/// Fitted model `2·sin(α·t)·cos(β·t)` for angular frequencies α and β
///
/// Equal to `sin((α+β)t) + sin((α-β)t)`, so its spectrum shows the sum and
/// difference frequencies.
pub fn two_tone_product(times: &[f64], alpha: f64, beta: f64) -> Vec<f64> {
    times
        .iter()
        .map(|&t| 2.0 * (alpha * t).sin() * (beta * t).cos())
        .collect()
}
