//! Test-signal synthesis
//!
//! Periodic and envelope waveforms used to exercise the spectral pipeline

use std::f64::consts::PI;

/// Square wave alternating between 1 and 0, even about `t = 0`
///
/// High on the first and last quarter of each period, low in the middle half.
/// Samples landing exactly on a transition take the midpoint value 0.5, so a
/// window covering whole periods is circularly even and its DFT is purely real.
///
/// # Arguments
/// * `t` - Time
/// * `period` - Period of the wave (must be positive)
pub fn square_wave(t: f64, period: f64) -> f64 {
    let phase = (t / period).rem_euclid(1.0);

    if phase == 0.25 || phase == 0.75 {
        0.5
    } else if !(0.25..0.75).contains(&phase) {
        1.0
    } else {
        0.0
    }
}

/// Gaussian probability density with standard deviation `sigma`
pub fn gaussian_pdf(x: f64, sigma: f64) -> f64 {
    1.0 / (sigma * (2.0 * PI).sqrt()) * (-0.5 * x * x / (sigma * sigma)).exp()
}

/// Gaussian envelope sampled at `times`
pub fn gaussian_envelope(times: &[f64], sigma: f64) -> Vec<f64> {
    times.iter().map(|&t| gaussian_pdf(t, sigma)).collect()
}

/// Uniform time axis on `[start, end)` with `count` points
///
/// Matches `linspace(start, end, count, endpoint=False)`.
pub fn time_axis(start: f64, end: f64, count: usize) -> Vec<f64> {
    let dt = (end - start) / count as f64;
    (0..count).map(|n| start + n as f64 * dt).collect()
}

/// Evaluate `f` at every time stamp
pub fn sample_fn<F: Fn(f64) -> f64>(times: &[f64], f: F) -> Vec<f64> {
    times.iter().map(|&t| f(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_wave_levels() {
        assert_eq!(square_wave(0.0, 1.0), 1.0);
        assert_eq!(square_wave(0.1, 1.0), 1.0);
        assert_eq!(square_wave(0.25, 1.0), 0.5);
        assert_eq!(square_wave(0.5, 1.0), 0.0);
        assert_eq!(square_wave(0.75, 1.0), 0.5);
        assert_eq!(square_wave(0.9, 1.0), 1.0);
        // Periodic in both directions
        assert_eq!(square_wave(-0.1, 1.0), 1.0);
        assert_eq!(square_wave(2.5, 1.0), 0.0);
    }

    #[test]
    fn test_gaussian_pdf_peak() {
        let sigma = 0.5;
        let peak = gaussian_pdf(0.0, sigma);
        assert!((peak - 1.0 / (sigma * (2.0 * PI).sqrt())).abs() < 1e-12);
        assert!(gaussian_pdf(1.0, sigma) < peak);
        assert!((gaussian_pdf(1.0, sigma) - gaussian_pdf(-1.0, sigma)).abs() < 1e-15);
    }

    #[test]
    fn test_time_axis_excludes_endpoint() {
        let ts = time_axis(-1.0, 1.0, 4);
        assert_eq!(ts, vec![-1.0, -0.5, 0.0, 0.5]);
    }
}
