//! Forward and inverse DFT engine
//!
//! Fast path uses rustfft plans (realfft for half spectra); a direct O(N²) sum
//! covers sizes without an efficient factorization.
//!
//! Convention: `X[k] = Σ x[n]·exp(-2πi·k·n/N)`, inverse scaled by `1/N`.

use crate::error::{Result, SpectralError};
use log::debug;
use num_complex::Complex64;
use realfft::{RealFftPlanner, RealToComplex};
use rustfft::{Fft, FftPlanner};
use std::f64::consts::PI;
use std::sync::Arc;

/// Largest size routed to the direct sum when the size is not 7-smooth
pub const DIRECT_DFT_MAX_LEN: usize = 512;

/// How the engine evaluates the transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformStrategy {
    /// Fast transform for 7-smooth sizes, direct sum for other sizes up to
    /// [`DIRECT_DFT_MAX_LEN`], fast transform beyond that
    #[default]
    Auto,

    /// Always use the planned fast transform
    Fast,

    /// Always use the O(N²) direct sum
    Direct,
}

/// Unit of the frequency axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyUnit {
    /// Cycles per unit time: `k/(N·dt)`
    #[default]
    Hertz,

    /// Radians per unit time: `2π·k/(N·dt)`
    Angular,
}

impl FrequencyUnit {
    /// Multiplier applied to a frequency in cycles per unit time
    pub fn scale(&self) -> f64 {
        match self {
            FrequencyUnit::Hertz => 1.0,
            FrequencyUnit::Angular => 2.0 * PI,
        }
    }
}

/// Signed frequency of bin `k` for an N-point transform with spacing `dt`
///
/// Bins `k <= N/2` map to `k/(N·dt)`, bins above wrap to `(k-N)/(N·dt)`.
pub fn bin_frequency(k: usize, n: usize, dt: f64, unit: FrequencyUnit) -> f64 {
    let signed = if k <= n / 2 {
        k as f64
    } else {
        k as f64 - n as f64
    };
    unit.scale() * signed / (n as f64 * dt)
}

/// Full wraparound frequency axis, one entry per bin
pub fn frequency_axis(n: usize, dt: f64, unit: FrequencyUnit) -> Vec<f64> {
    (0..n).map(|k| bin_frequency(k, n, dt, unit)).collect()
}

/// True when every prime factor of `n` is 2, 3, 5 or 7
pub fn is_smooth(mut n: usize) -> bool {
    if n == 0 {
        return false;
    }
    for p in [2, 3, 5, 7] {
        while n % p == 0 {
            n /= p;
        }
    }
    n == 1
}

/// Direct DFT of a complex sequence
///
/// `sign` is -1.0 for the forward kernel and +1.0 for the (unscaled) inverse.
pub fn direct_dft(input: &[Complex64], sign: f64) -> Vec<Complex64> {
    let n = input.len();
    // Twiddles indexed by (k·m) mod N keep the phase argument small
    let twiddles: Vec<Complex64> = (0..n)
        .map(|j| Complex64::from_polar(1.0, sign * 2.0 * PI * j as f64 / n as f64))
        .collect();

    (0..n)
        .map(|k| {
            input
                .iter()
                .enumerate()
                .map(|(m, &x)| x * twiddles[(k * m) % n])
                .sum::<Complex64>()
        })
        .collect()
}

/// Reject any non-finite output value
pub(crate) fn ensure_finite(values: &[Complex64], stage: &str) -> Result<()> {
    match values.iter().position(|c| !c.re.is_finite() || !c.im.is_finite()) {
        Some(k) => Err(SpectralError::NumericOverflow(format!(
            "{stage} produced a non-finite value at bin {k}"
        ))),
        None => Ok(()),
    }
}

/// rustfft plans, present only on the fast path
struct FastPlans {
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

/// Planned transform pair for one size
pub struct FftEngine {
    /// Transform size N
    size: usize,

    /// `None` evaluates the direct sum
    fast: Option<FastPlans>,

    /// Real-input transform for half spectra
    r2c: Arc<dyn RealToComplex<f64>>,
}

impl FftEngine {
    /// Create engine with the automatic strategy
    pub fn new(size: usize) -> Result<Self> {
        Self::with_strategy(size, TransformStrategy::Auto)
    }

    /// Create engine for `size` points
    ///
    /// # Arguments
    /// * `size` - Transform length N (at least 1)
    /// * `strategy` - Fast, direct, or automatic selection
    pub fn with_strategy(size: usize, strategy: TransformStrategy) -> Result<Self> {
        if size == 0 {
            return Err(SpectralError::InsufficientData { needed: 1, got: 0 });
        }

        let use_fast = match strategy {
            TransformStrategy::Fast => true,
            TransformStrategy::Direct => false,
            TransformStrategy::Auto => is_smooth(size) || size > DIRECT_DFT_MAX_LEN,
        };

        let fast = use_fast.then(|| {
            let mut planner = FftPlanner::<f64>::new();
            FastPlans {
                forward: planner.plan_fft_forward(size),
                inverse: planner.plan_fft_inverse(size),
            }
        });

        let mut real_planner = RealFftPlanner::<f64>::new();
        let r2c = real_planner.plan_fft_forward(size);

        debug!(
            "planned {}-point transform ({})",
            size,
            if use_fast { "fast" } else { "direct" }
        );

        Ok(Self {
            size,
            fast,
            r2c,
        })
    }

    /// Transform size N
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the fast path is in use
    pub fn is_fast(&self) -> bool {
        self.fast.is_some()
    }

    /// Number of non-negative frequency bins in a half spectrum (N/2 + 1)
    pub fn num_bins(&self) -> usize {
        self.size / 2 + 1
    }

    fn check_len(&self, len: usize) -> Result<()> {
        if len != self.size {
            return Err(SpectralError::InvalidInput(format!(
                "expected {} points, got {}",
                self.size, len
            )));
        }
        Ok(())
    }

    /// Forward transform of a real sequence, all N bins
    pub fn forward_real(&self, signal: &[f64]) -> Result<Vec<Complex64>> {
        let buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        self.forward_complex(&buffer)
    }

    /// Forward transform of a complex sequence
    pub fn forward_complex(&self, input: &[Complex64]) -> Result<Vec<Complex64>> {
        self.check_len(input.len())?;

        let output = match &self.fast {
            Some(plans) => {
                let mut buffer = input.to_vec();
                plans.forward.process(&mut buffer);
                buffer
            }
            None => direct_dft(input, -1.0),
        };

        ensure_finite(&output, "forward transform")?;
        Ok(output)
    }

    /// Inverse transform, scaled by 1/N so that it undoes [`Self::forward_complex`]
    pub fn inverse(&self, spectrum: &[Complex64]) -> Result<Vec<Complex64>> {
        self.check_len(spectrum.len())?;

        let mut output = match &self.fast {
            Some(plans) => {
                let mut buffer = spectrum.to_vec();
                plans.inverse.process(&mut buffer);
                buffer
            }
            None => direct_dft(spectrum, 1.0),
        };

        let scale = 1.0 / self.size as f64;
        for x in output.iter_mut() {
            *x *= scale;
        }

        ensure_finite(&output, "inverse transform")?;
        Ok(output)
    }

    /// Forward transform of a real sequence, bins 0..=N/2 only
    pub fn half_spectrum(&self, signal: &[f64]) -> Result<Vec<Complex64>> {
        self.check_len(signal.len())?;

        let mut input = signal.to_vec();
        let mut output = self.r2c.make_output_vec();
        self.r2c
            .process(&mut input, &mut output)
            .map_err(|e| SpectralError::InvalidInput(e.to_string()))?;

        ensure_finite(&output, "real transform")?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_abs_diff(a: &[Complex64], b: &[Complex64]) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).norm())
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_dc_signal() {
        let engine = FftEngine::new(100).unwrap();
        let spectrum = engine.forward_real(&vec![1.0; 100]).unwrap();

        assert!((spectrum[0].re - 100.0).abs() < 1e-9);
        assert!(spectrum[1..].iter().all(|c| c.norm() < 1e-9));
    }

    #[test]
    fn test_sine_wave_bin() {
        let n = 64;
        let engine = FftEngine::new(n).unwrap();
        let signal: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 4.0 * i as f64 / n as f64).sin())
            .collect();

        let spectrum = engine.forward_real(&signal).unwrap();

        // sin → -i·N/2 at +k, +i·N/2 at -k
        assert!((spectrum[4] - Complex64::new(0.0, -32.0)).norm() < 1e-9);
        assert!((spectrum[60] - Complex64::new(0.0, 32.0)).norm() < 1e-9);
    }

    #[test]
    fn test_fast_matches_direct() {
        for &n in &[2usize, 7, 30, 97, 128, 257] {
            let signal: Vec<Complex64> = (0..n)
                .map(|i| Complex64::new((i as f64 * 0.37).sin() + 0.5, (i as f64 * 0.11).cos()))
                .collect();

            let fast = FftEngine::with_strategy(n, TransformStrategy::Fast).unwrap();
            let direct = FftEngine::with_strategy(n, TransformStrategy::Direct).unwrap();

            let a = fast.forward_complex(&signal).unwrap();
            let b = direct.forward_complex(&signal).unwrap();
            let scale = a.iter().map(|c| c.norm()).fold(0.0, f64::max);

            assert!(max_abs_diff(&a, &b) <= 1e-9 * scale, "size {n}");
        }
    }

    #[test]
    fn test_inverse_undoes_forward() {
        let n = 30;
        let engine = FftEngine::new(n).unwrap();
        let signal: Vec<f64> = (0..n).map(|i| (i as f64).sqrt()).collect();

        let spectrum = engine.forward_real(&signal).unwrap();
        let restored = engine.inverse(&spectrum).unwrap();

        for (x, y) in signal.iter().zip(restored.iter()) {
            assert!((x - y.re).abs() < 1e-12);
            assert!(y.im.abs() < 1e-12);
        }
    }

    #[test]
    fn test_half_spectrum_matches_full() {
        let n = 50;
        let engine = FftEngine::new(n).unwrap();
        let signal: Vec<f64> = (0..n).map(|i| (i as f64 * 0.3).cos() * 2.0).collect();

        let full = engine.forward_real(&signal).unwrap();
        let half = engine.half_spectrum(&signal).unwrap();

        assert_eq!(half.len(), engine.num_bins());
        assert!(max_abs_diff(&full[..half.len()], &half) < 1e-9);
    }

    #[test]
    fn test_auto_strategy_selection() {
        assert!(FftEngine::new(1024).unwrap().is_fast());
        assert!(FftEngine::new(100).unwrap().is_fast());
        assert!(!FftEngine::new(97).unwrap().is_fast());
        assert!(FftEngine::new(1031).unwrap().is_fast());
    }

    #[test]
    fn test_direct_engine_skips_complex_plans() {
        let n = 12;
        let engine = FftEngine::with_strategy(n, TransformStrategy::Direct).unwrap();
        assert!(!engine.is_fast());
        assert!(engine.fast.is_none());

        let signal: Vec<f64> = (0..n).map(|i| (i as f64 * 0.9).sin() - 0.2).collect();
        let spectrum = engine.forward_real(&signal).unwrap();
        let restored = engine.inverse(&spectrum).unwrap();
        for (x, y) in signal.iter().zip(restored.iter()) {
            assert!((x - y.re).abs() < 1e-12);
        }

        // Half spectra still come from the real-input plan
        let half = engine.half_spectrum(&signal).unwrap();
        assert_eq!(half.len(), engine.num_bins());
        assert!(max_abs_diff(&half, &spectrum[..engine.num_bins()]) < 1e-9);

        let fast = FftEngine::with_strategy(n, TransformStrategy::Fast).unwrap();
        assert!(fast.fast.is_some());
    }

    #[test]
    fn test_length_mismatch() {
        let engine = FftEngine::new(8).unwrap();
        assert!(matches!(
            engine.forward_real(&[0.0; 4]),
            Err(SpectralError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_overflow_reported() {
        let engine = FftEngine::new(4).unwrap();
        let err = engine.forward_real(&[f64::MAX; 4]).unwrap_err();
        assert!(matches!(err, SpectralError::NumericOverflow(_)));
    }

    #[test]
    fn test_frequency_axis_wraparound() {
        let axis = frequency_axis(8, 0.125, FrequencyUnit::Hertz);
        assert_eq!(axis, vec![0.0, 1.0, 2.0, 3.0, 4.0, -3.0, -2.0, -1.0]);

        let odd = frequency_axis(5, 0.2, FrequencyUnit::Hertz);
        assert_eq!(odd, vec![0.0, 1.0, 2.0, -2.0, -1.0]);

        let angular = bin_frequency(1, 8, 0.125, FrequencyUnit::Angular);
        assert!((angular - 2.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_is_smooth() {
        assert!(is_smooth(1));
        assert!(is_smooth(100));
        assert!(is_smooth(1024));
        assert!(!is_smooth(97));
        assert!(!is_smooth(0));
    }
}
