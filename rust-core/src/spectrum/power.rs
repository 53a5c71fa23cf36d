//! Power spectrum over the non-negative frequency bins

use super::coefficients::SpectrumCoefficients;
use super::fft::FrequencyUnit;
use crate::error::{Result, SpectralError};

/// Per-bin quantity reported by [`power_spectrum`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerScale {
    /// |c[k]|
    Magnitude,

    /// One-sided energy; bins sum to the signal's mean square
    #[default]
    Energy,
}

/// Power values for bins 0..=N/2
#[derive(Debug, Clone, PartialEq)]
pub struct PowerSpectrum {
    pub bins: Vec<f64>,
    pub frequencies: Vec<f64>,
    pub scale: PowerScale,
}

impl PowerSpectrum {
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Sum over all bins
    pub fn total(&self) -> f64 {
        self.bins.iter().sum()
    }

    /// Power spectrum in dB relative to `reference`
    pub fn to_db(&self, reference: f64) -> Vec<f64> {
        let factor = match self.scale {
            PowerScale::Magnitude => 20.0,
            PowerScale::Energy => 10.0,
        };
        self.bins
            .iter()
            .map(|&p| factor * (p.max(1e-20) / reference).log10())
            .collect()
    }
}

/// One-sided weight of bin `k` in an N-point spectrum
///
/// DC and the Nyquist bin of even N appear once in the full spectrum; every
/// other non-negative bin has a mirrored partner at N-k.
fn energy_weight(k: usize, n: usize) -> f64 {
    if k == 0 {
        1.0
    } else if n % 2 == 0 && k == n / 2 {
        0.25
    } else {
        0.5
    }
}

/// Compute the power spectrum of normalized coefficients
///
/// Magnitude scale reports `|c[k]|`. Energy scale reports `|c0|²` at DC,
/// `|c[k]|²/2` for interior bins and `|c[N/2]|²/4` at Nyquist.
pub fn power_spectrum(
    coeffs: &SpectrumCoefficients,
    scale: PowerScale,
    unit: FrequencyUnit,
) -> Result<PowerSpectrum> {
    if !coeffs.is_normalized() {
        return Err(SpectralError::InvalidInput(
            "power spectrum requires normalized coefficients".to_string(),
        ));
    }

    let n = coeffs.len();
    let half = n / 2 + 1;
    let values = &coeffs.values()[..half.min(n)];

    let bins = values
        .iter()
        .enumerate()
        .map(|(k, c)| match scale {
            PowerScale::Magnitude => c.norm(),
            PowerScale::Energy => energy_weight(k, n) * c.norm_sqr(),
        })
        .collect();

    let frequencies = (0..values.len()).map(|k| coeffs.frequency(k, unit)).collect();

    Ok(PowerSpectrum {
        bins,
        frequencies,
        scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_energy_weights() {
        assert_eq!(energy_weight(0, 8), 1.0);
        assert_eq!(energy_weight(1, 8), 0.5);
        assert_eq!(energy_weight(4, 8), 0.25);
        assert_eq!(energy_weight(3, 7), 0.5);
    }

    #[test]
    fn test_magnitude_scale() {
        let coeffs = SpectrumCoefficients::from_normalized(
            vec![
                Complex64::new(0.5, 0.0),
                Complex64::new(0.0, -1.0),
                Complex64::new(0.3, 0.4),
                Complex64::new(0.0, 1.0),
            ],
            0.25,
        );

        let power = power_spectrum(&coeffs, PowerScale::Magnitude, FrequencyUnit::Hertz).unwrap();
        assert_eq!(power.len(), 3);
        assert!((power.bins[0] - 0.5).abs() < 1e-12);
        assert!((power.bins[1] - 1.0).abs() < 1e-12);
        assert!((power.bins[2] - 0.5).abs() < 1e-12);
        assert_eq!(power.frequencies, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_energy_scale() {
        let coeffs = SpectrumCoefficients::from_normalized(
            vec![
                Complex64::new(0.5, 0.0),
                Complex64::new(0.0, -1.0),
                Complex64::new(0.4, 0.0),
                Complex64::new(0.0, 1.0),
            ],
            0.25,
        );

        let power = power_spectrum(&coeffs, PowerScale::Energy, FrequencyUnit::Hertz).unwrap();
        assert!((power.bins[0] - 0.25).abs() < 1e-12);
        assert!((power.bins[1] - 0.5).abs() < 1e-12);
        assert!((power.bins[2] - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_to_db() {
        let power = PowerSpectrum {
            bins: vec![1.0, 0.1, 0.0],
            frequencies: vec![0.0, 1.0, 2.0],
            scale: PowerScale::Energy,
        };
        let db = power.to_db(1.0);
        assert!(db[0].abs() < 1e-12);
        assert!((db[1] + 10.0).abs() < 1e-9);
        assert!((db[2] + 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_requires_normalized() {
        let coeffs = SpectrumCoefficients::from_raw(vec![Complex64::default(); 4], 1.0);
        assert!(power_spectrum(&coeffs, PowerScale::Energy, FrequencyUnit::Hertz).is_err());
    }
}
