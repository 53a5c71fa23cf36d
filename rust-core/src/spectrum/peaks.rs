//! Dominant-frequency extraction for waveform identification

use super::coefficients::SpectrumCoefficients;
use super::fft::FrequencyUnit;
use crate::error::{Result, SpectralError};
use log::trace;

/// Minimum samples for a non-DC secondary peak
pub const MIN_PEAK_SAMPLES: usize = 3;

/// One spectral component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyPeak {
    /// Bin index k
    pub bin: usize,

    /// Frequency of the bin in the requested unit
    pub frequency: f64,

    /// Magnitude |c[k]|
    pub magnitude: f64,
}

/// The two strongest components of a spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakPair {
    /// Global maximum, DC included
    pub primary: FrequencyPeak,

    /// Maximum over every bin except DC
    pub secondary: FrequencyPeak,
}

/// Index of the largest value, first index on ties
fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some(b) if values[b] >= v => {}
            _ => best = Some(i),
        }
    }
    best
}

fn peak_at(coeffs: &SpectrumCoefficients, magnitudes: &[f64], bin: usize, unit: FrequencyUnit) -> FrequencyPeak {
    FrequencyPeak {
        bin,
        frequency: coeffs.frequency(bin, unit),
        magnitude: magnitudes[bin],
    }
}

/// Peaks are read from the same normalized set the power spectrum uses
fn check_peak_input(coeffs: &SpectrumCoefficients) -> Result<()> {
    if !coeffs.is_normalized() {
        return Err(SpectralError::InvalidInput(
            "peak extraction requires normalized coefficients".to_string(),
        ));
    }
    if coeffs.len() < MIN_PEAK_SAMPLES {
        return Err(SpectralError::InsufficientData {
            needed: MIN_PEAK_SAMPLES,
            got: coeffs.len(),
        });
    }
    Ok(())
}

/// Locate the primary and secondary peaks over the first ⌈N/2⌉ bins
///
/// The secondary search skips bin 0 only. A DC offset leaking into bin 1 is
/// not masked and can be reported as the secondary component.
///
/// # Errors
/// `InvalidInput` for un-normalized coefficients, `InsufficientData` when N < 3.
pub fn extract_peaks(coeffs: &SpectrumCoefficients, unit: FrequencyUnit) -> Result<PeakPair> {
    check_peak_input(coeffs)?;

    let magnitudes = coeffs.positive_magnitudes();

    // Non-empty: ⌈N/2⌉ >= 2 for N >= 3
    let primary_bin = argmax(&magnitudes).unwrap_or(0);
    let secondary_bin = argmax(&magnitudes[1..]).map_or(1, |i| i + 1);

    let pair = PeakPair {
        primary: peak_at(coeffs, &magnitudes, primary_bin, unit),
        secondary: peak_at(coeffs, &magnitudes, secondary_bin, unit),
    };

    trace!(
        "peaks: primary bin {} ({:.4}), secondary bin {} ({:.4})",
        primary_bin,
        pair.primary.magnitude,
        secondary_bin,
        pair.secondary.magnitude
    );

    Ok(pair)
}

/// The `count` strongest non-DC bins in descending magnitude
///
/// Ties keep the lower bin first. Returns fewer entries when the half
/// spectrum has fewer non-DC bins.
pub fn top_peaks(coeffs: &SpectrumCoefficients, count: usize, unit: FrequencyUnit) -> Result<Vec<FrequencyPeak>> {
    check_peak_input(coeffs)?;

    let magnitudes = coeffs.positive_magnitudes();
    let mut bins: Vec<usize> = (1..magnitudes.len()).collect();
    bins.sort_by(|&a, &b| magnitudes[b].total_cmp(&magnitudes[a]).then(a.cmp(&b)));
    bins.truncate(count);

    Ok(bins
        .into_iter()
        .map(|bin| peak_at(coeffs, &magnitudes, bin, unit))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn coeffs_from_magnitudes(mags: &[f64], dt: f64) -> SpectrumCoefficients {
        // Build a Hermitian spectrum with the given non-negative-bin magnitudes
        let n = 2 * mags.len();
        let mut values = vec![Complex64::default(); n];
        for (k, &m) in mags.iter().enumerate() {
            values[k] = Complex64::new(m, 0.0);
            if k > 0 {
                values[n - k] = Complex64::new(m, 0.0);
            }
        }
        SpectrumCoefficients::from_normalized(values, dt)
    }

    #[test]
    fn test_secondary_never_dc() {
        let coeffs = coeffs_from_magnitudes(&[5.0, 0.1, 0.3, 2.0, 0.2], 0.1);
        let peaks = extract_peaks(&coeffs, FrequencyUnit::Hertz).unwrap();

        assert_eq!(peaks.primary.bin, 0);
        assert_eq!(peaks.secondary.bin, 3);
        assert!((peaks.secondary.frequency - 3.0).abs() < 1e-12);
        assert!((peaks.secondary.magnitude - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_primary_non_dc() {
        let coeffs = coeffs_from_magnitudes(&[0.5, 0.1, 4.0, 1.0], 0.125);
        let peaks = extract_peaks(&coeffs, FrequencyUnit::Hertz).unwrap();

        // Both searches land on the same bin when DC is not the maximum
        assert_eq!(peaks.primary.bin, 2);
        assert_eq!(peaks.secondary.bin, 2);
    }

    #[test]
    fn test_leakage_into_bin_one_not_masked() {
        let coeffs = coeffs_from_magnitudes(&[3.0, 0.9, 0.2, 0.8], 1.0);
        let peaks = extract_peaks(&coeffs, FrequencyUnit::Hertz).unwrap();
        assert_eq!(peaks.secondary.bin, 1);
    }

    #[test]
    fn test_tie_prefers_lower_bin() {
        let coeffs = coeffs_from_magnitudes(&[1.0, 0.0, 1.0, 1.0], 1.0);
        let peaks = extract_peaks(&coeffs, FrequencyUnit::Hertz).unwrap();
        assert_eq!(peaks.primary.bin, 0);
        assert_eq!(peaks.secondary.bin, 2);
    }

    #[test]
    fn test_insufficient_data() {
        let coeffs = SpectrumCoefficients::from_normalized(vec![Complex64::new(1.0, 0.0); 2], 1.0);
        let err = extract_peaks(&coeffs, FrequencyUnit::Hertz).unwrap_err();
        assert_eq!(err, SpectralError::InsufficientData { needed: 3, got: 2 });
    }

    #[test]
    fn test_requires_normalized() {
        let raw = SpectrumCoefficients::from_raw(
            vec![
                Complex64::new(8.0, 0.0),
                Complex64::new(0.0, -4.0),
                Complex64::new(0.0, 0.0),
                Complex64::new(0.0, 4.0),
            ],
            0.25,
        );

        assert!(matches!(
            extract_peaks(&raw, FrequencyUnit::Hertz),
            Err(SpectralError::InvalidInput(_))
        ));
        assert!(matches!(
            top_peaks(&raw, 1, FrequencyUnit::Hertz),
            Err(SpectralError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_top_peaks_order() {
        let coeffs = coeffs_from_magnitudes(&[9.0, 0.5, 3.0, 0.1, 2.0, 3.0], 1.0);
        let peaks = top_peaks(&coeffs, 3, FrequencyUnit::Hertz).unwrap();
        let bins: Vec<usize> = peaks.iter().map(|p| p.bin).collect();
        assert_eq!(bins, vec![2, 5, 4]);
    }
}
