//! High-level spectrum analyzer
//!
//! Runs transform → normalize → {peaks, power} on a sample buffer and offers
//! reconstruction from the resulting coefficients

use super::coefficients::{normalize, SpectrumCoefficients};
use super::fft::{FftEngine, FrequencyUnit, TransformStrategy};
use super::peaks::{extract_peaks, PeakPair, MIN_PEAK_SAMPLES};
use super::power::{power_spectrum, PowerScale, PowerSpectrum};
use super::reconstruct::{mask_bins, reconstruct_with};
use crate::error::Result;
use crate::signal::buffer::DEFAULT_SPACING_TOLERANCE;
use crate::signal::SampleBuffer;
use log::debug;

/// Spectrum analyzer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Unit of reported peak and power-bin frequencies
    pub frequency_unit: FrequencyUnit,

    /// Quantity reported per power-spectrum bin
    pub power_scale: PowerScale,

    /// Fast, direct, or automatic transform selection
    pub strategy: TransformStrategy,

    /// Relative spacing tolerance for buffers built via [`SpectrumAnalyzer::buffer`]
    pub spacing_tolerance: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            frequency_unit: FrequencyUnit::Hertz,
            power_scale: PowerScale::Energy,
            strategy: TransformStrategy::Auto,
            spacing_tolerance: DEFAULT_SPACING_TOLERANCE,
        }
    }
}

/// Complete result of one analysis pass
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralAnalysis {
    /// Normalized coefficients, all N bins
    pub coefficients: SpectrumCoefficients,

    /// Dominant components; `None` when N < 3
    pub peaks: Option<PeakPair>,

    pub power: PowerSpectrum,
}

impl SpectralAnalysis {
    /// Mean level of the signal (normalized DC coefficient)
    pub fn dc_level(&self) -> f64 {
        self.coefficients.dc().map_or(0.0, |c| c.re)
    }
}

/// Spectrum analyzer with a cached transform plan
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    engine: Option<FftEngine>,
}

impl SpectrumAnalyzer {
    /// Create new spectrum analyzer
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            engine: None,
        }
    }

    /// Engine for `size` points, replanned when the size changes
    fn engine_for(&mut self, size: usize) -> Result<&FftEngine> {
        let strategy = self.config.strategy;
        let engine = match self.engine.take() {
            Some(engine) if engine.size() == size => engine,
            _ => FftEngine::with_strategy(size, strategy)?,
        };
        Ok(&*self.engine.insert(engine))
    }

    /// Validate raw (time, amplitude) data with the configured tolerance
    pub fn buffer(&self, times: Vec<f64>, amplitudes: Vec<f64>) -> Result<SampleBuffer> {
        SampleBuffer::with_tolerance(times, amplitudes, self.config.spacing_tolerance)
    }

    /// Forward transform and normalize
    pub fn coefficients(&mut self, buffer: &SampleBuffer) -> Result<SpectrumCoefficients> {
        let dt = buffer.dt();
        let engine = self.engine_for(buffer.len())?;
        let raw = engine.forward_real(buffer.amplitudes())?;
        normalize(SpectrumCoefficients::from_raw(raw, dt))
    }

    /// Run the full pipeline
    ///
    /// Either every stage succeeds or the first error is returned; no
    /// partial result is produced.
    pub fn analyze(&mut self, buffer: &SampleBuffer) -> Result<SpectralAnalysis> {
        debug!("analyzing {} samples (dt = {})", buffer.len(), buffer.dt());

        let coefficients = self.coefficients(buffer)?;

        let peaks = if coefficients.len() >= MIN_PEAK_SAMPLES {
            Some(extract_peaks(&coefficients, self.config.frequency_unit)?)
        } else {
            None
        };

        let power = power_spectrum(
            &coefficients,
            self.config.power_scale,
            self.config.frequency_unit,
        )?;

        Ok(SpectralAnalysis {
            coefficients,
            peaks,
            power,
        })
    }

    /// Dominant components of a buffer
    pub fn peaks(&mut self, buffer: &SampleBuffer) -> Result<PeakPair> {
        let coefficients = self.coefficients(buffer)?;
        extract_peaks(&coefficients, self.config.frequency_unit)
    }

    /// Time-domain signal from the full coefficient set
    pub fn reconstruct(&mut self, coefficients: &SpectrumCoefficients) -> Result<Vec<f64>> {
        let engine = self.engine_for(coefficients.len())?;
        reconstruct_with(engine, coefficients)
    }

    /// Time-domain approximation from a subset of non-negative bins
    pub fn reconstruct_bins(
        &mut self,
        coefficients: &SpectrumCoefficients,
        bins: &[usize],
    ) -> Result<Vec<f64>> {
        let masked = mask_bins(coefficients, bins)?;
        self.reconstruct(&masked)
    }

    /// Sinusoidal approximation from DC plus the secondary peak
    ///
    /// The primary peak is always either DC or the secondary bin, so these
    /// two bins cover both dominant components.
    pub fn reconstruct_dominant(&mut self, analysis: &SpectralAnalysis) -> Result<Vec<f64>> {
        let bins = match analysis.peaks {
            Some(pair) => vec![0, pair.secondary.bin],
            None => vec![0],
        };
        self.reconstruct_bins(&analysis.coefficients, &bins)
    }

    /// Update configuration
    pub fn update_config(&mut self, config: AnalyzerConfig) {
        if config.strategy != self.config.strategy {
            self.engine = None;
        }
        self.config = config;
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}
