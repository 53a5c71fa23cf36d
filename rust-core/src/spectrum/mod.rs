//! Spectral analysis: transform, normalization, peaks, power and reconstruction

pub mod fft;
pub mod coefficients;
pub mod peaks;
pub mod power;
pub mod reconstruct;
pub mod sweep;
pub mod analysis;

pub use fft::{FftEngine, FrequencyUnit, TransformStrategy};
pub use coefficients::{normalize, denormalize, SpectrumCoefficients};
pub use peaks::{extract_peaks, top_peaks, FrequencyPeak, PeakPair};
pub use power::{power_spectrum, PowerScale, PowerSpectrum};
pub use reconstruct::{reconstruct, reconstruct_bins, reconstruct_complex, reconstruct_peaks};
pub use sweep::{envelope_step, EnvelopeFrame, EnvelopeSweep};
pub use analysis::{AnalyzerConfig, SpectralAnalysis, SpectrumAnalyzer};
