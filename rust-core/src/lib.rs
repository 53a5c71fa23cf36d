//! Fourier Workbench - Discrete Spectral Analysis Core
//! 
//! Forward/inverse DFT with amplitude-normalized coefficients, dominant
//! frequency extraction, power spectra and time-domain reconstruction.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![allow(non_local_definitions)]

pub mod error;
pub mod signal;
pub mod spectrum;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{Result, SpectralError};
pub use signal::SampleBuffer;
pub use spectrum::{AnalyzerConfig, SpectralAnalysis, SpectrumAnalyzer};
