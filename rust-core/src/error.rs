//! Error taxonomy for the spectral pipeline

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectralError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient data: need at least {needed} samples, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Numeric overflow: {0}")]
    NumericOverflow(String),
}

pub type Result<T> = std::result::Result<T, SpectralError>;
