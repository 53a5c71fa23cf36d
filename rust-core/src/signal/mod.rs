//! Time-domain input: sample buffers and synthetic test signals

pub mod buffer;
pub mod generators;

pub use buffer::SampleBuffer;
