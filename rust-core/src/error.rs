//! Error kinds shared by every stage of the pipeline

use crate::filters::FilterSpec;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Corrupt audio data: {0}")]
    CorruptData(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid channel count: {0}")]
    InvalidChannelCount(String),

    #[error("Invalid cutoff frequency: {0}")]
    InvalidCutoff(String),

    #[error("Invalid limiter threshold {0}%: must be between 0 and 100")]
    InvalidThreshold(f64),

    #[error("Invalid filter order {0}: must be between 1 and {max}", max = FilterSpec::MAX_ORDER)]
    InvalidOrder(usize),

    #[error("Invalid sample rate {0} Hz: must be positive")]
    InvalidSampleRate(u32),

    #[error("Invalid frequency range: {0}")]
    InvalidRange(String),

    #[error("FFT failed: {0}")]
    Fft(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
