//! Spectral analysis with FFT

pub mod analysis;
pub mod fft;

pub use analysis::{analyze, analyze_range, filter_range, Spectrum, SpectrumRange};
pub use fft::FftEngine;
