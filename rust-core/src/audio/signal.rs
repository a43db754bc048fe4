//! Decoded mono PCM signal
//!
//! The value handed between pipeline stages: each stage consumes a
//! `SignalBuffer` and produces a new one (or a derived value).

use crate::error::{Error, Result};

/// Mono 16-bit PCM samples plus their sample rate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl SignalBuffer {
    /// Create a new signal buffer
    ///
    /// # Arguments
    /// * `samples` - Mono samples in playback order
    /// * `sample_rate` - Sample rate in Hz (must be positive)
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::InvalidSampleRate(sample_rate));
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Consume the buffer and return the raw samples
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    /// Samples widened to `f64` for numeric processing
    pub fn to_f64(&self) -> Vec<f64> {
        self.samples.iter().map(|&s| f64::from(s)).collect()
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Time of each sample in seconds, starting at zero
    ///
    /// Equivalent to `N` evenly spaced points on `[0, N / fs)`.
    pub fn time_axis(&self) -> Vec<f64> {
        let fs = f64::from(self.sample_rate);
        (0..self.samples.len()).map(|i| i as f64 / fs).collect()
    }

    /// Largest absolute sample value
    pub fn peak(&self) -> u16 {
        self.samples
            .iter()
            .map(|s| s.unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    /// Root-mean-square level in PCM units
    pub fn rms(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }

        let sum_of_squares: f64 = self
            .samples
            .iter()
            .map(|&s| {
                let x = f64::from(s);
                x * x
            })
            .sum();

        (sum_of_squares / self.samples.len() as f64).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sample_rate_rejected() {
        let result = SignalBuffer::new(vec![0; 10], 0);
        assert!(matches!(result, Err(Error::InvalidSampleRate(0))));
    }

    #[test]
    fn test_time_axis_excludes_endpoint() {
        let signal = SignalBuffer::new(vec![0; 4], 4).unwrap();
        assert_eq!(signal.time_axis(), vec![0.0, 0.25, 0.5, 0.75]);
        assert!((signal.duration_secs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_peak_handles_most_negative_sample() {
        let signal = SignalBuffer::new(vec![100, i16::MIN, 20], 8000).unwrap();
        assert_eq!(signal.peak(), 32768);
    }

    #[test]
    fn test_rms() {
        let signal = SignalBuffer::new(vec![3, -3, 3, -3], 8000).unwrap();
        assert!((signal.rms() - 3.0).abs() < 1e-12);

        let empty = SignalBuffer::new(Vec::new(), 8000).unwrap();
        assert_eq!(empty.rms(), 0.0);
        assert_eq!(empty.peak(), 0);
    }
}
