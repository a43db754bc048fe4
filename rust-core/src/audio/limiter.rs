//! Hard amplitude limiter
//!
//! Clamps every sample to a percentage of 16-bit full scale. Unlike a
//! compressor there is no envelope or gain smoothing: samples inside the
//! threshold pass through untouched.

use super::signal::SignalBuffer;
use crate::error::{Error, Result};

/// Positive full-scale amplitude of 16-bit PCM
pub const FULL_SCALE: f64 = i16::MAX as f64;

/// Limiter threshold as a percentage of full scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimiterThreshold(f64);

impl LimiterThreshold {
    /// Create a threshold
    ///
    /// # Arguments
    /// * `percent` - Allowed peak amplitude in percent of 32767 (0 to 100)
    pub fn new(percent: f64) -> Result<Self> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(Error::InvalidThreshold(percent));
        }
        Ok(Self(percent))
    }

    pub fn percent(&self) -> f64 {
        self.0
    }

    /// Largest magnitude allowed through (e.g. 80% -> 26213.6)
    pub fn clip_value(&self) -> f64 {
        FULL_SCALE * (self.0 / 100.0)
    }
}

/// Clamp sample magnitudes to the threshold
///
/// # Returns
/// Limited samples, same length as the input
pub fn limit(signal: &SignalBuffer, threshold: LimiterThreshold) -> Vec<i16> {
    let clip_value = threshold.clip_value();

    tracing::debug!(
        percent = threshold.percent(),
        clip_value,
        samples = signal.len(),
        "limiting amplitude"
    );

    signal
        .samples()
        .iter()
        .map(|&s| f64::from(s).clamp(-clip_value, clip_value) as i16)
        .collect()
}
