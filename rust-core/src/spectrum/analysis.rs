//! Single-sided magnitude spectrum of a whole signal
//!
//! The entire buffer is one analysis window: no windowing, no averaging.
//! Magnitudes are normalized by 1/N and doubled for every bin that has a
//! mirrored negative-frequency partner.

use super::fft::FftEngine;
use crate::audio::SignalBuffer;
use crate::error::{Error, Result};

/// Display range used by the spectrum tool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumRange {
    /// Lowest frequency to keep (Hz)
    pub min_hz: f64,

    /// Highest frequency to keep (Hz)
    pub max_hz: f64,
}

impl Default for SpectrumRange {
    fn default() -> Self {
        Self {
            min_hz: 0.0,
            max_hz: 3000.0,
        }
    }
}

/// One-sided magnitude spectrum
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spectrum {
    /// Bin frequencies in Hz (non-decreasing)
    pub frequencies: Vec<f64>,

    /// Bin magnitudes in PCM units (non-negative)
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Frequency and magnitude of the strongest bin
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.frequencies
            .iter()
            .copied()
            .zip(self.magnitudes.iter().copied())
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
    }

    /// Strongest `count` bins, loudest first
    pub fn strongest(&self, count: usize) -> Vec<(f64, f64)> {
        let mut bins: Vec<(f64, f64)> = self
            .frequencies
            .iter()
            .copied()
            .zip(self.magnitudes.iter().copied())
            .collect();
        bins.sort_by(|(_, a), (_, b)| b.total_cmp(a));
        bins.truncate(count);
        bins
    }
}

/// Compute the single-sided spectrum of a signal
///
/// # Returns
/// `N/2 + 1` bins; bin k sits at `k * sample_rate / N` Hz. An empty signal
/// yields an empty spectrum.
pub fn analyze(signal: &SignalBuffer) -> Result<Spectrum> {
    let n = signal.len();
    if n == 0 {
        return Ok(Spectrum::default());
    }

    let sample_rate = f64::from(signal.sample_rate());
    let mut engine = FftEngine::new(n)?;

    let raw = engine.compute_magnitude(&signal.to_f64())?;
    let nyquist_bin = (n % 2 == 0).then_some(n / 2);

    let magnitudes: Vec<f64> = raw
        .iter()
        .enumerate()
        .map(|(k, &mag)| {
            let normalized = mag / n as f64;
            // DC and (for even N) Nyquist have no mirrored partner
            if k == 0 || Some(k) == nyquist_bin {
                normalized
            } else {
                2.0 * normalized
            }
        })
        .collect();

    let frequencies = engine.frequency_axis_hz(sample_rate);

    tracing::debug!(
        samples = n,
        bins = magnitudes.len(),
        resolution_hz = sample_rate / n as f64,
        "computed spectrum"
    );

    Ok(Spectrum {
        frequencies,
        magnitudes,
    })
}

/// Restrict a spectrum to `[min_freq, max_freq]`
///
/// Keeps the contiguous bins from the first with `f >= min_freq` up to (not
/// including) the first with `f > max_freq`. When no bin exceeds `max_freq`
/// the range runs to the end of the spectrum.
pub fn filter_range(spectrum: &Spectrum, min_freq: f64, max_freq: f64) -> Result<Spectrum> {
    if !min_freq.is_finite() || !max_freq.is_finite() {
        return Err(Error::InvalidRange(
            "frequency bounds must be finite numbers".to_string(),
        ));
    }
    if min_freq > max_freq {
        return Err(Error::InvalidRange(format!(
            "minimum frequency ({} Hz) is above maximum frequency ({} Hz)",
            min_freq, max_freq
        )));
    }

    let freqs = &spectrum.frequencies;
    let start = freqs.partition_point(|&f| f < min_freq);
    let end = match freqs.iter().position(|&f| f > max_freq) {
        Some(index) => index,
        None => freqs.len(),
    };
    let end = end.max(start);

    Ok(Spectrum {
        frequencies: freqs[start..end].to_vec(),
        magnitudes: spectrum.magnitudes[start..end].to_vec(),
    })
}

/// Analyze a signal and keep only the bins inside `range`
pub fn analyze_range(signal: &SignalBuffer, range: SpectrumRange) -> Result<Spectrum> {
    let spectrum = analyze(signal)?;
    filter_range(&spectrum, range.min_hz, range.max_hz)
}
