//! IIR filtering with direct-form II transposed state
//!
//! Each stage evaluates the difference equation
//! `a0*y[n] = b0*x[n] + .. + bM*x[n-M] - a1*y[n-1] - .. - aN*y[n-N]`
//! one sample at a time, carrying its delay line forward. Designed filters
//! run as a cascade of second-order stages; bare `b`/`a` coefficients run as
//! a single stage.

use super::design::FilterCoefficients;
use crate::audio::SignalBuffer;

/// One direct-form II transposed stage
#[derive(Debug, Clone)]
struct Stage {
    /// Numerator taps normalized by a[0]
    b: Vec<f64>,

    /// Denominator taps normalized by a[0]
    a: Vec<f64>,

    /// Delay line z[0..order]
    state: Vec<f64>,
}

impl Stage {
    /// Pad both tap vectors to a common length and divide by `a[0]`
    fn new(b_taps: &[f64], a_taps: &[f64]) -> Self {
        let len = b_taps.len().max(a_taps.len()).max(1);
        let a0 = a_taps.first().copied().unwrap_or(1.0);

        let mut b = vec![0.0; len];
        let mut a = vec![0.0; len];
        for (dst, &src) in b.iter_mut().zip(b_taps) {
            *dst = src / a0;
        }
        for (dst, &src) in a.iter_mut().zip(a_taps) {
            *dst = src / a0;
        }

        Self {
            b,
            a,
            state: vec![0.0; len - 1],
        }
    }

    #[inline]
    fn process(&mut self, input: f64) -> f64 {
        let order = self.state.len();
        if order == 0 {
            return self.b[0] * input;
        }

        let output = self.b[0] * input + self.state[0];

        for i in 0..order - 1 {
            self.state[i] = self.b[i + 1] * input + self.state[i + 1] - self.a[i + 1] * output;
        }
        self.state[order - 1] = self.b[order] * input - self.a[order] * output;

        output
    }
}

/// Recursive filter processor
#[derive(Debug, Clone)]
pub struct IirFilter {
    /// Stages applied in sequence
    stages: Vec<Stage>,
}

impl IirFilter {
    /// Create a filter with zeroed delay lines
    ///
    /// Uses the second-order sections when the coefficients carry them,
    /// otherwise one stage built from `b`/`a`.
    pub fn new(coeffs: &FilterCoefficients) -> Self {
        let stages = if coeffs.sections.is_empty() {
            vec![Stage::new(&coeffs.b, &coeffs.a)]
        } else {
            coeffs
                .sections
                .iter()
                .map(|section| Stage::new(&section.b, &section.a))
                .collect()
        };

        Self { stages }
    }

    /// Process single sample
    ///
    /// # Arguments
    /// * `input` - Input sample x[n]
    ///
    /// # Returns
    /// Filtered output sample y[n]
    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        self.stages
            .iter_mut()
            .fold(input, |x, stage| stage.process(x))
    }

    /// Process a block of samples
    ///
    /// # Returns
    /// Filtered output samples (same length as input)
    pub fn process_block(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| self.process_sample(x)).collect()
    }

    /// Process a block in-place
    pub fn process_block_inplace(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    /// Reset filter state (clear every delay line)
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.state.fill(0.0);
        }
    }

    /// Number of delay elements across all stages
    pub fn order(&self) -> usize {
        self.stages.iter().map(|stage| stage.state.len()).sum()
    }
}

/// Filter a whole signal from a zero initial state
///
/// Output stays floating point; quantize it with the PCM codec before
/// writing it back to 16-bit.
pub fn apply(coeffs: &FilterCoefficients, signal: &SignalBuffer) -> Vec<f64> {
    let mut filter = IirFilter::new(coeffs);
    let mut output = signal.to_f64();
    filter.process_block_inplace(&mut output);
    output
}
