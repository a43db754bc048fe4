//! Butterworth band-pass IIR design
//!
//! Analog prototype -> band-pass transform -> bilinear transform, carried
//! out in zero/pole/gain form and expanded to transfer-function
//! coefficients at the end. All arithmetic is double precision.
//!
//! The expanded polynomials lose precision quickly once the band is narrow
//! or low relative to the sample rate, so the design also keeps the poles
//! grouped into second-order sections. Filtering and frequency response
//! both go through the sections.

use crate::error::{Error, Result};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Band-pass filter specification
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    /// Prototype order (the band-pass result has order `2 * order`)
    pub order: usize,

    /// Lower -3 dB edge in Hz
    pub low_cutoff_hz: f64,

    /// Upper -3 dB edge in Hz
    pub high_cutoff_hz: f64,

    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl FilterSpec {
    /// Order used by the command-line filter tool
    pub const DEFAULT_ORDER: usize = 5;

    /// Largest accepted prototype order
    pub const MAX_ORDER: usize = 24;

    /// Create a band-pass spec with the default order
    pub fn bandpass(low_cutoff_hz: f64, high_cutoff_hz: f64, sample_rate: u32) -> Self {
        Self {
            order: Self::DEFAULT_ORDER,
            low_cutoff_hz,
            high_cutoff_hz,
            sample_rate,
        }
    }

    /// Override the prototype order
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn nyquist(&self) -> f64 {
        f64::from(self.sample_rate) / 2.0
    }

    /// Check the filter parameters before any numerical work
    pub fn validate(&self) -> Result<()> {
        if self.order < 1 || self.order > Self::MAX_ORDER {
            return Err(Error::InvalidOrder(self.order));
        }
        if self.sample_rate == 0 {
            return Err(Error::InvalidSampleRate(self.sample_rate));
        }

        let nyquist = self.nyquist();
        let (low, high) = (self.low_cutoff_hz, self.high_cutoff_hz);

        if !low.is_finite() || !high.is_finite() {
            return Err(Error::InvalidCutoff(
                "cutoff frequencies must be finite numbers".to_string(),
            ));
        }
        if high >= nyquist {
            return Err(Error::InvalidCutoff(format!(
                "high cutoff frequency ({} Hz) must be less than the Nyquist frequency ({} Hz)",
                high, nyquist
            )));
        }
        if low >= high {
            return Err(Error::InvalidCutoff(format!(
                "low cutoff frequency ({} Hz) must be less than the high cutoff frequency ({} Hz)",
                low, high
            )));
        }
        if low <= 0.0 {
            return Err(Error::InvalidCutoff(format!(
                "low cutoff frequency ({} Hz) must be greater than 0 Hz",
                low
            )));
        }

        Ok(())
    }

    /// Cutoffs as fractions of the Nyquist frequency, both in (0, 1)
    pub fn normalized_cutoffs(&self) -> (f64, f64) {
        let nyquist = self.nyquist();
        (self.low_cutoff_hz / nyquist, self.high_cutoff_hz / nyquist)
    }
}

/// Second-order section `(b0 + b1 z^-1 + b2 z^-2) / (a0 + a1 z^-1 + a2 z^-2)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sos {
    pub b: [f64; 3],
    pub a: [f64; 3],
}

/// Transfer-function coefficients `H(z) = B(z) / A(z)`
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    /// Numerator coefficients b[0..=2N]
    pub b: Vec<f64>,

    /// Denominator coefficients a[0..=2N], a[0] == 1
    pub a: Vec<f64>,

    /// The same filter as a cascade of biquads; empty when only `b`/`a` are known
    pub sections: Vec<Sos>,
}

impl FilterCoefficients {
    /// Plain transfer-function coefficients without a section breakdown
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> Self {
        Self {
            b,
            a,
            sections: Vec::new(),
        }
    }

    /// Filter order (number of delay elements)
    pub fn order(&self) -> usize {
        self.b.len().max(self.a.len()).saturating_sub(1)
    }
}

/// Sample rate of the normalized design domain (cutoffs in units of Nyquist)
const DESIGN_FS: f64 = 2.0;

/// Design a Butterworth band-pass filter
///
/// # Algorithm
/// 1. Prewarp both normalized edges: `w = 2*fs*tan(pi*wn/fs)` with `fs = 2`
/// 2. Place the N prototype poles on the left half of the unit circle
/// 3. Shift them to the band centre `w0 = sqrt(w_lo*w_hi)` scaled by the
///    bandwidth, adding N zeros at the origin
/// 4. Map zeros and poles to the z-plane with the bilinear transform,
///    sending the remaining N zeros to z = -1
/// 5. Expand to polynomials, and pair conjugate poles into biquads
///
/// # Returns
/// Coefficients with `2 * order + 1` taps in both `b` and `a`, plus `order`
/// second-order sections.
///
/// # Errors
/// `InvalidCutoff` when the parameters are out of range or a pole lands on
/// or outside the unit circle after rounding.
pub fn design_bandpass_iir(spec: &FilterSpec) -> Result<FilterCoefficients> {
    spec.validate()?;

    let n = spec.order;
    let (low_norm, high_norm) = spec.normalized_cutoffs();

    // Prewarp so the digital -3 dB points land exactly on the cutoffs
    let fs2 = 2.0 * DESIGN_FS;
    let warped_low = fs2 * (PI * low_norm / DESIGN_FS).tan();
    let warped_high = fs2 * (PI * high_norm / DESIGN_FS).tan();

    let bandwidth = warped_high - warped_low;
    let centre = (warped_low * warped_high).sqrt();

    // Analog low-pass prototype: unit gain, no zeros
    let prototype = butterworth_prototype_poles(n);

    // Low-pass -> band-pass: each prototype pole splits into two
    let centre_sq = Complex64::new(centre * centre, 0.0);
    let mut analog_poles = Vec::with_capacity(2 * n);
    let scaled: Vec<Complex64> = prototype.iter().map(|&p| p * (bandwidth / 2.0)).collect();
    for &p in &scaled {
        analog_poles.push(p + (p * p - centre_sq).sqrt());
    }
    for &p in &scaled {
        analog_poles.push(p - (p * p - centre_sq).sqrt());
    }
    let analog_zeros = vec![Complex64::new(0.0, 0.0); n];
    let analog_gain = bandwidth.powi(n as i32);

    // Bilinear transform
    let fs2_c = Complex64::new(fs2, 0.0);
    let digital_zeros: Vec<Complex64> = analog_zeros
        .iter()
        .map(|&z| (fs2_c + z) / (fs2_c - z))
        .chain(std::iter::repeat(Complex64::new(-1.0, 0.0)).take(n))
        .collect();
    let digital_poles: Vec<Complex64> = analog_poles
        .iter()
        .map(|&p| (fs2_c + p) / (fs2_c - p))
        .collect();

    let zero_product: Complex64 = analog_zeros.iter().map(|&z| fs2_c - z).product();
    let pole_product: Complex64 = analog_poles.iter().map(|&p| fs2_c - p).product();
    let digital_gain = analog_gain * (zero_product / pole_product).re;

    if let Some(pole) = digital_poles.iter().find(|p| p.norm() >= 1.0) {
        return Err(Error::InvalidCutoff(format!(
            "band too close to 0 Hz or Nyquist for a stable design (pole magnitude {})",
            pole.norm()
        )));
    }

    let sections = pair_sections(&digital_poles, digital_gain);

    let b: Vec<f64> = poly(&digital_zeros)
        .iter()
        .map(|c| c.re * digital_gain)
        .collect();
    let a: Vec<f64> = poly(&digital_poles).iter().map(|c| c.re).collect();

    tracing::debug!(
        order = n,
        low_hz = spec.low_cutoff_hz,
        high_hz = spec.high_cutoff_hz,
        sample_rate = spec.sample_rate,
        taps = b.len(),
        sections = sections.len(),
        "designed Butterworth band-pass"
    );

    Ok(FilterCoefficients { b, a, sections })
}

/// Tolerance below which a pole's imaginary part counts as zero
const REAL_POLE_TOLERANCE: f64 = 1e-12;

/// Split band-pass poles into biquads
///
/// Every conjugate pair (or pair of real poles) becomes one section with
/// zeros at z = 1 and z = -1, which are exactly the band-pass zeros. The
/// overall gain goes on the first section.
fn pair_sections(poles: &[Complex64], gain: f64) -> Vec<Sos> {
    let mut denominators = Vec::with_capacity(poles.len() / 2);
    let mut real_poles = Vec::new();

    for p in poles {
        if p.im.abs() <= REAL_POLE_TOLERANCE * p.norm().max(1.0) {
            real_poles.push(p.re);
        } else if p.im > 0.0 {
            denominators.push([1.0, -2.0 * p.re, p.norm_sqr()]);
        }
    }
    for pair in real_poles.chunks(2) {
        denominators.push(match *pair {
            [r1, r2] => [1.0, -(r1 + r2), r1 * r2],
            _ => [1.0, -pair[0], 0.0],
        });
    }

    denominators
        .into_iter()
        .enumerate()
        .map(|(i, a)| {
            let g = if i == 0 { gain } else { 1.0 };
            Sos {
                b: [g, 0.0, -g],
                a,
            }
        })
        .collect()
}

/// Poles of the order-N analog Butterworth low-pass prototype
///
/// `p_m = -exp(j*pi*m / 2N)` for `m = -N+1, -N+3, .., N-1`
fn butterworth_prototype_poles(order: usize) -> Vec<Complex64> {
    let n = order as i64;
    (0..n)
        .map(|k| {
            let m = -n + 1 + 2 * k;
            let theta = PI * m as f64 / (2 * n) as f64;
            -Complex64::from_polar(1.0, theta)
        })
        .collect()
}

/// Monic polynomial with the given roots, highest power first
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];

    for &root in roots {
        let mut next = vec![Complex64::new(0.0, 0.0); coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c * root;
        }
        coeffs = next;
    }

    coeffs
}

/// Calculate frequency response at given frequencies
///
/// # Arguments
/// * `coeffs` - Filter coefficients
/// * `frequencies` - Normalized frequencies (units of π rad/sample)
///
/// # Returns
/// Complex frequency response H(e^jω), taken as the product of the section
/// responses when sections are present
pub fn frequency_response(coeffs: &FilterCoefficients, frequencies: &[f64]) -> Vec<Complex64> {
    let eval = |taps: &[f64], omega_rad: f64| -> Complex64 {
        taps.iter()
            .enumerate()
            .map(|(n, &t)| t * Complex64::from_polar(1.0, -(omega_rad * n as f64)))
            .sum()
    };

    frequencies
        .iter()
        .map(|&omega| {
            let omega_rad = omega * PI;
            if coeffs.sections.is_empty() {
                eval(&coeffs.b, omega_rad) / eval(&coeffs.a, omega_rad)
            } else {
                coeffs
                    .sections
                    .iter()
                    .map(|s| eval(&s.b, omega_rad) / eval(&s.a, omega_rad))
                    .product()
            }
        })
        .collect()
}

/// Calculate magnitude response in dB
pub fn magnitude_response_db(coeffs: &FilterCoefficients, frequencies: &[f64]) -> Vec<f64> {
    frequency_response(coeffs, frequencies)
        .iter()
        .map(|c| 20.0 * c.norm().max(1e-300).log10())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn magnitude_at_hz(coeffs: &FilterCoefficients, freq_hz: f64, sample_rate: f64) -> f64 {
        let normalized = freq_hz / (sample_rate / 2.0);
        frequency_response(coeffs, &[normalized])[0].norm()
    }

    #[test]
    fn test_coefficient_lengths() {
        for order in 1..=6 {
            let spec = FilterSpec::bandpass(300.0, 3000.0, 16000).with_order(order);
            let coeffs = design_bandpass_iir(&spec).unwrap();

            assert_eq!(coeffs.b.len(), 2 * order + 1);
            assert_eq!(coeffs.a.len(), 2 * order + 1);
            assert_eq!(coeffs.order(), 2 * order);
            assert!((coeffs.a[0] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_first_order_matches_closed_form() {
        // Order 1 band-pass at low=0.25, high=0.5 (normalized): b is symmetric
        // [g, 0, -g] and the response peaks at unity between the edges
        let spec = FilterSpec::bandpass(1000.0, 2000.0, 8000).with_order(1);
        let coeffs = design_bandpass_iir(&spec).unwrap();

        assert!(coeffs.b[1].abs() < 1e-12);
        assert!((coeffs.b[0] + coeffs.b[2]).abs() < 1e-12);

        let centre_hz = 8000.0 / PI * ((PI * 0.125).tan() * (PI * 0.25).tan()).sqrt().atan();
        assert!((magnitude_at_hz(&coeffs, centre_hz, 8000.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_minus_3db_at_cutoffs() {
        let spec = FilterSpec::bandpass(500.0, 1000.0, 8000);
        let coeffs = design_bandpass_iir(&spec).unwrap();

        let half_power = std::f64::consts::FRAC_1_SQRT_2;
        assert!((magnitude_at_hz(&coeffs, 500.0, 8000.0) - half_power).abs() < 1e-6);
        assert!((magnitude_at_hz(&coeffs, 1000.0, 8000.0) - half_power).abs() < 1e-6);
    }

    #[test]
    fn test_passband_flat_and_stopband_rejected() {
        let spec = FilterSpec::bandpass(500.0, 1000.0, 8000);
        let coeffs = design_bandpass_iir(&spec).unwrap();

        assert!((magnitude_at_hz(&coeffs, 700.0, 8000.0) - 1.0).abs() < 0.01);
        assert!(magnitude_at_hz(&coeffs, 100.0, 8000.0) < 1e-3);
        assert!(magnitude_at_hz(&coeffs, 3000.0, 8000.0) < 1e-3);

        let db = magnitude_response_db(&coeffs, &[0.0, 1.0]);
        assert!(db.iter().all(|&d| d < -100.0));
    }

    #[test]
    fn test_rolloff_steepens_with_order() {
        let stop = |order| {
            let spec = FilterSpec::bandpass(1000.0, 2000.0, 16000).with_order(order);
            let coeffs = design_bandpass_iir(&spec).unwrap();
            magnitude_at_hz(&coeffs, 250.0, 16000.0)
        };

        assert!(stop(2) < stop(1));
        assert!(stop(4) < stop(2));
    }

    #[test]
    fn test_wide_high_order_design_is_finite() {
        let spec = FilterSpec::bandpass(20.0, 20000.0, 44100).with_order(8);
        spec.validate().unwrap();
        let coeffs = design_bandpass_iir(&spec).unwrap();
        assert!(coeffs.a.iter().all(|c| c.is_finite()));
        assert!(coeffs.b.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_low_above_high_rejected() {
        let spec = FilterSpec::bandpass(5000.0, 4000.0, 8000);
        assert!(matches!(design_bandpass_iir(&spec), Err(Error::InvalidCutoff(_))));

        let spec = FilterSpec::bandpass(1000.0, 500.0, 8000);
        assert!(matches!(design_bandpass_iir(&spec), Err(Error::InvalidCutoff(_))));
    }

    #[test]
    fn test_high_at_nyquist_rejected() {
        let spec = FilterSpec::bandpass(500.0, 4000.0, 8000);
        assert!(matches!(design_bandpass_iir(&spec), Err(Error::InvalidCutoff(_))));
    }

    #[test]
    fn test_degenerate_specs_rejected() {
        let zero_low = FilterSpec::bandpass(0.0, 1000.0, 8000);
        assert!(matches!(zero_low.validate(), Err(Error::InvalidCutoff(_))));

        let nan = FilterSpec::bandpass(f64::NAN, 1000.0, 8000);
        assert!(matches!(nan.validate(), Err(Error::InvalidCutoff(_))));

        let no_order = FilterSpec::bandpass(500.0, 1000.0, 8000).with_order(0);
        assert!(matches!(no_order.validate(), Err(Error::InvalidOrder(0))));

        let no_rate = FilterSpec::bandpass(500.0, 1000.0, 0);
        assert!(matches!(no_rate.validate(), Err(Error::InvalidSampleRate(0))));
    }

    #[test]
    fn test_order_upper_bound() {
        let max = FilterSpec::bandpass(500.0, 1000.0, 8000).with_order(FilterSpec::MAX_ORDER);
        assert!(max.validate().is_ok());

        let too_high = FilterSpec::bandpass(500.0, 1000.0, 8000).with_order(25);
        assert!(matches!(too_high.validate(), Err(Error::InvalidOrder(25))));

        let huge = FilterSpec::bandpass(500.0, 1000.0, 8000).with_order(1_000_000);
        assert!(matches!(design_bandpass_iir(&huge), Err(Error::InvalidOrder(_))));
    }

    #[test]
    fn test_minus_3db_for_low_bands_at_high_rates() {
        let cases = [(20.0, 200.0, 44100), (300.0, 400.0, 44100), (100.0, 150.0, 48000)];
        let half_power = std::f64::consts::FRAC_1_SQRT_2;

        for (low, high, rate) in cases {
            let coeffs = design_bandpass_iir(&FilterSpec::bandpass(low, high, rate)).unwrap();
            let fs = f64::from(rate);

            let at_low = magnitude_at_hz(&coeffs, low, fs);
            let at_high = magnitude_at_hz(&coeffs, high, fs);
            let at_centre = magnitude_at_hz(&coeffs, (low * high).sqrt(), fs);

            let case = format!("{}-{} Hz @ {}", low, high, rate);
            assert!((at_low - half_power).abs() < 1e-4, "{}: low edge {}", case, at_low);
            assert!((at_high - half_power).abs() < 1e-4, "{}: high edge {}", case, at_high);
            assert!(at_centre > 0.99, "{}: centre {}", case, at_centre);
        }
    }

    #[test]
    fn test_sections_are_stable_conjugate_pairs() {
        let spec = FilterSpec::bandpass(20.0, 200.0, 44100);
        let coeffs = design_bandpass_iir(&spec).unwrap();

        assert_eq!(coeffs.sections.len(), spec.order);
        for section in &coeffs.sections {
            assert_eq!(section.a[0], 1.0);
            assert_eq!(section.b[1], 0.0);
            assert_eq!(section.b[0], -section.b[2]);
            // a2 = |p|^2 for a conjugate pair
            assert!(section.a[2] < 1.0 && section.a[2] > 0.0);
        }
    }

    #[test]
    fn test_sections_match_transfer_function_when_well_conditioned() {
        let coeffs = design_bandpass_iir(&FilterSpec::bandpass(500.0, 1000.0, 8000)).unwrap();
        let direct = FilterCoefficients::new(coeffs.b.clone(), coeffs.a.clone());

        let freqs = [0.05, 0.125, 0.1875, 0.25, 0.5];
        let cascaded = frequency_response(&coeffs, &freqs);
        let expanded = frequency_response(&direct, &freqs);
        for (c, e) in cascaded.iter().zip(&expanded) {
            assert!((c - e).norm() < 1e-6, "{} vs {}", c, e);
        }
    }

    #[test]
    fn test_band_at_zero_hz_limit_rejected() {
        // Rounds the lowest poles onto the unit circle
        let spec = FilterSpec::bandpass(1e-12, 1000.0, 44100);
        assert!(spec.validate().is_ok());
        assert!(matches!(design_bandpass_iir(&spec), Err(Error::InvalidCutoff(_))));
    }

    #[test]
    fn test_poly_expansion() {
        // (x - 1)(x - 2) = x^2 - 3x + 2
        let roots = [Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0)];
        let coeffs: Vec<f64> = poly(&roots).iter().map(|c| c.re).collect();
        assert_eq!(coeffs, vec![1.0, -3.0, 2.0]);
    }
}
