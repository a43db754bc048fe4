//! wavkit - 16-bit PCM WAV DSP core
//!
//! Decoding, spectrum analysis, Butterworth band-pass filtering and
//! amplitude limiting for mono (or down-mixed) WAV audio.
//!
//! ```no_run
//! use wavkit::audio::{read_wav, write_wav, SignalBuffer};
//! use wavkit::audio::codec::quantize;
//! use wavkit::filters::{apply, design_bandpass_iir, FilterSpec};
//!
//! # fn main() -> wavkit::Result<()> {
//! let signal = read_wav("input.wav")?.into_mono()?;
//! let spec = FilterSpec::bandpass(500.0, 1000.0, signal.sample_rate());
//! let filtered = apply(&design_bandpass_iir(&spec)?, &signal);
//! write_wav("output.wav", &SignalBuffer::new(quantize(&filtered), signal.sample_rate())?)?;
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod error;
pub mod export;
pub mod filters;
pub mod spectrum;

pub use audio::SignalBuffer;
pub use error::{Error, Result};
pub use filters::{FilterCoefficients, FilterSpec};
pub use spectrum::Spectrum;
