//! Butterworth band-pass filtering.

use clap::Args;
use std::path::PathBuf;
use wavkit::audio::codec::quantize;
use wavkit::audio::{write_wav, SignalBuffer};
use wavkit::filters::{apply, design_bandpass_iir, FilterSpec};

use super::common::load_mono;

#[derive(Args)]
pub struct FilterArgs {
    /// Input WAV file
    #[arg(short, long, value_name = "INPUT")]
    pub input: PathBuf,

    /// Output WAV file (mono, 16-bit)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Low cutoff frequency (Hz)
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub low: f64,

    /// High cutoff frequency (Hz)
    #[arg(short = 'H', long, default_value_t = 10000.0, allow_negative_numbers = true)]
    pub high: f64,

    /// Butterworth prototype order
    #[arg(long, default_value_t = FilterSpec::DEFAULT_ORDER)]
    pub order: usize,
}

pub fn run(args: FilterArgs) -> anyhow::Result<()> {
    let signal = load_mono(&args.input)?;

    let spec =
        FilterSpec::bandpass(args.low, args.high, signal.sample_rate()).with_order(args.order);
    let coeffs = design_bandpass_iir(&spec)?;

    let filtered = apply(&coeffs, &signal);
    let result = SignalBuffer::new(quantize(&filtered), signal.sample_rate())?;
    write_wav(&args.output, &result)?;

    println!(
        "Filtered {} ({} - {} Hz, order {}) -> {}",
        args.input.display(),
        args.low,
        args.high,
        args.order,
        args.output.display()
    );

    Ok(())
}
