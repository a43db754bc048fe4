//! Hard amplitude limiting.

use clap::Args;
use std::path::PathBuf;
use wavkit::audio::{limit, write_wav, LimiterThreshold, SignalBuffer};

use super::common::load_mono;

#[derive(Args)]
pub struct LimitArgs {
    /// Input WAV file
    #[arg(short, long, value_name = "INPUT")]
    pub input: PathBuf,

    /// Output WAV file (mono, 16-bit)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Maximum amplitude in percent of full scale
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub threshold: f64,
}

pub fn run(args: LimitArgs) -> anyhow::Result<()> {
    // Validate before touching the input file
    let threshold = LimiterThreshold::new(args.threshold)?;
    let signal = load_mono(&args.input)?;

    let limited = limit(&signal, threshold);
    write_wav(&args.output, &SignalBuffer::new(limited, signal.sample_rate())?)?;

    println!(
        "Limited {} to {:.1}% ({:.0}) -> {}",
        args.input.display(),
        threshold.percent(),
        threshold.clip_value(),
        args.output.display()
    );

    Ok(())
}
