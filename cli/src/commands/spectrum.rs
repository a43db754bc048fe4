//! Spectrum analysis over a frequency range.

use clap::Args;
use std::path::PathBuf;
use wavkit::export::export_spectrum_csv;
use wavkit::spectrum::{analyze_range, SpectrumRange};

use super::common::load_mono;

#[derive(Args)]
pub struct SpectrumArgs {
    /// Input WAV file
    #[arg(short, long, value_name = "INPUT")]
    pub input: PathBuf,

    /// Minimum frequency to show (Hz)
    #[arg(short = 'm', long, default_value_t = 0.0)]
    pub min_frequency: f64,

    /// Maximum frequency to show (Hz)
    #[arg(short = 'x', long, default_value_t = 3000.0)]
    pub max_frequency: f64,

    /// Show top N bins
    #[arg(long, default_value_t = 5)]
    pub peaks: usize,

    /// Write `frequency_hz,magnitude` rows to this CSV file
    #[arg(long, value_name = "CSV")]
    pub csv: Option<PathBuf>,
}

pub fn run(args: SpectrumArgs) -> anyhow::Result<()> {
    let signal = load_mono(&args.input)?;
    let range = SpectrumRange {
        min_hz: args.min_frequency,
        max_hz: args.max_frequency,
    };

    let spectrum = analyze_range(&signal, range)?;

    println!(
        "Spectrum of {} ({} - {} Hz)",
        args.input.display(),
        range.min_hz,
        range.max_hz
    );
    if !signal.is_empty() {
        println!(
            "  {} bins, {:.3} Hz resolution",
            spectrum.len(),
            f64::from(signal.sample_rate()) / signal.len() as f64
        );
    }

    for (freq, mag) in spectrum.strongest(args.peaks) {
        println!("  {:>10.2} Hz  {:>12.3}", freq, mag);
    }

    if let Some(csv) = args.csv {
        export_spectrum_csv(&spectrum, &csv)?;
        println!("Spectrum written to {}", csv.display());
    }

    Ok(())
}
