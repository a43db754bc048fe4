//! Waveform summary and export.

use clap::Args;
use std::path::PathBuf;
use wavkit::export::export_waveform_csv;

use super::common::load_mono;

#[derive(Args)]
pub struct WaveformArgs {
    /// Input WAV file
    #[arg(short, long, value_name = "INPUT")]
    pub input: PathBuf,

    /// Write `time_s,amplitude` rows to this CSV file
    #[arg(long, value_name = "CSV")]
    pub csv: Option<PathBuf>,
}

pub fn run(args: WaveformArgs) -> anyhow::Result<()> {
    let signal = load_mono(&args.input)?;

    println!("File:        {}", args.input.display());
    println!("Sample Rate: {} Hz", signal.sample_rate());
    println!(
        "Duration:    {:.3}s ({} samples)",
        signal.duration_secs(),
        signal.len()
    );
    println!(
        "Peak:        {} ({:.1}% of full scale)",
        signal.peak(),
        f64::from(signal.peak()) / f64::from(i16::MAX) * 100.0
    );
    println!("RMS:         {:.1}", signal.rms());

    if let Some(csv) = args.csv {
        export_waveform_csv(&signal, &csv)?;
        println!("Waveform written to {}", csv.display());
    }

    Ok(())
}
